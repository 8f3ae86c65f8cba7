pub mod commands;
pub mod parser;

pub use parser::{Cli, Commands};

use crate::config::Config;
use crate::utils::Result;

pub fn execute_command(cli: Cli) -> Result<()> {
    let config = Config::new(cli.token, cli.dry_run, cli.log_dir)?;

    match cli.command {
        Commands::Batch(args) => commands::batch::execute(config, args),
        Commands::Csv(args) => commands::csv::execute(config, args),
        Commands::Export(args) => commands::export::execute(config, args),
        Commands::Notify(args) => commands::notify::execute(config, args),
        Commands::Setup(args) => commands::setup::execute(config, args),
    }
}

use crate::cli::commands::common;
use crate::cli::parser::SetupArgs;
use crate::config::defaults::RATE_LIMIT_DELAY;
use crate::config::Config;
use crate::core::slack::SlackApi;
use crate::utils::Result;
use std::thread;

/// Demo setup only: seeds a test workspace with channels the archive modes
/// can then be pointed at.
pub fn execute(config: Config, args: SetupArgs) -> Result<()> {
    let names: Vec<String> = if args.names.is_empty() {
        (1..=args.count)
            .map(|i| format!("{}-{i}", args.prefix))
            .collect()
    } else {
        args.names
    };

    if config.dry_run {
        for name in &names {
            println!("[dry run] would create #{name}");
        }
        return Ok(());
    }

    let client = common::connect(&config)?;

    for (i, name) in names.iter().enumerate() {
        match client.create_channel(name) {
            Ok(state) => println!("created #{} ({})", state.name, state.id),
            // Re-running setup against the same workspace is fine.
            Err(err) if err.api_code() == Some("name_taken") => {
                println!("#{name} already exists, leaving it alone");
            }
            Err(err) => return Err(err),
        }
        if i + 1 < names.len() {
            thread::sleep(RATE_LIMIT_DELAY);
        }
    }

    Ok(())
}

use crate::cli::commands::common;
use crate::cli::parser::CsvArgs;
use crate::config::Config;
use crate::core::archiver::Archiver;
use crate::core::csv::{join_lists, load_archive_list, load_master_list};
use crate::utils::{Result, RunLog, SweepError};

pub fn execute(config: Config, args: CsvArgs) -> Result<()> {
    let names = load_archive_list(&args.archive_list)?;
    if names.is_empty() {
        return Err(SweepError::config_error(format!(
            "{} contains no channels",
            args.archive_list.display()
        )));
    }
    let master = load_master_list(&args.master_list)?;

    let (entries, missing) = join_lists(&names, &master);

    let client = common::connect(&config)?;
    let mut log = RunLog::create(&config.log_dir)?;
    let log_path = log.path().to_path_buf();

    // Names the master list cannot resolve are skipped and logged, not
    // retried.
    for name in &missing {
        println!("skipping '{name}': not in master list");
        log.record(name, "-", "not in master list (skipped)")?;
    }

    if entries.is_empty() {
        println!("No channels left to archive after the master-list join");
        println!("Log file: {}", log_path.display());
        return Ok(());
    }

    println!(
        "Archiving {} channels in batches of {}{}",
        entries.len(),
        args.batch_size,
        if config.dry_run { " (dry run)" } else { "" }
    );

    let mut gate = common::gate_for(args.yes);
    let mut archiver =
        Archiver::new(&client, &mut log, config.dry_run).verify_status(args.verify);
    let result = archiver.run_batches(&entries, args.batch_size, gate.as_mut())?;

    common::print_summary(&config, &result, &log_path);
    if !missing.is_empty() {
        println!("Not in master list: {}", missing.len());
    }
    Ok(())
}

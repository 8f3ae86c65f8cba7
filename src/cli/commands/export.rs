use crate::cli::commands::common;
use crate::cli::parser::ExportArgs;
use crate::config::defaults::PROTECTED_CHANNELS;
use crate::config::Config;
use crate::core::archiver::Archiver;
use crate::core::channel::ChannelEntry;
use crate::core::csv::{load_export, ExportCriteria};
use crate::utils::{Result, RunLog};

pub fn execute(config: Config, args: ExportArgs) -> Result<()> {
    let criteria = ExportCriteria {
        max_members: args.max_members,
        cutoff: args
            .cutoff
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default(),
        protected: PROTECTED_CHANNELS.iter().map(|s| s.to_string()).collect(),
    };

    let (candidates, stats) = load_export(&args.export, &criteria)?;

    println!("Export rows: {}", stats.total);
    println!(
        "  skipped: {} private, {} archived, {} protected, {} over {} members, {} recently active",
        stats.skipped_private,
        stats.skipped_archived,
        stats.skipped_protected,
        stats.skipped_members,
        args.max_members,
        stats.skipped_active
    );
    if stats.parse_errors > 0 {
        println!("  parse errors: {}", stats.parse_errors);
    }
    println!("Channels meeting criteria: {}", candidates.len());

    if candidates.is_empty() {
        println!("Nothing to archive");
        return Ok(());
    }

    let entries: Vec<ChannelEntry> = candidates.into_iter().map(|c| c.entry).collect();

    let client = common::connect(&config)?;
    let mut log = RunLog::create(&config.log_dir)?;
    let log_path = log.path().to_path_buf();

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
    Ok(())
}

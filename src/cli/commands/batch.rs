use crate::cli::commands::common;
use crate::cli::parser::BatchArgs;
use crate::config::Config;
use crate::core::archiver::Archiver;
use crate::core::channel::ChannelEntry;
use crate::utils::{Result, RunLog, SweepError};

/// The standing cleanup batch: channels ITOps has already signed off on.
/// Overridden by any ID:NAME tokens passed on the command line.
const HARDCODED_BATCH: &[&str] = &[
    "C04QXJH2B9F:proj-sunset-widgets",
    "C04R8T1UQ2M:tmp-offsite-2024",
    "C058JW3NH7D:launch-war-room",
    "C05B2K9XF4A:vendor-acme-pilot",
    "C06C7P5RD8E:hack-week-leftovers",
    "C06D1M4VT2K:interview-loop-archive",
];

pub fn execute(config: Config, args: BatchArgs) -> Result<()> {
    let tokens: Vec<String> = if args.entries.is_empty() {
        HARDCODED_BATCH.iter().map(|s| s.to_string()).collect()
    } else {
        args.entries
    };

    let mut entries = Vec::new();
    let mut parse_failures = Vec::new();
    for token in &tokens {
        match ChannelEntry::parse_token(token) {
            Ok(entry) => entries.push(entry),
            Err(err) => parse_failures.push((token.clone(), err.to_string())),
        }
    }

    if entries.is_empty() {
        return Err(SweepError::config_error(
            "no valid channel entries to archive",
        ));
    }

    let client = common::connect(&config)?;
    let mut log = RunLog::create(&config.log_dir)?;
    let log_path = log.path().to_path_buf();

    for (token, reason) in &parse_failures {
        println!("skipping '{token}': {reason}");
        log.note(&format!("parse failure for '{token}': {reason}"))?;
    }

    println!(
        "Archiving {} channels{}",
        entries.len(),
        if config.dry_run { " (dry run)" } else { "" }
    );

    let mut archiver =
        Archiver::new(&client, &mut log, config.dry_run).verify_status(args.verify);
    let result = archiver.run_batch(&entries)?;

    common::print_summary(&config, &result, &log_path);
    if !parse_failures.is_empty() {
        println!("Parse failures: {}", parse_failures.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardcoded_batch_tokens_are_well_formed() {
        for token in HARDCODED_BATCH {
            ChannelEntry::parse_token(token).unwrap();
        }
    }
}

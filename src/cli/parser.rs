use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::defaults::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_MEMBERS};

#[derive(Parser)]
#[command(name = "slack-sweep")]
#[command(about = "Bulk Slack channel archiver")]
#[command(
    version,
    long_about = "Archives Slack channels in bulk from a hardcoded batch, joined CSV lists, \
                  or an admin export, with dry-run simulation and an append-only run log"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Slack API token
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Simulate every archive call without mutating anything
    #[arg(long, env = "SLACK_SWEEP_DRY_RUN", global = true)]
    pub dry_run: bool,

    /// Directory the per-run log file is written to
    #[arg(long, env = "SLACK_SWEEP_LOG_DIR", default_value = ".", global = true)]
    pub log_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Archive the built-in channel batch (or ID:NAME tokens passed as arguments)
    Batch(BatchArgs),
    /// Archive channels from a to-archive CSV joined against a master list
    Csv(CsvArgs),
    /// Archive inactive channels selected from a Slack admin export CSV
    Export(ExportArgs),
    /// Post the archive warning notice to an operations channel
    Notify(NotifyArgs),
    /// Create throwaway channels for exercising the tool against a test workspace
    Setup(SetupArgs),
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// ID:NAME tokens overriding the built-in batch
    pub entries: Vec<String>,

    /// Check channel status before archiving and skip channels already archived
    #[arg(long)]
    pub verify: bool,
}

#[derive(Args, Debug)]
pub struct CsvArgs {
    /// CSV of channels to archive (column 1 = channel name)
    #[arg(long, env = "SLACK_SWEEP_ARCHIVE_CSV")]
    pub archive_list: PathBuf,

    /// Master CSV mapping channel names to IDs (columns 1 and 2)
    #[arg(long, env = "SLACK_SWEEP_MASTER_CSV")]
    pub master_list: PathBuf,

    /// Channels per confirmation-gated batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Check channel status before archiving and skip channels already archived
    #[arg(long)]
    pub verify: bool,

    /// Proceed through every batch without prompting
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Slack admin export CSV (Name, ID, Members, Last activity, Private, Archived)
    pub export: PathBuf,

    /// Keep channels with more members than this
    #[arg(long, default_value_t = DEFAULT_MAX_MEMBERS)]
    pub max_members: u32,

    /// Keep channels active on or after this date (YYYY-MM-DD)
    #[arg(long, default_value = "2025-07-02")]
    pub cutoff: NaiveDate,

    /// Channels per confirmation-gated batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Check channel status before archiving and skip channels already archived
    #[arg(long)]
    pub verify: bool,

    /// Proceed through every batch without prompting
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// CSV of channels scheduled for archiving (column 1 = channel name)
    #[arg(long, env = "SLACK_SWEEP_ARCHIVE_CSV")]
    pub archive_list: PathBuf,

    /// Operations channel the notice is posted to
    #[arg(long, default_value = "team-tech")]
    pub channel: String,

    /// Days of notice before the archive run
    #[arg(long, default_value_t = 3)]
    pub days: i64,
}

#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Names of channels to create (generated from the prefix when omitted)
    pub names: Vec<String>,

    /// Prefix for generated demo channel names
    #[arg(long, default_value = "sweep-demo")]
    pub prefix: String,

    /// Number of demo channels to generate when no names are given
    #[arg(long, default_value_t = 3)]
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_args_parse() {
        let cli = Cli::try_parse_from([
            "slack-sweep",
            "--token",
            "xoxp-test",
            "--dry-run",
            "csv",
            "--archive-list",
            "archive.csv",
            "--master-list",
            "master.csv",
        ])
        .unwrap();

        assert!(cli.dry_run);
        match cli.command {
            Commands::Csv(args) => {
                assert_eq!(args.archive_list, PathBuf::from("archive.csv"));
                assert_eq!(args.batch_size, 50);
                assert!(!args.yes);
            }
            _ => panic!("expected csv subcommand"),
        }
    }

    #[test]
    fn test_batch_args_accept_tokens() {
        let cli = Cli::try_parse_from([
            "slack-sweep",
            "batch",
            "C0123456789:old-project",
            "C0123456790:stale-standup",
        ])
        .unwrap();

        match cli.command {
            Commands::Batch(args) => assert_eq!(args.entries.len(), 2),
            _ => panic!("expected batch subcommand"),
        }
    }

    #[test]
    fn test_export_cutoff_parses_as_date() {
        let cli = Cli::try_parse_from([
            "slack-sweep",
            "export",
            "export.csv",
            "--cutoff",
            "2025-08-01",
        ])
        .unwrap();

        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.cutoff, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
                assert_eq!(args.max_members, 4);
            }
            _ => panic!("expected export subcommand"),
        }
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        assert!(Cli::try_parse_from(["slack-sweep", "frobnicate"]).is_err());
    }
}

use crate::config::Config;
use crate::core::archiver::{AutoProceed, BatchGate, BatchResult, InteractiveGate};
use crate::core::slack::{SlackApi, SlackClient};
use crate::utils::Result;
use std::path::Path;

/// Builds the API client and, for live runs, verifies the token up front so
/// a bad token fails before any channel is touched. Dry runs stay fully
/// offline.
pub fn connect(config: &Config) -> Result<SlackClient> {
    let client = SlackClient::new(&config.token)?;
    if !config.dry_run {
        let auth = client.auth_test()?;
        println!("Authenticated as {} in {}", auth.user, auth.team);
    }
    Ok(client)
}

pub fn gate_for(skip_prompts: bool) -> Box<dyn BatchGate> {
    if skip_prompts {
        Box::new(AutoProceed)
    } else {
        Box::new(InteractiveGate)
    }
}

pub fn print_summary(config: &Config, result: &BatchResult, log_path: &Path) {
    let mode = if config.dry_run { "Dry run" } else { "Archive run" };
    println!();
    println!(
        "{mode} complete: {} processed, {} succeeded, {} failed",
        result.total, result.success, result.failed
    );
    println!("Log file: {}", log_path.display());
}

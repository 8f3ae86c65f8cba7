use crate::cli::commands::common;
use crate::cli::parser::NotifyArgs;
use crate::config::Config;
use crate::core::csv::load_archive_list;
use crate::core::slack::SlackApi;
use crate::utils::{Result, SweepError};
use chrono::{Duration, Local};

/// Channels listed in the notice before it switches to "... and N more".
const NOTICE_LIMIT: usize = 50;

pub fn execute(config: Config, args: NotifyArgs) -> Result<()> {
    let names = load_archive_list(&args.archive_list)?;
    if names.is_empty() {
        return Err(SweepError::config_error(format!(
            "{} contains no channels",
            args.archive_list.display()
        )));
    }

    let message = notice_text(&names, args.days);

    if config.dry_run {
        println!("[dry run] would post to #{}:", args.channel);
        println!("{message}");
        return Ok(());
    }

    let client = common::connect(&config)?;
    let channel_id = client.find_channel_id(&args.channel)?.ok_or_else(|| {
        SweepError::config_error(format!("channel '{}' not found", args.channel))
    })?;

    let ts = client.post_message(&channel_id, &message)?;
    println!("Notice posted to #{} (ts {ts})", args.channel);
    Ok(())
}

fn notice_text(names: &[String], days: i64) -> String {
    let archive_date = (Local::now() + Duration::days(days)).format("%B %d, %Y");
    let opt_out_date = (Local::now() + Duration::days(days - 1)).format("%B %d");

    let mut message = format!(
        "SLACK WORKSPACE CLEANUP - {days} DAY NOTICE\n\n\
         The following {} channels will be archived on {archive_date}.\n\n\
         Channels scheduled for archival:\n",
        names.len()
    );

    for (i, name) in names.iter().take(NOTICE_LIMIT).enumerate() {
        message.push_str(&format!("{}. #{name}\n", i + 1));
    }
    if names.len() > NOTICE_LIMIT {
        message.push_str(&format!(
            "\n... and {} more channels\n",
            names.len() - NOTICE_LIMIT
        ));
    }

    message.push_str(&format!(
        "\nTO OPT-OUT:\nContact ITOps with the channel name by {opt_out_date}\n\n\
         Note: Channels will be archived (not deleted). All content remains \
         accessible and can be unarchived if needed.\n"
    ));

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_lists_channels_up_to_limit() {
        let names: Vec<String> = (0..60).map(|i| format!("chan-{i}")).collect();
        let text = notice_text(&names, 3);

        assert!(text.starts_with("SLACK WORKSPACE CLEANUP - 3 DAY NOTICE"));
        assert!(text.contains("The following 60 channels"));
        assert!(text.contains("50. #chan-49"));
        assert!(!text.contains("#chan-50\n"));
        assert!(text.contains("... and 10 more channels"));
    }

    #[test]
    fn test_short_notice_has_no_overflow_line() {
        let names = vec!["old-project".to_string()];
        let text = notice_text(&names, 3);
        assert!(text.contains("1. #old-project"));
        assert!(!text.contains("more channels"));
    }
}

pub mod defaults;

use crate::utils::{Result, SweepError};
use std::path::PathBuf;

/// Run-wide settings resolved from flags and environment variables before
/// any API call is made. A missing token is a fatal precondition, never a
/// per-item failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub dry_run: bool,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn new(token: Option<String>, dry_run: bool, log_dir: PathBuf) -> Result<Self> {
        let token = token.unwrap_or_default();
        if token.trim().is_empty() {
            return Err(SweepError::config_error(
                "no Slack token provided (set SLACK_TOKEN or pass --token)",
            ));
        }
        Ok(Self {
            token,
            dry_run,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_fatal() {
        let err = Config::new(None, false, PathBuf::from(".")).unwrap_err();
        assert!(matches!(err, SweepError::Config { .. }));

        let err = Config::new(Some("   ".to_string()), false, PathBuf::from(".")).unwrap_err();
        assert!(matches!(err, SweepError::Config { .. }));
    }

    #[test]
    fn test_valid_config() {
        let config = Config::new(
            Some("xoxp-test".to_string()),
            true,
            PathBuf::from("/tmp/logs"),
        )
        .unwrap();
        assert!(config.dry_run);
        assert_eq!(config.token, "xoxp-test");
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid arguments: {message}")]
    InvalidArgs { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("CSV error in {path} line {line}: {message}")]
    Csv {
        path: String,
        line: usize,
        message: String,
    },

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Slack API error: {code}")]
    Api { code: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SweepError>;

impl SweepError {
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs {
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn csv_error(
        path: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Csv {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn auth_failed(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn api(code: impl Into<String>) -> Self {
        Self::Api { code: code.into() }
    }

    /// The Slack error code, if this is an API-level error.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code } => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation_helpers() {
        let config_err = SweepError::config_error("no token");
        assert!(matches!(config_err, SweepError::Config { .. }));
        assert_eq!(config_err.to_string(), "Configuration error: no token");

        let api_err = SweepError::api("missing_scope");
        assert!(matches!(api_err, SweepError::Api { .. }));
        assert_eq!(api_err.to_string(), "Slack API error: missing_scope");

        let csv_err = SweepError::csv_error("channels.csv", 3, "missing name column");
        assert_eq!(
            csv_err.to_string(),
            "CSV error in channels.csv line 3: missing name column"
        );
    }

    #[test]
    fn test_api_code_accessor() {
        assert_eq!(
            SweepError::api("already_archived").api_code(),
            Some("already_archived")
        );
        assert_eq!(SweepError::config_error("x").api_code(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let sweep_err: SweepError = io_err.into();
        assert!(matches!(sweep_err, SweepError::Io(_)));
    }
}

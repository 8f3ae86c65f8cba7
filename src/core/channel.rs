use crate::utils::{Result, SweepError};

/// One channel scheduled for archiving. Constructed fresh each run from the
/// hardcoded batch, CSV join, or export filter; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEntry {
    pub id: String,
    pub name: String,
}

impl ChannelEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let name = name.into();
        if !is_channel_id(&id) {
            return Err(SweepError::invalid_args(format!(
                "'{id}' is not a Slack channel ID (expected C… or G…)"
            )));
        }
        if name.is_empty() {
            return Err(SweepError::invalid_args(format!(
                "channel {id} has an empty name"
            )));
        }
        Ok(Self { id, name })
    }

    /// Parses a combined `ID:NAME` token from the hardcoded batch list.
    pub fn parse_token(token: &str) -> Result<Self> {
        let (id, name) = token.split_once(':').ok_or_else(|| {
            SweepError::invalid_args(format!("'{token}' is not an ID:NAME token"))
        })?;
        Self::new(id, name)
    }
}

/// Slack channel IDs start with `C` (public) or `G` (legacy private group)
/// followed by uppercase alphanumerics.
pub fn is_channel_id(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some('C') | Some('G') => {}
        _ => return false,
    }
    let rest = chars.as_str();
    !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_id_shape() {
        assert!(is_channel_id("C0123456789"));
        assert!(is_channel_id("G04QXJH2B9F"));
        assert!(!is_channel_id(""));
        assert!(!is_channel_id("C"));
        assert!(!is_channel_id("D0123456789")); // DM, not a channel
        assert!(!is_channel_id("c0123456789"));
        assert!(!is_channel_id("C0123-45678"));
        assert!(!is_channel_id("old-project"));
    }

    #[test]
    fn test_parse_token() {
        let entry = ChannelEntry::parse_token("C0123456789:old-project").unwrap();
        assert_eq!(entry.id, "C0123456789");
        assert_eq!(entry.name, "old-project");

        // Channel names may themselves contain separators after the first.
        let entry = ChannelEntry::parse_token("C0123456789:a:b").unwrap();
        assert_eq!(entry.name, "a:b");
    }

    #[test]
    fn test_parse_token_failures() {
        assert!(ChannelEntry::parse_token("no-separator").is_err());
        assert!(ChannelEntry::parse_token(":missing-id").is_err());
        assert!(ChannelEntry::parse_token("C0123456789:").is_err());
        assert!(ChannelEntry::parse_token("bad-id:name").is_err());
    }
}

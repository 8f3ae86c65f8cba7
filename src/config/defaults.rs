use std::time::Duration;

/// Entries per confirmation-gated batch.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Fixed delay between Slack API calls (Tier 2 rate limits).
pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(500);

/// Per-request timeout for the Slack Web API.
pub const API_TIMEOUT: Duration = Duration::from_secs(10);

/// Channels that must never be archived by the export filter, regardless of
/// activity or member count.
pub const PROTECTED_CHANNELS: &[&str] = &[
    "general",
    "random",
    "announcements",
    "compliance",
    "team-tech",
    "fetch",
    "collective-leads",
    "team-marketing",
    "team-devops",
];

/// Member-count ceiling for export-mode archive candidacy.
pub const DEFAULT_MAX_MEMBERS: u32 = 4;

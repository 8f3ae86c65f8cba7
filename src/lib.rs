pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

pub use config::Config;
pub use core::archiver::{Archiver, AutoProceed, BatchGate, BatchResult, GateDecision, Outcome};
pub use core::channel::ChannelEntry;
pub use core::slack::{SlackApi, SlackClient};
pub use utils::{Result, RunLog, SweepError};

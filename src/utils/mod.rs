pub mod error;
pub mod log;

pub use error::{Result, SweepError};
pub use log::RunLog;

pub mod batch;
pub mod common;
pub mod csv;
pub mod export;
pub mod notify;
pub mod setup;

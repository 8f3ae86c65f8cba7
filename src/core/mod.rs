pub mod archiver;
pub mod channel;
pub mod csv;
pub mod slack;

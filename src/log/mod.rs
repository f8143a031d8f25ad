//! Log grouping for the schedule/iteration log.

pub mod key;
pub mod parse;

pub use key::ConfigurationKey;
pub use parse::parse_log_file;

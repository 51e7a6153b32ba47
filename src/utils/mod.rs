//! Shared utilities.
//!
//! - [`date`]: `DateTimeUtc`, timestamps for listings and feeds
//! - [`exec`]: external command builder
//! - [`path`]: path normalization
//! - [`plural`]: count formatting for log lines

pub mod date;
pub mod exec;
pub mod path;
pub mod plural;

pub use plural::plural_count;

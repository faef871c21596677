//! Profile classification for data-request rows
//!
//! This module derives the three STASH profiles a request needs from the
//! loosely structured request metadata:
//! - [`domain`] - spatial domain profile from the dimension string
//! - [`time_usage`] - time and usage profiles from frequency and cell method
//! - [`priority`] - package/priority merge of the two priority sources
//!
//! Every derivation is a pure, total function: unrecognised input resolves
//! to an `UNKNOWN`/`unknown` sentinel rather than an error, and downstream
//! consumers treat those sentinels as "needs manual review".

pub mod domain;
pub mod priority;
pub mod time_usage;

#[cfg(test)]
pub mod tests;

pub use domain::derive_domain;
pub use priority::merge_priority;
pub use time_usage::derive_time_usage;

//! Attribute synchronization
//!
//! [`Synchronizer`] converges the ignore attribute of individual directories;
//! [`Runner`] drives a whole run from a [`SyncConfig`](crate::config::SyncConfig).

pub mod runner;
pub mod synchronizer;

pub use runner::{find_ignored, run, validate_root, IgnoredListing, Runner};
pub use synchronizer::{SyncOutcome, Synchronizer};

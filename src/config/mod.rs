//! Configuration for dropbignore runs
//!
//! [`SyncConfig`] carries the explicit parameters of a single run.
//! [`GlobalConfig`] is the optional user file at
//! `~/.config/dropbignore/config.toml` that supplies defaults for them.

pub mod global_config;
pub mod sync_config;

// Re-export commonly used items
pub use global_config::{ConfigOverrides, GlobalConfig};
pub use sync_config::{SyncConfig, DEFAULT_BUILTIN_PATTERNS, IGNORE_FILE_NAME};

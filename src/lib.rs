//! dropbignore - mark Dropbox folders as ignored from a pattern file
//!
//! Dropbox skips any directory carrying the `com.dropbox.ignored` extended
//! attribute. This crate reads a `.dropbignore` file written in a reduced
//! .gitignore syntax, walks the synchronized folder and converges the
//! attribute so that exactly the matching directories carry it.
//!
//! # Components
//!
//! - **Parser** ([`ignore::parser`]): ignore-file text to an ordered [`PatternSet`]
//! - **Matcher** ([`ignore::checker`]): last-match-wins verdict for a relative path
//! - **Walker** ([`ignore::scanner`]): sorted pre-order traversal that prunes ignored subtrees
//! - **Synchronizer** ([`sync`]): reads, sets and clears the attribute, reporting every change
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use dropbignore::{run, SyncConfig, XattrStore};
//!
//! let config = SyncConfig::new("/Users/me/Dropbox");
//! let report = run(&config, &XattrStore::new())?;
//!
//! println!("{} set, {} cleared", report.set, report.cleared);
//! for (path, reason) in report.failures() {
//!     eprintln!("{}: {}", path.display(), reason);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod attr;
pub mod cli;
pub mod config;
pub mod core;
pub mod ignore;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{
    error::{DropbignoreError, Result},
    types::{ChangeKind, ChangeRecord, DirectoryNode, SyncReport, TraversalError},
};

pub use attr::{AttributeStore, MemoryStore, XattrStore, IGNORE_ATTRIBUTE, IGNORE_VALUE};

pub use config::{GlobalConfig, SyncConfig};

pub use ignore::{parser::parse, parser::PatternSet, scanner::DirectoryWalker};

pub use sync::{find_ignored, run, Runner, Synchronizer};

/// Current version of dropbignore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

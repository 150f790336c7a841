//! Core types and error handling shared by the matcher, walker and synchronizer.

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{DropbignoreError, Result};
pub use types::{ChangeKind, ChangeRecord, DirectoryNode, SyncReport, TraversalError};

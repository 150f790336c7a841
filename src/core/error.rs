//! Error types for dropbignore

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a run before any directory is touched.
///
/// Everything that can go wrong on a single directory (unreadable listing,
/// attribute I/O) is aggregated into the [`SyncReport`](crate::core::types::SyncReport)
/// instead of surfacing here.
#[derive(Error, Debug)]
pub enum DropbignoreError {
    /// Configuration errors
    #[error("Root directory not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Root path is not a directory: {path}")]
    RootNotDirectory { path: PathBuf },

    #[error("Root directory is not accessible: {path}: {source}")]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read ignore file {path}: {source}")]
    IgnoreFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DropbignoreError {
    /// Create a new root not found error
    pub fn root_not_found(path: PathBuf) -> Self {
        Self::RootNotFound { path }
    }

    /// Create a new root not a directory error
    pub fn root_not_directory(path: PathBuf) -> Self {
        Self::RootNotDirectory { path }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }

    /// Whether this error comes from the run's setup (root, ignore file,
    /// configuration) rather than from I/O
    pub fn is_config_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }

    /// Whether this error stems from a bad root path
    pub fn is_root_error(&self) -> bool {
        matches!(
            self,
            Self::RootNotFound { .. } | Self::RootNotDirectory { .. } | Self::RootInaccessible { .. }
        )
    }
}

/// Result type alias for dropbignore operations
pub type Result<T> = std::result::Result<T, DropbignoreError>;

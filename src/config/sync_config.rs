//! Parameters of a single synchronization run

use crate::core::error::Result;
use crate::ignore::parser::PatternSet;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Ignore file name looked up in the synchronized folder
pub const IGNORE_FILE_NAME: &str = ".dropbignore";

/// Patterns applied on every run in addition to the user's own
pub const DEFAULT_BUILTIN_PATTERNS: &[&str] = &[".dropbox.cache/"];

/// Everything a run needs, resolved up front
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncConfig {
    /// Synchronized folder; the traversal root
    pub root: PathBuf,
    /// Ignore file to read patterns from
    pub ignore_file: PathBuf,
    /// Patterns appended after the ignore file's entries
    pub builtin_patterns: Vec<String>,
    /// Read attributes but never write them
    pub dry_run: bool,
    /// Synchronize attributes on the rayon pool after the walk
    pub parallel: bool,
    /// Maximum depth below the root (None = unlimited)
    pub max_depth: Option<usize>,
}

impl SyncConfig {
    /// Defaults for a root: `<root>/.dropbignore` and the built-in patterns
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            ignore_file: root.join(IGNORE_FILE_NAME),
            root,
            builtin_patterns: DEFAULT_BUILTIN_PATTERNS.iter().map(|p| p.to_string()).collect(),
            dry_run: false,
            parallel: false,
            max_depth: None,
        }
    }

    pub fn with_ignore_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignore_file = path.into();
        self
    }

    pub fn with_builtin_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builtin_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the ignore file and append the built-in patterns
    pub fn load_patterns(&self) -> Result<PatternSet> {
        Ok(PatternSet::from_file(&self.ignore_file)?.with_patterns(&self.builtin_patterns))
    }
}

//! Directory walker with ignore-pattern pruning
//!
//! Produces directories depth-first, pre-order, sorted by name at each level.
//! A matched directory is yielded but never descended into, and symbolic links
//! are never followed. Unreadable directories are reported as
//! [`TraversalError`] items and the walk carries on with their siblings.

use crate::core::types::{DirectoryNode, TraversalError};
use crate::ignore::checker::IgnoreChecker;
use crate::ignore::parser::PatternSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use walkdir::WalkDir;

/// Item produced by a [`Walk`]
pub type WalkItem = std::result::Result<DirectoryNode, TraversalError>;

/// Walks the candidate directories below a root
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    /// Traversal root; never yielded itself
    root: PathBuf,
    /// Verdicts over the shared pattern set
    checker: IgnoreChecker,
    /// Maximum depth below the root (None = unlimited)
    max_depth: Option<usize>,
}

impl DirectoryWalker {
    pub fn new(root: &Path, patterns: Arc<PatternSet>) -> Self {
        Self {
            root: root.to_path_buf(),
            checker: IgnoreChecker::new(patterns),
            max_depth: None,
        }
    }

    /// Set maximum depth for directory traversal
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn patterns(&self) -> &PatternSet {
        self.checker.patterns()
    }

    /// Start a fresh traversal
    pub fn walk(&self) -> Walk<'_> {
        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        Walk {
            walker: self,
            inner: walker.into_iter(),
            pruned: false,
        }
    }

    fn node_for(&self, path: &Path) -> DirectoryNode {
        let relative = path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();
        let matched_by = self.checker.ignored_by(&relative).map(str::to_string);

        DirectoryNode {
            absolute_path: path.to_path_buf(),
            relative_path: relative,
            is_matched: matched_by.is_some(),
            matched_by,
        }
    }
}

/// Lazy traversal over the directories of a [`DirectoryWalker`]
pub struct Walk<'a> {
    walker: &'a DirectoryWalker,
    inner: walkdir::IntoIter,
    /// Last yielded item has no pending children to skip
    pruned: bool,
}

impl Walk<'_> {
    /// Do not descend into the directory most recently yielded
    ///
    /// A no-op for matched directories and errors, which are never descended into.
    pub fn skip_subtree(&mut self) {
        if !self.pruned {
            self.inner.skip_current_dir();
            self.pruned = true;
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = WalkItem;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    // Symlinks report their own type here, so links to
                    // directories are skipped along with regular files
                    if !entry.file_type().is_dir() {
                        continue;
                    }

                    let node = self.walker.node_for(entry.path());
                    if node.is_matched {
                        self.inner.skip_current_dir();
                    }
                    self.pruned = node.is_matched;
                    return Some(Ok(node));
                },
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.walker.root.clone());
                    let reason = match e.io_error() {
                        Some(io) => io.to_string(),
                        None => e.to_string(),
                    };
                    warn!("Skipping unreadable directory {}: {}", path.display(), reason);
                    self.pruned = true;
                    return Some(Err(TraversalError::new(path, reason)));
                },
            }
        }
    }
}

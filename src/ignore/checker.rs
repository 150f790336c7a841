//! Pattern matching against relative directory paths
//!
//! The matcher is a pure function over a read-only [`PatternSet`], so one set
//! can be shared across threads and queried concurrently.

use crate::ignore::parser::{PatternEntry, PatternSet};
use std::path::{Component, Path};
use std::sync::Arc;

/// Decide whether a relative path is ignored by the pattern set
pub fn matches<S: AsRef<str>>(path_segments: &[S], is_directory: bool, patterns: &PatternSet) -> bool {
    last_match(path_segments, is_directory, patterns).is_some()
}

/// Return the entry deciding the verdict for a path, if any
///
/// Every entry is evaluated in order and the last matching one wins.
pub fn last_match<'a, S: AsRef<str>>(
    path_segments: &[S],
    is_directory: bool,
    patterns: &'a PatternSet,
) -> Option<&'a PatternEntry> {
    let mut verdict = None;

    for entry in patterns {
        if entry_matches(entry, path_segments, is_directory) {
            verdict = Some(entry);
        }
    }

    verdict
}

/// Check a single entry against a path
pub fn entry_matches<S: AsRef<str>>(entry: &PatternEntry, path_segments: &[S], is_directory: bool) -> bool {
    if entry.directory_only && !is_directory {
        return false;
    }

    let pattern_len = entry.segments.len();
    if pattern_len == 0 || pattern_len > path_segments.len() {
        return false;
    }

    if entry.anchored {
        // Anchored patterns name exactly this path, starting at the root
        return pattern_len == path_segments.len() && aligned(entry, path_segments);
    }

    if pattern_len == 1 {
        // Basename-style pattern: any component at any depth
        let segment = &entry.segments[0];
        return path_segments.iter().any(|c| segment.matches(c.as_ref()));
    }

    aligned(entry, &path_segments[path_segments.len() - pattern_len..])
}

fn aligned<S: AsRef<str>>(entry: &PatternEntry, window: &[S]) -> bool {
    entry
        .segments
        .iter()
        .zip(window)
        .all(|(segment, component)| segment.matches(component.as_ref()))
}

/// Split a relative path into the segments the matcher expects
pub fn path_segments(relative: &Path) -> Vec<String> {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Directory verdicts over a shared, read-only pattern set
#[derive(Debug, Clone, Default)]
pub struct IgnoreChecker {
    patterns: Arc<PatternSet>,
}

impl IgnoreChecker {
    pub fn new(patterns: Arc<PatternSet>) -> Self {
        Self { patterns }
    }

    /// Check a root-relative directory path
    pub fn is_ignored_dir(&self, relative: &Path) -> bool {
        matches(&path_segments(relative), true, &self.patterns)
    }

    /// Pattern text responsible for ignoring a directory
    pub fn ignored_by(&self, relative: &Path) -> Option<&str> {
        last_match(&path_segments(relative), true, &self.patterns).map(|e| e.raw.as_str())
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }
}

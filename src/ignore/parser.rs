//! .dropbignore file parser
//!
//! Turns ignore-file text into an ordered [`PatternSet`]. Parsing is total:
//! a line that cannot be compiled as a glob degrades to a literal segment
//! instead of failing the whole file.

use crate::core::error::{DropbignoreError, Result};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Options used for every wildcard segment comparison
const SEGMENT_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One `/`-separated component of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Compared byte-for-byte against a path component
    Literal(String),
    /// Glob compared against a single path component (never crosses `/`)
    Wildcard(Pattern),
}

impl Segment {
    /// Classify a raw segment; only segments containing `*` are globs
    pub fn parse(text: &str) -> Self {
        if !text.contains('*') {
            return Segment::Literal(text.to_string());
        }

        match Pattern::new(text) {
            Ok(pattern) => Segment::Wildcard(pattern),
            Err(e) => {
                warn!("Invalid wildcard segment {:?} ({}), matching it literally", text, e);
                Segment::Literal(text.to_string())
            },
        }
    }

    /// Check a single path component against this segment
    pub fn matches(&self, component: &str) -> bool {
        match self {
            Segment::Literal(literal) => literal == component,
            Segment::Wildcard(pattern) => pattern.matches_with(component, SEGMENT_MATCH_OPTIONS),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Segment::Literal(literal) => literal,
            Segment::Wildcard(pattern) => pattern.as_str(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard(_))
    }
}

/// A parsed pattern line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    /// The line as written (trailing whitespace removed)
    pub raw: String,
    /// Non-empty path segments, root-most first
    pub segments: Vec<Segment>,
    /// Trailing `/`: only directories can match
    pub directory_only: bool,
    /// Leading `/`: only matches starting at the traversal root
    pub anchored: bool,
}

impl PatternEntry {
    /// Parse one line, returning `None` for blank and comment lines
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end();
        let content = line.trim_start();
        if content.is_empty() || content.starts_with('#') {
            return None;
        }

        let (anchored, body) = match line.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, line),
        };

        let directory_only = body.ends_with('/');
        let body = body.trim_end_matches('/');

        let segments: Vec<Segment> = body
            .split('/')
            .filter(|s| !s.is_empty())
            .map(Segment::parse)
            .collect();

        if segments.is_empty() {
            warn!("Pattern {:?} names no path segments and will never match", line);
        }

        Some(Self {
            raw: line.to_string(),
            segments,
            directory_only,
            anchored,
        })
    }

    /// An entry without segments can never match anything
    pub fn is_inert(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Ordered pattern list; later entries take precedence over earlier ones
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    entries: Vec<PatternEntry>,
}

/// Parse raw ignore-file contents into a pattern set
pub fn parse(text: &str) -> PatternSet {
    PatternSet {
        entries: text.lines().filter_map(PatternEntry::parse).collect(),
    }
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load patterns from an ignore file; a missing file yields an empty set
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Ignore file does not exist: {}", path.display());
                return Ok(Self::new());
            },
            Err(source) => {
                return Err(DropbignoreError::IgnoreFileUnreadable {
                    path: path.to_path_buf(),
                    source,
                })
            },
        };

        let set = parse(&String::from_utf8_lossy(&bytes));
        if set.is_empty() {
            warn!("No valid patterns in ignore file: {}", path.display());
        }
        for entry in set.iter() {
            debug!("[ignore pattern] {}", entry.raw);
        }

        Ok(set)
    }

    /// Append patterns (e.g. the built-in ones) after the existing entries
    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entries
            .extend(lines.into_iter().filter_map(|l| PatternEntry::parse(l.as_ref())));
    }

    pub fn with_patterns<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(lines);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatternEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a PatternEntry;
    type IntoIter = std::slice::Iter<'a, PatternEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//! Data types produced by a synchronization run

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A directory visited by the walker, together with the matcher's verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Absolute (root-joined) path of the directory
    pub absolute_path: PathBuf,
    /// Path relative to the traversal root
    pub relative_path: PathBuf,
    /// Whether the pattern set marks this directory as ignored
    pub is_matched: bool,
    /// Raw text of the pattern that decided the verdict, if any
    pub matched_by: Option<String>,
}

impl DirectoryNode {
    /// Depth below the traversal root (direct children are depth 1)
    pub fn depth(&self) -> usize {
        self.relative_path.components().count()
    }
}

/// What happened to a directory's ignore attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    /// The attribute was added
    Set,
    /// The attribute was removed
    Clear,
    /// Reading or writing the attribute failed
    Failed { reason: String },
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Set => write!(f, "SET"),
            ChangeKind::Clear => write!(f, "CLEAR"),
            ChangeKind::Failed { .. } => write!(f, "FAILED"),
        }
    }
}

/// One attribute mutation attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    #[serde(flatten)]
    pub kind: ChangeKind,
}

impl ChangeRecord {
    pub fn new(node: &DirectoryNode, kind: ChangeKind) -> Self {
        Self {
            path: node.absolute_path.clone(),
            relative_path: node.relative_path.clone(),
            kind,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.kind, ChangeKind::Failed { .. })
    }
}

/// A directory whose entries could not be read during the walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalError {
    pub path: PathBuf,
    pub reason: String,
}

impl TraversalError {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TraversalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

impl std::error::Error for TraversalError {}

/// Summary of one run, partial failures included
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    /// Traversal root the run was performed against
    pub root: PathBuf,
    /// Whether attribute writes were suppressed
    pub dry_run: bool,
    /// Directories visited (the root itself is never counted)
    pub scanned: usize,
    /// Attributes added
    pub set: usize,
    /// Attributes removed
    pub cleared: usize,
    /// Attribute reads or writes that failed
    pub failed: usize,
    /// Matched directories that already carried the attribute
    pub already_ignored: usize,
    /// Whether the run stopped early on an interrupt request
    pub interrupted: bool,
    /// Every change attempt, sorted by path once the run is finished
    pub records: Vec<ChangeRecord>,
    /// Subtrees that could not be read
    pub traversal_errors: Vec<TraversalError>,
}

impl SyncReport {
    pub fn new(root: &Path, dry_run: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            dry_run,
            ..Self::default()
        }
    }

    /// Append a change record and update the counters
    pub fn push(&mut self, record: ChangeRecord) {
        match record.kind {
            ChangeKind::Set => self.set += 1,
            ChangeKind::Clear => self.cleared += 1,
            ChangeKind::Failed { .. } => self.failed += 1,
        }
        self.records.push(record);
    }

    pub fn push_traversal_error(&mut self, error: TraversalError) {
        self.traversal_errors.push(error);
    }

    /// Sort records and traversal errors by path
    pub fn finalize(&mut self) {
        self.records.sort_by(|a, b| a.path.cmp(&b.path));
        self.traversal_errors.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Number of changes actually applied (or, in dry-run mode, planned)
    pub fn changes(&self) -> usize {
        self.set + self.cleared
    }

    /// Every failure of the run with its path and cause
    pub fn failures(&self) -> Vec<(&Path, &str)> {
        let attribute_failures = self.records.iter().filter_map(|r| match &r.kind {
            ChangeKind::Failed { reason } => Some((r.path.as_path(), reason.as_str())),
            _ => None,
        });
        let traversal_failures = self
            .traversal_errors
            .iter()
            .map(|e| (e.path.as_path(), e.reason.as_str()));

        attribute_failures.chain(traversal_failures).collect()
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0 || !self.traversal_errors.is_empty()
    }

    /// Records of a given kind, in report order
    pub fn records_of<'a>(&'a self, kind: &'a ChangeKind) -> impl Iterator<Item = &'a ChangeRecord> {
        self.records
            .iter()
            .filter(move |r| std::mem::discriminant(&r.kind) == std::mem::discriminant(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(rel: &str) -> DirectoryNode {
        DirectoryNode {
            absolute_path: PathBuf::from("/sync").join(rel),
            relative_path: PathBuf::from(rel),
            is_matched: true,
            matched_by: None,
        }
    }

    #[test]
    fn test_report_counters() {
        let mut report = SyncReport::new(Path::new("/sync"), false);
        report.push(ChangeRecord::new(&node("b"), ChangeKind::Set));
        report.push(ChangeRecord::new(&node("a"), ChangeKind::Clear));
        report.push(ChangeRecord::new(
            &node("c"),
            ChangeKind::Failed {
                reason: "Operation not supported".to_string(),
            },
        ));
        report.push_traversal_error(TraversalError::new("/sync/d", "Permission denied"));
        report.finalize();

        assert_eq!(report.set, 1);
        assert_eq!(report.cleared, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.changes(), 2);
        assert!(report.has_failures());
        assert_eq!(report.records[0].relative_path, PathBuf::from("a"));

        let failures = report.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].0, Path::new("/sync/c"));
        assert_eq!(failures[1].1, "Permission denied");
    }

    #[test]
    fn test_change_record_json_shape() -> serde_json::Result<()> {
        let record = ChangeRecord::new(
            &node("src/build"),
            ChangeKind::Failed {
                reason: "denied".to_string(),
            },
        );
        let json = serde_json::to_value(&record)?;

        assert_eq!(json["kind"], "FAILED");
        assert_eq!(json["reason"], "denied");
        assert_eq!(json["relative_path"], "src/build");

        let set = serde_json::to_value(ChangeRecord::new(&node("x"), ChangeKind::Set))?;
        assert_eq!(set["kind"], "SET");

        Ok(())
    }

    #[test]
    fn test_node_depth() {
        assert_eq!(node("a").depth(), 1);
        assert_eq!(node("a/b/c").depth(), 3);
    }
}

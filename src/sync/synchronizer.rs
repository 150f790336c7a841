//! Converges on-disk ignore attributes to the matcher's verdicts

use crate::attr::{AttributeStore, IGNORE_ATTRIBUTE, IGNORE_VALUE};
use crate::core::types::{ChangeKind, ChangeRecord, DirectoryNode};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Result of synchronizing a single directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Attribute written, removed, or the attempt failed
    Changed(ChangeRecord),
    /// Matched and already carrying the attribute
    AlreadyIgnored,
    /// Not matched and not carrying the attribute
    Untouched,
}

impl SyncOutcome {
    pub fn into_record(self) -> Option<ChangeRecord> {
        match self {
            SyncOutcome::Changed(record) => Some(record),
            _ => None,
        }
    }
}

/// Applies SET/CLEAR decisions through an [`AttributeStore`]
#[derive(Debug)]
pub struct Synchronizer<S> {
    store: S,
    dry_run: bool,
}

impl<S: AttributeStore> Synchronizer<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            dry_run: false,
        }
    }

    /// Read attributes but never write them
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Synchronize nodes in order, returning one record per change attempt
    pub fn synchronize<'a, I>(&self, nodes: I) -> Vec<ChangeRecord>
    where
        I: IntoIterator<Item = &'a DirectoryNode>,
    {
        nodes
            .into_iter()
            .filter_map(|node| self.sync_node(node).into_record())
            .collect()
    }

    /// Synchronize nodes on the rayon pool; records come back sorted by path
    pub fn synchronize_parallel(&self, nodes: &[DirectoryNode]) -> Vec<SyncOutcome> {
        let mut outcomes: Vec<(usize, SyncOutcome)> = nodes
            .par_iter()
            .enumerate()
            .map(|(index, node)| (index, self.sync_node(node)))
            .collect();

        outcomes.sort_by(|(a, _), (b, _)| nodes[*a].absolute_path.cmp(&nodes[*b].absolute_path));
        outcomes.into_iter().map(|(_, outcome)| outcome).collect()
    }

    /// Read the current attribute and write only when it disagrees with the verdict
    pub fn sync_node(&self, node: &DirectoryNode) -> SyncOutcome {
        let path = &node.absolute_path;

        let present = match self.store.get(path, IGNORE_ATTRIBUTE) {
            Ok(value) => value.is_some(),
            Err(e) => {
                warn!("[read failed] {}: {}", path.display(), e);
                return SyncOutcome::Changed(ChangeRecord::new(
                    node,
                    ChangeKind::Failed {
                        reason: format!("read attribute: {}", e),
                    },
                ));
            },
        };

        let (kind, result) = match (node.is_matched, present) {
            (true, true) => {
                debug!("[skip ignored] {}", path.display());
                return SyncOutcome::AlreadyIgnored;
            },
            (false, false) => return SyncOutcome::Untouched,
            (true, false) => {
                info!("[set ignore] {}", path.display());
                let result = if self.dry_run {
                    Ok(())
                } else {
                    self.store.set(path, IGNORE_ATTRIBUTE, IGNORE_VALUE)
                };
                (ChangeKind::Set, result.map_err(|e| format!("set attribute: {}", e)))
            },
            (false, true) => {
                info!("[unset ignore] {}", path.display());
                let result = if self.dry_run {
                    Ok(())
                } else {
                    self.store.remove(path, IGNORE_ATTRIBUTE)
                };
                (ChangeKind::Clear, result.map_err(|e| format!("remove attribute: {}", e)))
            },
        };

        match result {
            Ok(()) => SyncOutcome::Changed(ChangeRecord::new(node, kind)),
            Err(reason) => {
                warn!("[{} failed] {}: {}", kind, path.display(), reason);
                SyncOutcome::Changed(ChangeRecord::new(node, ChangeKind::Failed { reason }))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn node(rel: &str, is_matched: bool) -> DirectoryNode {
        DirectoryNode {
            absolute_path: PathBuf::from("/sync").join(rel),
            relative_path: PathBuf::from(rel),
            is_matched,
            matched_by: None,
        }
    }

    #[test]
    fn test_set_clear_and_noop() {
        let store = MemoryStore::new().with_ignored("/sync/stale");
        let sync = Synchronizer::new(&store);

        let nodes = vec![
            node("fresh", true),
            node("stale", false),
            node("plain", false),
        ];
        let records = sync.synchronize(&nodes);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, ChangeKind::Set);
        assert_eq!(records[0].relative_path, PathBuf::from("fresh"));
        assert_eq!(records[1].kind, ChangeKind::Clear);
        assert_eq!(store.ignored_paths(), vec![PathBuf::from("/sync/fresh")]);
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let store = MemoryStore::new().with_ignored("/sync/old");
        let sync = Synchronizer::new(&store);
        let nodes = vec![node("a", true), node("b", false), node("old", false)];

        assert_eq!(sync.synchronize(&nodes).len(), 2);
        let writes = store.write_count();

        assert!(sync.synchronize(&nodes).is_empty());
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn test_already_ignored_outcome() {
        let store = MemoryStore::new().with_ignored("/sync/done");
        let sync = Synchronizer::new(&store);

        assert_eq!(sync.sync_node(&node("done", true)), SyncOutcome::AlreadyIgnored);
        assert_eq!(sync.sync_node(&node("other", false)), SyncOutcome::Untouched);
    }

    #[test]
    fn test_failures_are_recorded_and_processing_continues() {
        let store = MemoryStore::new();
        store.fail_on("/sync/locked");
        let sync = Synchronizer::new(&store);

        let nodes = vec![node("locked", true), node("open", true)];
        let records = sync.synchronize(&nodes);

        assert_eq!(records.len(), 2);
        assert!(records[0].is_failure());
        match &records[0].kind {
            ChangeKind::Failed { reason } => assert!(reason.contains("permission denied")),
            other => panic!("unexpected kind {:?}", other),
        }
        assert_eq!(records[1].kind, ChangeKind::Set);
    }

    #[test]
    fn test_dry_run_never_writes() {
        let store = MemoryStore::new().with_ignored("/sync/stale");
        let sync = Synchronizer::new(&store).dry_run(true);

        let records = sync.synchronize(&[node("new", true), node("stale", false)]);

        assert_eq!(records.len(), 2);
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.ignored_paths(), vec![PathBuf::from("/sync/stale")]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let nodes: Vec<_> = (0..64)
            .rev()
            .map(|i| node(&format!("dir{:02}", i), i % 3 == 0))
            .collect();

        let sequential_store = MemoryStore::new();
        let mut expected = Synchronizer::new(&sequential_store).synchronize(&nodes);
        expected.sort_by(|a, b| a.path.cmp(&b.path));

        let parallel_store = MemoryStore::new();
        let actual: Vec<_> = Synchronizer::new(&parallel_store)
            .synchronize_parallel(&nodes)
            .into_iter()
            .filter_map(SyncOutcome::into_record)
            .collect();

        assert_eq!(actual, expected);
        assert_eq!(parallel_store.ignored_paths(), sequential_store.ignored_paths());
    }
}

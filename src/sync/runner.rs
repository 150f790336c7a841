//! Entry point tying patterns, walker and synchronizer together

use crate::attr::AttributeStore;
use crate::config::SyncConfig;
use crate::core::error::{DropbignoreError, Result};
use crate::core::types::{DirectoryNode, SyncReport, TraversalError};
use crate::ignore::parser::PatternSet;
use crate::ignore::scanner::DirectoryWalker;
use crate::sync::synchronizer::{SyncOutcome, Synchronizer};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

type ProgressCallback<'a> = Box<dyn Fn(&DirectoryNode) + Send + Sync + 'a>;

/// Run a full synchronization with default options
pub fn run(config: &SyncConfig, store: &dyn AttributeStore) -> Result<SyncReport> {
    Runner::new(config, store).run()
}

/// Fail unless `root` exists and is a directory
///
/// Every failure is a root error, including a root below a regular file.
pub fn validate_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(DropbignoreError::root_not_directory(root.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(DropbignoreError::root_not_found(root.to_path_buf()))
        },
        Err(source) => Err(DropbignoreError::RootInaccessible {
            path: root.to_path_buf(),
            source,
        }),
    }
}

/// One configured synchronization run
pub struct Runner<'a> {
    config: &'a SyncConfig,
    store: &'a dyn AttributeStore,
    interrupt: Option<Arc<AtomicBool>>,
    progress: Option<ProgressCallback<'a>>,
}

impl<'a> Runner<'a> {
    pub fn new(config: &'a SyncConfig, store: &'a dyn AttributeStore) -> Self {
        Self {
            config,
            store,
            interrupt: None,
            progress: None,
        }
    }

    /// Stop cleanly at the next node boundary once `flag` is raised
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Called for every visited directory
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&DirectoryNode) + Send + Sync + 'a,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn run(&self) -> Result<SyncReport> {
        let root = self.config.root();
        validate_root(root)?;

        let walker = self.walker(Arc::new(self.config.load_patterns()?));
        debug!(
            "Loaded {} patterns from {}",
            walker.patterns().len(),
            self.config.ignore_file.display()
        );

        let synchronizer = Synchronizer::new(self.store).dry_run(self.config.dry_run);
        let mut report = SyncReport::new(root, self.config.dry_run);
        let mut pending = Vec::new();

        for item in walker.walk() {
            if self.is_interrupted() {
                report.interrupted = true;
                break;
            }

            match item {
                Ok(node) => {
                    report.scanned += 1;
                    self.report_progress(&node);

                    if self.config.parallel {
                        pending.push(node);
                    } else {
                        record_outcome(&mut report, synchronizer.sync_node(&node));
                    }
                },
                Err(error) => report.push_traversal_error(error),
            }
        }

        if !report.interrupted {
            for outcome in synchronizer.synchronize_parallel(&pending) {
                record_outcome(&mut report, outcome);
            }
        }

        report.finalize();
        info!(
            "Scanned {} directories: {} set, {} cleared, {} failed, {} already ignored",
            report.scanned, report.set, report.cleared, report.failed, report.already_ignored
        );

        Ok(report)
    }

    fn walker(&self, patterns: Arc<PatternSet>) -> DirectoryWalker {
        let walker = DirectoryWalker::new(self.config.root(), patterns);
        match self.config.max_depth {
            Some(depth) => walker.max_depth(depth),
            None => walker,
        }
    }

    fn is_interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .map(|flag| flag.load(Ordering::SeqCst))
            .unwrap_or(false)
    }

    fn report_progress(&self, node: &DirectoryNode) {
        if let Some(callback) = &self.progress {
            callback(node);
        }
    }
}

fn record_outcome(report: &mut SyncReport, outcome: SyncOutcome) {
    match outcome {
        SyncOutcome::Changed(record) => report.push(record),
        SyncOutcome::AlreadyIgnored => report.already_ignored += 1,
        SyncOutcome::Untouched => {},
    }
}

/// Directories currently carrying the ignore attribute
#[derive(Debug, Clone, Default, Serialize)]
pub struct IgnoredListing {
    pub root: PathBuf,
    pub ignored: Vec<PathBuf>,
    pub errors: Vec<TraversalError>,
}

/// Find every marked directory below `root` without descending into marked ones
pub fn find_ignored(root: &Path, store: &dyn AttributeStore) -> Result<IgnoredListing> {
    validate_root(root)?;

    let walker = DirectoryWalker::new(root, Arc::new(PatternSet::new()));
    let mut listing = IgnoredListing {
        root: walker.root().to_path_buf(),
        ..IgnoredListing::default()
    };

    let mut walk = walker.walk();
    while let Some(item) = walk.next() {
        let node = match item {
            Ok(node) => node,
            Err(error) => {
                listing.errors.push(error);
                continue;
            },
        };

        match store.is_ignored(&node.absolute_path) {
            Ok(true) => {
                walk.skip_subtree();
                listing.ignored.push(node.absolute_path);
            },
            Ok(false) => {},
            Err(e) => listing
                .errors
                .push(TraversalError::new(node.absolute_path, format!("read attribute: {}", e))),
        }
    }

    Ok(listing)
}

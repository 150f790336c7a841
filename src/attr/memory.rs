//! In-memory attribute store

use crate::attr::{AttributeStore, IGNORE_ATTRIBUTE, IGNORE_VALUE};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Attribute store backed by a map, with write counting and failure injection
#[derive(Debug, Default)]
pub struct MemoryStore {
    attributes: Mutex<HashMap<(PathBuf, String), Vec<u8>>>,
    failing: Mutex<HashSet<PathBuf>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-mark a path with the ignore attribute without counting a write
    pub fn with_ignored(self, path: impl Into<PathBuf>) -> Self {
        self.attributes
            .lock()
            .insert((path.into(), IGNORE_ATTRIBUTE.to_string()), IGNORE_VALUE.to_vec());
        self
    }

    /// Make every operation on `path` fail with permission denied
    pub fn fail_on(&self, path: impl Into<PathBuf>) {
        self.failing.lock().insert(path.into());
    }

    /// Number of successful `set`/`remove` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Paths currently carrying the ignore attribute, sorted
    pub fn ignored_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self
            .attributes
            .lock()
            .keys()
            .filter(|(_, name)| name == IGNORE_ATTRIBUTE)
            .map(|(path, _)| path.clone())
            .collect();
        paths.sort();
        paths
    }

    fn check(&self, path: &Path) -> io::Result<()> {
        if self.failing.lock().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        Ok(())
    }
}

impl AttributeStore for MemoryStore {
    fn get(&self, path: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
        self.check(path)?;
        Ok(self
            .attributes
            .lock()
            .get(&(path.to_path_buf(), name.to_string()))
            .cloned())
    }

    fn set(&self, path: &Path, name: &str, value: &[u8]) -> io::Result<()> {
        self.check(path)?;
        self.attributes
            .lock()
            .insert((path.to_path_buf(), name.to_string()), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, path: &Path, name: &str) -> io::Result<()> {
        self.check(path)?;
        let removed = self
            .attributes
            .lock()
            .remove(&(path.to_path_buf(), name.to_string()));
        if removed.is_none() {
            // Mirrors ENODATA/ENOATTR from removexattr
            return Err(io::Error::new(io::ErrorKind::NotFound, "attribute not found"));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

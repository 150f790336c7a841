//! Extended-attribute access behind a capability interface
//!
//! The synchronizer only talks to [`AttributeStore`]; [`XattrStore`] is the
//! filesystem-backed implementation and [`MemoryStore`] keeps attributes in
//! memory for dry experiments and tests.

pub mod memory;
pub mod xattr_store;

pub use memory::MemoryStore;
pub use xattr_store::XattrStore;

use std::io;
use std::path::Path;

/// Attribute the Dropbox client checks to exclude a directory from sync
pub const IGNORE_ATTRIBUTE: &str = "com.dropbox.ignored";

/// Value written to mark a directory as ignored
pub const IGNORE_VALUE: &[u8] = b"1";

/// Read/write access to per-path extended attributes
///
/// Implementations must not follow symbolic links.
pub trait AttributeStore: Send + Sync {
    /// Read an attribute, `None` when it is absent
    fn get(&self, path: &Path, name: &str) -> io::Result<Option<Vec<u8>>>;

    /// Create or replace an attribute
    fn set(&self, path: &Path, name: &str, value: &[u8]) -> io::Result<()>;

    /// Delete an attribute
    fn remove(&self, path: &Path, name: &str) -> io::Result<()>;

    /// Whether the ignore attribute is present on `path`
    fn is_ignored(&self, path: &Path) -> io::Result<bool> {
        Ok(self.get(path, IGNORE_ATTRIBUTE)?.is_some())
    }
}

impl<T: AttributeStore + ?Sized> AttributeStore for &T {
    fn get(&self, path: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).get(path, name)
    }

    fn set(&self, path: &Path, name: &str, value: &[u8]) -> io::Result<()> {
        (**self).set(path, name, value)
    }

    fn remove(&self, path: &Path, name: &str) -> io::Result<()> {
        (**self).remove(path, name)
    }
}

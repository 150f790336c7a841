//! Filesystem extended attributes via the `xattr` crate

use crate::attr::AttributeStore;
use std::io;
use std::path::Path;

/// Reads and writes real extended attributes without dereferencing symlinks
#[derive(Debug, Clone, Copy, Default)]
pub struct XattrStore;

impl XattrStore {
    pub fn new() -> Self {
        Self
    }

    /// Whether this platform has extended attribute support at all
    pub fn is_supported() -> bool {
        cfg!(unix) && platform::SUPPORTED
    }
}

impl AttributeStore for XattrStore {
    fn get(&self, path: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
        platform::get(path, name)
    }

    fn set(&self, path: &Path, name: &str, value: &[u8]) -> io::Result<()> {
        platform::set(path, name, value)
    }

    fn remove(&self, path: &Path, name: &str) -> io::Result<()> {
        platform::remove(path, name)
    }
}

#[cfg(unix)]
mod platform {
    use std::io;
    use std::path::Path;

    pub const SUPPORTED: bool = xattr::SUPPORTED_PLATFORM;

    pub fn get(path: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
        xattr::get(path, name)
    }

    pub fn set(path: &Path, name: &str, value: &[u8]) -> io::Result<()> {
        xattr::set(path, name, value)
    }

    pub fn remove(path: &Path, name: &str) -> io::Result<()> {
        xattr::remove(path, name)
    }
}

#[cfg(not(unix))]
mod platform {
    use std::io;
    use std::path::Path;

    pub const SUPPORTED: bool = false;

    fn unsupported() -> io::Error {
        io::Error::new(
            io::ErrorKind::Unsupported,
            "extended attributes are not supported on this platform",
        )
    }

    pub fn get(_path: &Path, _name: &str) -> io::Result<Option<Vec<u8>>> {
        Err(unsupported())
    }

    pub fn set(_path: &Path, _name: &str, _value: &[u8]) -> io::Result<()> {
        Err(unsupported())
    }

    pub fn remove(_path: &Path, _name: &str) -> io::Result<()> {
        Err(unsupported())
    }
}

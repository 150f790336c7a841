//! Ignore-pattern engine for .dropbignore files
//!
//! Patterns use a reduced .gitignore syntax: `#` comments, trailing `/` for
//! directory-only entries, leading `/` to anchor at the root, and `*` as a
//! wildcard confined to one path segment. Negation (`!`) is not supported and
//! is matched literally.

pub mod checker;
pub mod parser;
pub mod scanner;

// Re-export commonly used items
pub use checker::{matches, IgnoreChecker};
pub use parser::{parse, PatternEntry, PatternSet, Segment};
pub use scanner::{DirectoryWalker, Walk};

//! Error types for tree persistence

#[cfg(feature = "std")]
use std::path::PathBuf;

/// Errors that can occur while persisting or restoring an [`AvlTree`](crate::AvlTree)
///
/// Duplicate inserts, removals of absent keys and lookups on an empty tree are
/// ordinary outcomes and never produce an error.
#[derive(Debug, thiserror::Error)]
pub enum AvlError {
    /// The file could not be opened, read or written
    #[cfg(feature = "std")]
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        /// Path of the file involved
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },
    /// The encoding ended in the middle of a tag or key
    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEof {
        /// Byte offset at which more data was expected
        offset: usize,
    },
    /// A tag byte was neither the empty nor the present marker
    #[error("invalid subtree tag {tag:#04x} at byte {offset}")]
    InvalidTag {
        /// The offending tag value
        tag: u8,
        /// Byte offset of the tag
        offset: usize,
    },
    /// Data remained after the root subtree was fully decoded
    #[error("trailing data after encoded tree at byte {offset}")]
    TrailingBytes {
        /// Byte offset of the first unconsumed byte
        offset: usize,
    },
}

/// Result type for tree persistence operations
pub type Result<T> = core::result::Result<T, AvlError>;

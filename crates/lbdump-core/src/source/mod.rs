//! Byte-source access.
//!
//! File I/O is confined to this module; every layer above works against a
//! [`Cursor`] over any `Read + Seek` source, which keeps the decoders
//! testable from in-memory buffers.

mod cursor;

pub use cursor::Cursor;

use std::fs::File;
use std::path::Path;

use thiserror::Error;

/// Errors raised by byte-source access.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A read or skip ran past the end of the source.
    #[error("input truncated: need {needed} bytes at offset {offset}, {available} remain")]
    Truncated {
        needed: u64,
        offset: u64,
        available: u64,
    },
    /// An absolute seek target lies outside the source.
    #[error("offset {target:#X} is outside the source ({len} bytes)")]
    OutOfBounds { target: u64, len: u64 },
}

/// Open a file read-only and wrap it in a [`Cursor`].
pub fn open(path: &Path) -> Result<Cursor<File>, SourceError> {
    let file = File::open(path)?;
    Cursor::new(file)
}

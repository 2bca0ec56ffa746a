//! Error types for index construction, persistence and extraction.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias using the crate-level [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for seekgzip operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to open a data or index file.
    #[error("{}: {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to read from a data or index file.
    #[error("read failed: {source}")]
    Read {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write the index file.
    #[error("write failed: {source}")]
    Write {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Compressed stream is corrupted or truncated.
    #[error("compressed data is corrupt or truncated")]
    Data,

    /// Underlying zlib allocation failure.
    #[error("zlib memory allocation failed")]
    OutOfMemory,

    /// Index file magic, version, or layout does not match what this crate writes.
    #[error("index file is not a compatible seekgzip index")]
    Incompatible,

    /// Underlying zlib returned a code this crate does not specifically classify.
    #[error("zlib error (code {0})")]
    Zlib(i32),

    /// Index mtime does not match the source file's mtime; internal-only,
    /// triggers a rebuild and should never escape `Session::open`.
    #[error("index is stale relative to its source file")]
    ExpiredIndex,

    /// Catch-all for conditions not covered above.
    #[error("{0}")]
    Unknown(String),
}

/// Coarse classification of the last error observed by a [`crate::Session`],
/// cheap to copy out repeatedly (the session-facing analogue of the data
/// file's `seekgzip_error` query).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No error has occurred yet.
    Success,
    /// See [`Error::Unknown`].
    Unknown,
    /// See [`Error::Open`].
    Open,
    /// See [`Error::Read`].
    Read,
    /// See [`Error::Write`].
    Write,
    /// See [`Error::Data`].
    Data,
    /// See [`Error::OutOfMemory`].
    OutOfMemory,
    /// See [`Error::Incompatible`].
    Incompatible,
    /// See [`Error::Zlib`].
    Zlib,
    /// See [`Error::ExpiredIndex`].
    ExpiredIndex,
}

impl From<&Error> for ErrorKind {
    fn from(err: &Error) -> Self {
        match err {
            Error::Unknown(_) => ErrorKind::Unknown,
            Error::Open { .. } => ErrorKind::Open,
            Error::Read { .. } => ErrorKind::Read,
            Error::Write { .. } => ErrorKind::Write,
            Error::Data => ErrorKind::Data,
            Error::OutOfMemory => ErrorKind::OutOfMemory,
            Error::Incompatible => ErrorKind::Incompatible,
            Error::Zlib(_) => ErrorKind::Zlib,
            Error::ExpiredIndex => ErrorKind::ExpiredIndex,
        }
    }
}

impl From<io::Error> for Error {
    fn from(source: io::Error) -> Self {
        Error::Read { source }
    }
}

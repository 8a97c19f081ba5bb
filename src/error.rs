//! Error types for extraction and traversal.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from extracting metadata for a single path.
///
/// Both variants are recoverable at the traversal level: the walker skips
/// the entry (or leaves the ownership fields absent) and continues.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The path vanished or became unreadable between listing and stat.
    #[error("path unavailable: {path}: {source}")]
    PathUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Owner/group lookup was denied or is unsupported for this path.
    #[error("ownership unavailable for {path}")]
    OwnershipUnavailable { path: PathBuf },
}

/// Fatal errors for a whole search call.
///
/// When one of these is returned, no partial results were delivered.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The root path does not exist or cannot be listed.
    #[error("root unavailable: {path}: {source}")]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration cannot be executed, e.g. the root is not a directory.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The caller raised the cancellation flag mid-walk.
    #[error("search cancelled")]
    Cancelled,

    /// A sink failed while consuming emitted records.
    #[error("output error: {0}")]
    Sink(#[from] io::Error),
}

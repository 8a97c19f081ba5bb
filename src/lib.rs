//! fscout - walk a directory tree and classify every file and folder
//!
//! Two components: the metadata extractor ([`metadata::extract`]) turns a
//! single path into an immutable [`PathRecord`] (type, sizes, timestamps,
//! ownership, MIME guess, age); the traversal engine ([`SearchWalker`])
//! walks a root, rolls folder sizes up from direct child files, applies
//! include/exclude match criteria, and emits a flat ordered record
//! sequence, buffered or streamed through a [`RecordSink`].

pub mod error;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod record;
pub mod report;
pub mod search;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{ExtractError, SearchError};
pub use record::{PathKind, PathRecord};
pub use search::{
    CollectSink, MatchCriteria, RecordSink, SearchConfig, SearchOutcome, SearchWalker, WalkStats,
};

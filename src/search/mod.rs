//! The traversal engine.
//!
//! Walks a root directory top-down, invokes the metadata extractor on every
//! folder and file, rolls folder sizes up from direct children only, applies
//! the include/exclude match criteria, and emits a flat ordered record
//! sequence. Two consumption modes:
//!
//! - [`SearchWalker::execute`]: buffers everything into a [`SearchOutcome`]
//! - [`SearchWalker::execute_streaming`]: delivers records through a
//!   [`RecordSink`] as the walk progresses, O(depth) buffering

mod config;
mod matcher;
mod streaming;
mod walker;

pub use config::SearchConfig;
pub use matcher::MatchCriteria;
pub use streaming::{CollectSink, RecordSink};
pub use walker::{SearchOutcome, SearchWalker, WalkStats};

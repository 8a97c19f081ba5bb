//! Configuration for a search run.

use std::path::PathBuf;

/// Configuration for one traversal.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Starting directory.
    pub root_path: PathBuf,
    /// Descend into subdirectories. When false, only the root directory and
    /// its direct children are visited.
    pub recursive: bool,
    /// Emit every visited record regardless of match outcome.
    pub return_all: bool,
    /// Case-insensitive substrings; a path is "clean" when none occurs in it.
    pub exclude: Vec<String>,
    /// Case-insensitive substrings; a path "hits" when any occurs in it.
    pub include: Vec<String>,
    /// Worker threads for record extraction.
    /// 0 = auto-detect (all available cores)
    /// 1 = sequential (no parallelism)
    /// N = use N worker threads
    pub parallel_workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            recursive: true,
            return_all: false,
            exclude: Vec::new(),
            include: Vec::new(),
            parallel_workers: 1,
        }
    }
}

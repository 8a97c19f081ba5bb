//! Sequential depth-first walk with one-level folder rollups.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::SearchError;
use crate::metadata;
use crate::record::PathRecord;

use super::config::SearchConfig;
use super::matcher::MatchCriteria;
use super::streaming::{CollectSink, RecordSink};

/// Counters for one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Folder records extracted.
    pub folders: usize,
    /// File records extracted.
    pub files: usize,
    /// Entries skipped because they vanished or became unreadable mid-walk.
    pub skipped: usize,
}

/// Buffered result of [`SearchWalker::execute`].
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub records: Vec<PathRecord>,
    pub stats: WalkStats,
}

/// Walks a directory tree, extracting one record per folder and file,
/// rolling folder sizes up from direct child files only, and filtering by
/// the configured match criteria.
///
/// Every call builds fresh traversal state; a walker can be reused across
/// runs and shares nothing between them.
pub struct SearchWalker {
    pub(super) config: SearchConfig,
    pub(super) criteria: MatchCriteria,
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchWalker {
    pub fn new(config: SearchConfig) -> Self {
        let criteria = MatchCriteria::new(&config.exclude, &config.include);
        Self {
            config,
            criteria,
            cancel: None,
        }
    }

    /// Install a cancellation flag. The walk checks it between
    /// directory-level steps and aborts with [`SearchError::Cancelled`]
    /// once it is raised.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub(super) fn check_cancelled(&self) -> Result<(), SearchError> {
        let cancelled = self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        if cancelled {
            Err(SearchError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Run the search and buffer every emitted record.
    pub fn execute(&self) -> Result<SearchOutcome, SearchError> {
        let mut sink = CollectSink::default();
        let stats = self.execute_streaming(&mut sink)?;
        Ok(SearchOutcome {
            records: sink.into_records(),
            stats,
        })
    }

    /// Run the search, delivering records through `sink` in walk order:
    /// each folder record first, then that folder's direct files, then the
    /// child subdirectories (when recursive).
    ///
    /// Root-level failures are fatal and return before anything is emitted;
    /// per-path failures are skipped, counted, and logged.
    pub fn execute_streaming<S: RecordSink>(&self, sink: &mut S) -> Result<WalkStats, SearchError> {
        let root = self.config.root_path.as_path();
        let meta = fs::metadata(root).map_err(|source| SearchError::RootUnavailable {
            path: root.to_path_buf(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(SearchError::InvalidConfiguration(format!(
                "root path is not a directory: {}",
                root.display()
            )));
        }

        let mut stats = WalkStats::default();
        if self.config.parallel_workers == 1 {
            self.walk_dir(root, true, sink, &mut stats)?;
        } else {
            self.walk_parallel(sink, &mut stats)?;
        }
        sink.finish(&stats)?;
        Ok(stats)
    }

    fn walk_dir<S: RecordSink>(
        &self,
        dir: &Path,
        is_root: bool,
        sink: &mut S,
        stats: &mut WalkStats,
    ) -> Result<(), SearchError> {
        self.check_cancelled()?;

        let (child_files, child_dirs) = match list_children(dir) {
            Ok(split) => split,
            Err(source) if is_root => {
                return Err(SearchError::RootUnavailable {
                    path: dir.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                log::warn!("skipping unreadable directory {}: {err}", dir.display());
                stats.skipped += 1;
                return Ok(());
            }
        };

        self.emit_folder(dir, &child_files, sink, stats)?;
        for file in &child_files {
            self.emit_file(file, sink, stats)?;
        }

        if self.config.recursive {
            for sub in &child_dirs {
                self.walk_dir(sub, false, sink, stats)?;
            }
        }
        Ok(())
    }

    fn emit_folder<S: RecordSink>(
        &self,
        dir: &Path,
        child_files: &[PathBuf],
        sink: &mut S,
        stats: &mut WalkStats,
    ) -> Result<(), SearchError> {
        let record = match metadata::extract(dir) {
            Ok(record) => record,
            Err(err) => {
                log::warn!("skipping folder record: {err}");
                stats.skipped += 1;
                return Ok(());
            }
        };
        stats.folders += 1;

        // One-level rollup: direct child files only, never deeper
        // descendants. Accumulated locally and sealed into the record
        // before emission.
        let (count, bytes) = rollup(child_files);
        let record = record.with_folder_totals(count, bytes);
        let matched = self.criteria.evaluate(&record.full_path);
        self.emit(record.with_match(matched), matched, sink)
    }

    fn emit_file<S: RecordSink>(
        &self,
        path: &Path,
        sink: &mut S,
        stats: &mut WalkStats,
    ) -> Result<(), SearchError> {
        let mut record = match metadata::extract(path) {
            Ok(record) => record,
            Err(err) => {
                log::warn!("skipping file record: {err}");
                stats.skipped += 1;
                return Ok(());
            }
        };
        stats.files += 1;

        // An emitted file record counts itself.
        record.file_count = 1;
        let matched = self.criteria.evaluate(&record.full_path);
        self.emit(record.with_match(matched), matched, sink)
    }

    pub(super) fn emit<S: RecordSink>(
        &self,
        record: PathRecord,
        matched: bool,
        sink: &mut S,
    ) -> Result<(), SearchError> {
        if self.config.return_all || matched {
            sink.record(record)?;
        }
        Ok(())
    }
}

/// List a directory's direct children, sorted by name and split into files
/// and subdirectories. Symlinks are skipped to avoid traversal cycles.
pub(super) fn list_children(dir: &Path) -> io::Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.filter_map(|e| e.ok()).collect();
    entries.sort_by_key(|e| e.file_name());

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry.path();
        if path.is_symlink() {
            continue;
        }
        if path.is_file() {
            files.push(path);
        } else if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok((files, dirs))
}

/// Sum sizes of a folder's direct child files. A child that cannot be
/// stat'ed is left out here; its own record extraction fails later and is
/// counted as skipped there.
pub(super) fn rollup(child_files: &[PathBuf]) -> (u64, u64) {
    let mut count = 0;
    let mut bytes = 0;
    for file in child_files {
        if let Ok(meta) = fs::metadata(file) {
            count += 1;
            bytes += meta.len();
        }
    }
    (count, bytes)
}

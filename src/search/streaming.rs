//! Streaming record delivery and the parallel extraction path.

use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{ExtractError, SearchError};
use crate::metadata;
use crate::record::PathRecord;

use super::walker::{SearchWalker, WalkStats, list_children, rollup};

/// Callback for streaming consumption of emitted records.
///
/// `record` receives every emitted record in walk order; `finish` is called
/// once with the final counters.
pub trait RecordSink {
    fn record(&mut self, record: PathRecord) -> io::Result<()>;
    fn finish(&mut self, stats: &WalkStats) -> io::Result<()>;
}

/// Sink that buffers every record; backs [`SearchWalker::execute`].
#[derive(Debug, Default)]
pub struct CollectSink {
    records: Vec<PathRecord>,
}

impl CollectSink {
    pub fn into_records(self) -> Vec<PathRecord> {
        self.records
    }
}

impl RecordSink for CollectSink {
    fn record(&mut self, record: PathRecord) -> io::Result<()> {
        self.records.push(record);
        Ok(())
    }

    fn finish(&mut self, _stats: &WalkStats) -> io::Result<()> {
        Ok(())
    }
}

/// Work item collected during the sequential listing phase.
///
/// Folder items carry their direct child files so the rollup runs inside
/// the parallel phase without a second directory listing.
enum WorkItem {
    Folder {
        path: PathBuf,
        child_files: Vec<PathBuf>,
    },
    File {
        path: PathBuf,
    },
}

type ExtractResult = Result<(PathRecord, bool), ExtractError>;

impl SearchWalker {
    /// Two-phase parallel walk: a sequential listing pass collects work
    /// items in emission order, then records are extracted in parallel and
    /// replayed in that same order. Aggregation and ordering match the
    /// sequential path exactly.
    pub(super) fn walk_parallel<S: RecordSink>(
        &self,
        sink: &mut S,
        stats: &mut WalkStats,
    ) -> Result<(), SearchError> {
        let root = self.config.root_path.clone();
        let mut items = Vec::new();
        self.collect_items(&root, true, &mut items, stats)?;

        for result in run_extraction(&items, self.config.parallel_workers) {
            match result {
                Ok((record, is_folder)) => {
                    if is_folder {
                        stats.folders += 1;
                    } else {
                        stats.files += 1;
                    }
                    let matched = self.criteria.evaluate(&record.full_path);
                    self.emit(record.with_match(matched), matched, sink)?;
                }
                Err(err) => {
                    log::warn!("skipping record: {err}");
                    stats.skipped += 1;
                }
            }
        }
        Ok(())
    }

    fn collect_items(
        &self,
        dir: &Path,
        is_root: bool,
        items: &mut Vec<WorkItem>,
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

        items.push(WorkItem::Folder {
            path: dir.to_path_buf(),
            child_files: child_files.clone(),
        });
        items.extend(child_files.into_iter().map(|path| WorkItem::File { path }));

        if self.config.recursive {
            for sub in &child_dirs {
                self.collect_items(sub, false, items, stats)?;
            }
        }
        Ok(())
    }
}

fn extract_item(item: &WorkItem) -> ExtractResult {
    match item {
        WorkItem::Folder { path, child_files } => {
            let record = metadata::extract(path)?;
            let (count, bytes) = rollup(child_files);
            Ok((record.with_folder_totals(count, bytes), true))
        }
        WorkItem::File { path } => {
            let mut record = metadata::extract(path)?;
            record.file_count = 1;
            Ok((record, false))
        }
    }
}

fn run_extraction(items: &[WorkItem], workers: usize) -> Vec<ExtractResult> {
    if workers == 0 {
        // Auto-detect: rayon's global pool sizes itself to the machine
        return items.par_iter().map(extract_item).collect();
    }
    match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(|| items.par_iter().map(extract_item).collect()),
        // fall back to the global pool if the custom pool cannot be built
        Err(_) => items.par_iter().map(extract_item).collect(),
    }
}

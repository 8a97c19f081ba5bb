//! The metadata record emitted for every visited path.

use chrono::{DateTime, Utc};
use serde::Serialize;

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;
const GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Whether a record describes a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathKind {
    File,
    Folder,
}

/// Immutable metadata snapshot for one filesystem entry at traversal time.
///
/// Fully computed at construction and never mutated after emission. Folder
/// size/count totals cover direct child files only (one level, never the
/// whole subtree) and are filled in through [`PathRecord::with_folder_totals`]
/// before the record is emitted. Serializes as one flat row per entry.
#[derive(Debug, Clone, Serialize)]
pub struct PathRecord {
    pub full_path: String,
    pub kind: PathKind,
    /// True iff the base name starts with `.`.
    pub is_hidden: bool,
    /// Exactly one of `folder_name`/`file_name` is set, matching `kind`.
    pub folder_name: Option<String>,
    pub file_name: Option<String>,
    /// Lowercased, without the leading dot; empty for folders and
    /// extensionless files.
    pub extension: String,
    /// Best-effort guess from the extension; `None` means "Not Available".
    pub mime_type: Option<String>,
    /// 0 at construction; 1 on emitted file records; the number of direct
    /// child files on folder records.
    pub file_count: u64,
    pub size_bytes: u64,
    pub size_kb: f64,
    pub size_mb: f64,
    pub size_gb: f64,
    /// Effective creation date: the earlier of the OS birth time (where
    /// available) and the modification time.
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub accessed_at: DateTime<Utc>,
    pub owner: Option<String>,
    pub group: Option<String>,
    /// Whole years since `created_at`, clamped to 0 for future-dated files.
    pub age_years: u32,
    /// `None` until match evaluation runs; always `Some` on emitted records.
    pub search_match: Option<bool>,
}

impl PathRecord {
    pub fn is_file(&self) -> bool {
        self.kind == PathKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind == PathKind::Folder
    }

    /// Finish a folder record with the totals accumulated over its direct
    /// child files. The unit views are derived from the byte total, not
    /// summed per child, so `size_kb` stays within rounding of
    /// `size_bytes / 1024`.
    pub fn with_folder_totals(mut self, file_count: u64, size_bytes: u64) -> Self {
        debug_assert!(self.is_folder());
        self.file_count = file_count;
        self.size_bytes = size_bytes;
        self.size_kb = bytes_to_kb(size_bytes);
        self.size_mb = bytes_to_mb(size_bytes);
        self.size_gb = bytes_to_gb(size_bytes);
        self
    }

    /// Attach the match evaluation outcome.
    pub fn with_match(mut self, matched: bool) -> Self {
        self.search_match = Some(matched);
        self
    }
}

/// Round to 3 decimal places, half away from zero.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

pub fn bytes_to_kb(bytes: u64) -> f64 {
    round3(bytes as f64 / KB)
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    round3(bytes as f64 / MB)
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    round3(bytes as f64 / GB)
}

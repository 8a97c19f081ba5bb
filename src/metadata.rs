//! Metadata extraction for a single filesystem path.
//!
//! [`extract`] is a pure function of the path plus current OS state: it
//! stats the path, classifies it, and builds a [`PathRecord`]. It never
//! mutates the filesystem and knows nothing about traversal or filtering.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::error::ExtractError;
use crate::record::{PathKind, PathRecord, bytes_to_gb, bytes_to_kb, bytes_to_mb};

/// Days per year including the Gregorian leap rule.
const DAYS_PER_YEAR: f64 = 365.2425;

/// Extract a full metadata record for `path`.
///
/// Stat failure (the path vanished or became unreadable between listing and
/// here) yields [`ExtractError::PathUnavailable`]. Ownership lookup failure
/// is non-fatal: the record is returned with `owner`/`group` absent and a
/// warning is logged.
pub fn extract(path: &Path) -> Result<PathRecord, ExtractError> {
    let meta = fs::metadata(path).map_err(|source| ExtractError::PathUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let kind = if meta.is_dir() {
        PathKind::Folder
    } else {
        PathKind::File
    };
    let name = base_name(path);
    let is_hidden = name.starts_with('.');

    let (folder_name, file_name) = match kind {
        PathKind::Folder => (Some(name), None),
        PathKind::File => (None, Some(name)),
    };

    let extension = match kind {
        PathKind::File => path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default(),
        PathKind::Folder => String::new(),
    };

    let mime_type = match kind {
        PathKind::File => mime_guess::from_path(path).first().map(|m| m.to_string()),
        PathKind::Folder => None,
    };

    // Folder sizes start at zero; the traversal engine rolls direct child
    // files up later.
    let size_bytes = match kind {
        PathKind::File => meta.len(),
        PathKind::Folder => 0,
    };

    let modified_at = meta
        .modified()
        .map(to_utc)
        .map_err(|source| ExtractError::PathUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
    let accessed_at = meta.accessed().map(to_utc).unwrap_or(modified_at);
    let created_at = effective_created(&meta, modified_at);

    let (owner, group) = match resolve_ownership(path, &meta) {
        Ok((owner, group)) => (Some(owner), Some(group)),
        Err(err) => {
            log::warn!("{err}");
            (None, None)
        }
    };

    Ok(PathRecord {
        full_path: path.to_string_lossy().into_owned(),
        kind,
        is_hidden,
        folder_name,
        file_name,
        extension,
        mime_type,
        file_count: 0,
        size_bytes,
        size_kb: bytes_to_kb(size_bytes),
        size_mb: bytes_to_mb(size_bytes),
        size_gb: bytes_to_gb(size_bytes),
        created_at,
        modified_at,
        accessed_at,
        owner,
        group,
        age_years: age_in_years(created_at, Utc::now()),
        search_match: None,
    })
}

/// The effective creation date: the earlier of the OS birth time and the
/// modification time. Where birth time is unsupported, the modification
/// time stands in.
fn effective_created(meta: &fs::Metadata, modified_at: DateTime<Utc>) -> DateTime<Utc> {
    match meta.created() {
        Ok(birth) => modified_at.min(to_utc(birth)),
        Err(_) => modified_at,
    }
}

/// Whole years between `created` and `now`, clamped to 0 for future dates.
pub fn age_in_years(created: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let days = (now.date_naive() - created.date_naive()).num_days();
    if days <= 0 {
        0
    } else {
        (days as f64 / DAYS_PER_YEAR) as u32
    }
}

/// Resolve the OS user and group names owning `path`.
#[cfg(unix)]
pub fn resolve_ownership(
    path: &Path,
    meta: &fs::Metadata,
) -> Result<(String, String), ExtractError> {
    use std::os::unix::fs::MetadataExt;

    let unavailable = || ExtractError::OwnershipUnavailable {
        path: path.to_path_buf(),
    };
    let user = uzers::get_user_by_uid(meta.uid()).ok_or_else(unavailable)?;
    let group = uzers::get_group_by_gid(meta.gid()).ok_or_else(unavailable)?;
    Ok((
        user.name().to_string_lossy().into_owned(),
        group.name().to_string_lossy().into_owned(),
    ))
}

/// Ownership names are not resolvable on this platform.
#[cfg(not(unix))]
pub fn resolve_ownership(
    path: &Path,
    _meta: &fs::Metadata,
) -> Result<(String, String), ExtractError> {
    Err(ExtractError::OwnershipUnavailable {
        path: path.to_path_buf(),
    })
}

fn to_utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

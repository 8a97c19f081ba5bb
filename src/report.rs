//! Bucket-by-threshold helpers for reporting consumers.
//!
//! These are the derived groupings export-side code builds on (size tiers,
//! age tiers); they are pure functions over record fields and not part of
//! the traversal contract.

use crate::record::PathRecord;

/// Size tier for pivot-style groupings, bucketed on the megabyte view.
pub fn size_tier(size_mb: f64) -> &'static str {
    if size_mb <= 0.0 {
        "Empty"
    } else if size_mb < 1.0 {
        "Tiny (under 1 MB)"
    } else if size_mb < 10.0 {
        "Small (1-10 MB)"
    } else if size_mb < 100.0 {
        "Medium (10-100 MB)"
    } else if size_mb < 1024.0 {
        "Large (100 MB-1 GB)"
    } else {
        "Huge (over 1 GB)"
    }
}

/// Age tier from whole years since the effective creation date.
pub fn age_tier(age_years: u32) -> &'static str {
    match age_years {
        0 => "Current (under 1 year)",
        1..=2 => "Recent (1-2 years)",
        3..=5 => "Aging (3-5 years)",
        6..=10 => "Old (6-10 years)",
        _ => "Ancient (over 10 years)",
    }
}

/// The most recently modified record, if any.
pub fn latest_modified(records: &[PathRecord]) -> Option<&PathRecord> {
    records.iter().max_by_key(|r| r.modified_at)
}

//! Snapshot timestamp codec.
//!
//! Timestamps are persisted as TEXT with second precision in a fixed-width
//! format, so lexicographic order equals chronological order and the
//! retention cutoff can be a plain string comparison.

use chrono::{DateTime, NaiveDateTime, Utc};

use shelflife_core::constants::{CUTOFF_DAY_FORMAT, SNAPSHOT_TS_FORMAT};
use shelflife_core::errors::{ShelfResult, StorageError};

/// Format a timestamp for persistence, truncating to whole seconds.
pub fn format_snapshot_ts(taken_at: DateTime<Utc>) -> String {
    taken_at.format(SNAPSHOT_TS_FORMAT).to_string()
}

/// Parse a persisted timestamp back into a `DateTime<Utc>`.
pub fn parse_snapshot_ts(raw: &str) -> ShelfResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, SNAPSHOT_TS_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            StorageError::Corruption {
                details: format!("unparseable snapshot timestamp '{raw}': {e}"),
            }
            .into()
        })
}

/// Format a retention cutoff at day granularity. The resulting string
/// sorts before every same-day snapshot timestamp, so snapshots taken on
/// the cutoff day survive.
pub fn format_cutoff_day(day: DateTime<Utc>) -> String {
    day.format(CUTOFF_DAY_FORMAT).to_string()
}

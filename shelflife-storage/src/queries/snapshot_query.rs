//! Read-side queries: timestamps, snapshot rows, summaries, history.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use shelflife_core::errors::ShelfResult;
use shelflife_core::models::{MetricKind, SeriesStats, SnapshotSummary};

use crate::storage_err;
use crate::timestamps::{format_snapshot_ts, parse_snapshot_ts};

use super::snapshot_crud::{row_to_series_stats, SERIES_COLUMNS};

/// Distinct snapshot timestamps for a namespace, newest first.
pub fn list_timestamps(conn: &Connection, namespace: &str) -> ShelfResult<Vec<DateTime<Utc>>> {
    let mut stmt = conn
        .prepare(
            "SELECT DISTINCT taken_at FROM snapshot_series
             WHERE namespace = ?1
             ORDER BY taken_at DESC",
        )
        .map_err(storage_err)?;
    let raw: Vec<String> = stmt
        .query_map(params![namespace], |row| row.get(0))
        .map_err(storage_err)?
        .collect::<Result<_, _>>()
        .map_err(storage_err)?;
    raw.iter().map(|s| parse_snapshot_ts(s)).collect()
}

/// Load one snapshot's rows, sorted by average episode size descending.
/// `None` when nothing is stored at that timestamp.
pub fn load_snapshot(
    conn: &Connection,
    namespace: &str,
    taken_at: DateTime<Utc>,
) -> ShelfResult<Option<Vec<SeriesStats>>> {
    let taken_at_str = format_snapshot_ts(taken_at);
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SERIES_COLUMNS} FROM snapshot_series
             WHERE namespace = ?1 AND taken_at = ?2
             ORDER BY avg_size_mb DESC"
        ))
        .map_err(storage_err)?;
    let rows: Vec<SeriesStats> = stmt
        .query_map(params![namespace, taken_at_str], row_to_series_stats)
        .map_err(storage_err)?
        .collect::<Result<_, _>>()
        .map_err(storage_err)?;
    if rows.is_empty() {
        return Ok(None);
    }
    Ok(Some(rows))
}

/// The summary row for one snapshot, if present.
pub fn get_summary(
    conn: &Connection,
    namespace: &str,
    taken_at: DateTime<Utc>,
) -> ShelfResult<Option<SnapshotSummary>> {
    let taken_at_str = format_snapshot_ts(taken_at);
    let mut stmt = conn
        .prepare(
            "SELECT total_series, total_episodes, total_size_gb, mean_avg_size_mb,
                    std_avg_size_mb, outlier_count, outlier_percentage
             FROM snapshot_summary
             WHERE namespace = ?1 AND taken_at = ?2",
        )
        .map_err(storage_err)?;
    let mut iter = stmt
        .query_map(params![namespace, taken_at_str], row_to_summary)
        .map_err(storage_err)?;
    match iter.next() {
        Some(summary) => Ok(Some(summary.map_err(storage_err)?)),
        None => Ok(None),
    }
}

/// Metric history for one series, or the metric summed across all series
/// when `series_id` is `None`. Oldest first.
pub fn time_series(
    conn: &Connection,
    namespace: &str,
    series_id: Option<i64>,
    metric: MetricKind,
) -> ShelfResult<Vec<(DateTime<Utc>, f64)>> {
    let column = metric.column();
    let raw: Vec<(String, f64)> = match series_id {
        Some(id) => {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT taken_at, {column} FROM snapshot_series
                     WHERE namespace = ?1 AND series_id = ?2
                     ORDER BY taken_at"
                ))
                .map_err(storage_err)?;
            let rows = stmt
                .query_map(params![namespace, id], |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })
                .map_err(storage_err)?
                .collect::<Result<_, _>>()
                .map_err(storage_err)?;
            rows
        }
        None => {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT taken_at, SUM({column}) FROM snapshot_series
                     WHERE namespace = ?1
                     GROUP BY taken_at
                     ORDER BY taken_at"
                ))
                .map_err(storage_err)?;
            let rows = stmt
                .query_map(params![namespace], |row| Ok((row.get(0)?, row.get(1)?)))
                .map_err(storage_err)?
                .collect::<Result<_, _>>()
                .map_err(storage_err)?;
            rows
        }
    };
    raw.into_iter()
        .map(|(ts, value)| Ok((parse_snapshot_ts(&ts)?, value)))
        .collect()
}

/// Every summary for the namespace, oldest first.
pub fn global_trends(
    conn: &Connection,
    namespace: &str,
) -> ShelfResult<Vec<(DateTime<Utc>, SnapshotSummary)>> {
    let mut stmt = conn
        .prepare(
            "SELECT taken_at, total_series, total_episodes, total_size_gb,
                    mean_avg_size_mb, std_avg_size_mb, outlier_count, outlier_percentage
             FROM snapshot_summary
             WHERE namespace = ?1
             ORDER BY taken_at",
        )
        .map_err(storage_err)?;
    let raw: Vec<(String, SnapshotSummary)> = stmt
        .query_map(params![namespace], |row| {
            Ok((
                row.get::<_, String>(0)?,
                SnapshotSummary {
                    total_series: row.get(1)?,
                    total_episodes: row.get::<_, i64>(2)? as u64,
                    total_size_gb: row.get(3)?,
                    mean_avg_size_mb: row.get(4)?,
                    std_avg_size_mb: row.get(5)?,
                    outlier_count: row.get(6)?,
                    outlier_percentage: row.get(7)?,
                },
            ))
        })
        .map_err(storage_err)?
        .collect::<Result<_, _>>()
        .map_err(storage_err)?;
    raw.into_iter()
        .map(|(ts, summary)| Ok((parse_snapshot_ts(&ts)?, summary)))
        .collect()
}

fn row_to_summary(row: &rusqlite::Row<'_>) -> rusqlite::Result<SnapshotSummary> {
    Ok(SnapshotSummary {
        total_series: row.get(0)?,
        total_episodes: row.get::<_, i64>(1)? as u64,
        total_size_gb: row.get(2)?,
        mean_avg_size_mb: row.get(3)?,
        std_avg_size_mb: row.get(4)?,
        outlier_count: row.get(5)?,
        outlier_percentage: row.get(6)?,
    })
}

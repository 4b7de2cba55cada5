//! Save and delete for snapshots.
//!
//! A snapshot is a set of series rows plus one derived summary row; the
//! two tables are only ever written together, inside one transaction.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use shelflife_core::errors::{ShelfError, ShelfResult};
use shelflife_core::models::{DetectionStats, SeriesStats, SnapshotSummary};

use crate::storage_err;
use crate::timestamps::format_snapshot_ts;

/// Whether anything is stored at (namespace, taken_at). Checks both
/// tables so an empty snapshot (summary only) still counts as present.
pub fn snapshot_exists(conn: &Connection, namespace: &str, taken_at_str: &str) -> ShelfResult<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT (SELECT COUNT(*) FROM snapshot_series
                      WHERE namespace = ?1 AND taken_at = ?2)
                  + (SELECT COUNT(*) FROM snapshot_summary
                      WHERE namespace = ?1 AND taken_at = ?2)",
            params![namespace, taken_at_str],
            |row| row.get(0),
        )
        .map_err(storage_err)?;
    Ok(count > 0)
}

/// Persist a snapshot. One `BEGIN IMMEDIATE` transaction covers the
/// existence check, the overwrite delete, the row inserts, and the summary
/// insert, so concurrent readers never observe a half-written snapshot.
/// Returns the number of series rows written.
pub fn save_snapshot(
    conn: &Connection,
    namespace: &str,
    taken_at: DateTime<Utc>,
    rows: &[SeriesStats],
    stats: &DetectionStats,
    overwrite: bool,
) -> ShelfResult<usize> {
    let taken_at_str = format_snapshot_ts(taken_at);

    conn.execute_batch("BEGIN IMMEDIATE").map_err(storage_err)?;

    match save_snapshot_inner(conn, namespace, &taken_at_str, rows, stats, overwrite) {
        Ok(count) => {
            conn.execute_batch("COMMIT").map_err(storage_err)?;
            Ok(count)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

fn save_snapshot_inner(
    conn: &Connection,
    namespace: &str,
    taken_at_str: &str,
    rows: &[SeriesStats],
    stats: &DetectionStats,
    overwrite: bool,
) -> ShelfResult<usize> {
    if snapshot_exists(conn, namespace, taken_at_str)? {
        if !overwrite {
            return Err(ShelfError::SnapshotConflict {
                timestamp: taken_at_str.to_string(),
            });
        }
        delete_rows_and_summary(conn, namespace, taken_at_str)?;
    }

    let mut stmt = conn
        .prepare(
            "INSERT INTO snapshot_series (
                namespace, taken_at, series_id, title, year, status,
                episode_count, total_size_gb, avg_size_mb, z_score, is_outlier
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .map_err(storage_err)?;
    for row in rows {
        stmt.execute(params![
            namespace,
            taken_at_str,
            row.series_id,
            row.title,
            row.year,
            row.status,
            row.episode_count,
            row.total_size_gb,
            row.avg_size_mb,
            row.z_score,
            row.is_outlier as i32,
        ])
        .map_err(storage_err)?;
    }
    drop(stmt);

    let summary = summary_from(rows, stats);
    conn.execute(
        "INSERT INTO snapshot_summary (
            namespace, taken_at, total_series, total_episodes, total_size_gb,
            mean_avg_size_mb, std_avg_size_mb, outlier_count, outlier_percentage
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            namespace,
            taken_at_str,
            summary.total_series,
            summary.total_episodes as i64,
            summary.total_size_gb,
            summary.mean_avg_size_mb,
            summary.std_avg_size_mb,
            summary.outlier_count,
            summary.outlier_percentage,
        ],
    )
    .map_err(storage_err)?;

    Ok(rows.len())
}

/// Recompute the summary from the rows being saved. Totals come from the
/// rows themselves, distribution fields from the detector stats; a
/// caller-supplied summary is never trusted.
pub fn summary_from(rows: &[SeriesStats], stats: &DetectionStats) -> SnapshotSummary {
    SnapshotSummary {
        total_series: rows.len() as u32,
        total_episodes: rows.iter().map(|r| u64::from(r.episode_count)).sum(),
        total_size_gb: rows.iter().map(|r| r.total_size_gb).sum(),
        mean_avg_size_mb: stats.mean_mb,
        std_avg_size_mb: stats.std_mb,
        outlier_count: stats.outlier_count,
        outlier_percentage: stats.outlier_percentage,
    }
}

/// Delete one snapshot's rows and summary. Returns the number of series
/// rows removed; the caller decides whether zero is an error.
pub fn delete_rows_and_summary(
    conn: &Connection,
    namespace: &str,
    taken_at_str: &str,
) -> ShelfResult<usize> {
    let rows = conn
        .execute(
            "DELETE FROM snapshot_series WHERE namespace = ?1 AND taken_at = ?2",
            params![namespace, taken_at_str],
        )
        .map_err(storage_err)?;
    conn.execute(
        "DELETE FROM snapshot_summary WHERE namespace = ?1 AND taken_at = ?2",
        params![namespace, taken_at_str],
    )
    .map_err(storage_err)?;
    Ok(rows)
}

/// Delete one snapshot inside a transaction. `SnapshotNotFound` when
/// neither rows nor a summary matched.
pub fn delete_snapshot(
    conn: &Connection,
    namespace: &str,
    taken_at: DateTime<Utc>,
) -> ShelfResult<usize> {
    let taken_at_str = format_snapshot_ts(taken_at);

    conn.execute_batch("BEGIN IMMEDIATE").map_err(storage_err)?;
    let had_summary: i64 = match conn.query_row(
        "SELECT COUNT(*) FROM snapshot_summary WHERE namespace = ?1 AND taken_at = ?2",
        params![namespace, taken_at_str],
        |row| row.get(0),
    ) {
        Ok(n) => n,
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            return Err(storage_err(e));
        }
    };
    let deleted = match delete_rows_and_summary(conn, namespace, &taken_at_str) {
        Ok(n) => n,
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            return Err(e);
        }
    };
    conn.execute_batch("COMMIT").map_err(storage_err)?;

    if deleted == 0 && had_summary == 0 {
        return Err(ShelfError::SnapshotNotFound {
            namespace: namespace.to_string(),
            timestamp: taken_at_str,
        });
    }
    Ok(deleted)
}

/// Parse a row from snapshot_series into a SeriesStats.
pub(crate) fn row_to_series_stats(row: &rusqlite::Row<'_>) -> rusqlite::Result<SeriesStats> {
    Ok(SeriesStats {
        series_id: row.get(0)?,
        title: row.get(1)?,
        year: row.get(2)?,
        status: row.get(3)?,
        episode_count: row.get(4)?,
        total_size_gb: row.get(5)?,
        avg_size_mb: row.get(6)?,
        z_score: row.get(7)?,
        is_outlier: row.get::<_, i32>(8)? != 0,
    })
}

/// Column list matching `row_to_series_stats`.
pub(crate) const SERIES_COLUMNS: &str =
    "series_id, title, year, status, episode_count, total_size_gb, avg_size_mb, z_score, is_outlier";

//! Retention: bulk delete of snapshots older than a cutoff.

use rusqlite::{params, Connection};

use shelflife_core::errors::ShelfResult;

use crate::storage_err;

/// Delete every snapshot whose timestamp sorts before the cutoff string.
/// The cutoff is day-granular (`YYYY-MM-DD`), which sorts before any
/// same-day timestamp, so snapshots taken on the cutoff day survive.
/// Returns the number of series rows removed; zero matches is fine.
pub fn cleanup_before(conn: &Connection, namespace: &str, cutoff: &str) -> ShelfResult<usize> {
    conn.execute_batch("BEGIN IMMEDIATE").map_err(storage_err)?;

    let result = (|| {
        let rows = conn
            .execute(
                "DELETE FROM snapshot_series WHERE namespace = ?1 AND taken_at < ?2",
                params![namespace, cutoff],
            )
            .map_err(storage_err)?;
        conn.execute(
            "DELETE FROM snapshot_summary WHERE namespace = ?1 AND taken_at < ?2",
            params![namespace, cutoff],
        )
        .map_err(storage_err)?;
        Ok(rows)
    })();

    match result {
        Ok(rows) => {
            conn.execute_batch("COMMIT").map_err(storage_err)?;
            Ok(rows)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

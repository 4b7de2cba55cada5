//! v001: snapshot_series, snapshot_summary.

use rusqlite::Connection;

pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS snapshot_series (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            namespace     TEXT NOT NULL,
            taken_at      TEXT NOT NULL,
            series_id     INTEGER NOT NULL,
            title         TEXT NOT NULL,
            year          TEXT,
            status        TEXT,
            episode_count INTEGER NOT NULL,
            total_size_gb REAL NOT NULL,
            avg_size_mb   REAL NOT NULL,
            z_score       REAL NOT NULL,
            is_outlier    INTEGER NOT NULL,
            UNIQUE(namespace, taken_at, series_id)
        );

        CREATE INDEX IF NOT EXISTS idx_series_ns_taken
            ON snapshot_series(namespace, taken_at);
        CREATE INDEX IF NOT EXISTS idx_series_ns_series
            ON snapshot_series(namespace, series_id, taken_at);

        CREATE TABLE IF NOT EXISTS snapshot_summary (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            namespace          TEXT NOT NULL,
            taken_at           TEXT NOT NULL,
            total_series       INTEGER NOT NULL,
            total_episodes     INTEGER NOT NULL,
            total_size_gb      REAL NOT NULL,
            mean_avg_size_mb   REAL NOT NULL,
            std_avg_size_mb    REAL NOT NULL,
            outlier_count      INTEGER NOT NULL,
            outlier_percentage REAL NOT NULL,
            UNIQUE(namespace, taken_at)
        );

        CREATE INDEX IF NOT EXISTS idx_summary_ns_taken
            ON snapshot_summary(namespace, taken_at);
        ",
    )
}

//! v002: upstream_secrets — one encrypted credential record per namespace.

use rusqlite::Connection;

pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS upstream_secrets (
            namespace    TEXT PRIMARY KEY,
            endpoint_url TEXT NOT NULL,
            payload      BLOB NOT NULL,
            updated_at   TEXT NOT NULL
        );
        ",
    )
}

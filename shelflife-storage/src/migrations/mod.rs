//! Idempotent schema migrations, run on every engine startup.

mod v001_snapshot_tables;
mod v002_secret_table;

use rusqlite::Connection;

use shelflife_core::errors::{ShelfResult, StorageError};

/// Apply all migrations in order. Each is `CREATE ... IF NOT EXISTS` so
/// reruns are no-ops.
pub fn run_migrations(conn: &Connection) -> ShelfResult<()> {
    let steps: &[(u32, fn(&Connection) -> rusqlite::Result<()>)] = &[
        (1, v001_snapshot_tables::migrate),
        (2, v002_secret_table::migrate),
    ];
    for (version, migrate) in steps {
        migrate(conn).map_err(|e| StorageError::Migration {
            version: *version,
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

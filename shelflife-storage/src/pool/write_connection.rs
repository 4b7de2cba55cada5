//! The single write connection. All mutations serialize through it.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use shelflife_core::errors::{ShelfError, ShelfResult, StorageError};

use super::pragmas::apply_pragmas;
use crate::storage_err;

/// Wraps the one connection allowed to mutate the database.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database path.
    pub fn open(path: &Path) -> ShelfResult<Self> {
        let conn = Connection::open(path).map_err(storage_err)?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory() -> ShelfResult<Self> {
        let conn = Connection::open_in_memory().map_err(storage_err)?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with exclusive access to the write connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> ShelfResult<T>
    where
        F: FnOnce(&Connection) -> ShelfResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| {
            ShelfError::from(StorageError::Sqlite {
                message: format!("write connection lock poisoned: {e}"),
            })
        })?;
        f(&guard)
    }
}

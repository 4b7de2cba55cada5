//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use shelflife_core::errors::ShelfResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: ReadPool,
    pub db_path: Option<PathBuf>,
    /// File-backed pools route reads through the read pool. In-memory
    /// pools route reads through the writer, because in-memory read
    /// connections are isolated databases that never see its changes.
    file_backed: bool,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file.
    pub fn open(path: &Path, read_pool_size: usize) -> ShelfResult<Self> {
        let writer = WriteConnection::open(path)?;
        let readers = ReadPool::open(path, read_pool_size)?;
        Ok(Self {
            writer,
            readers,
            db_path: Some(path.to_path_buf()),
            file_backed: true,
        })
    }

    /// Open an in-memory connection pool (for testing).
    pub fn open_in_memory() -> ShelfResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        let readers = ReadPool::open_in_memory(1)?;
        Ok(Self {
            writer,
            readers,
            db_path: None,
            file_backed: false,
        })
    }

    /// Execute a read-only query on the best available connection.
    pub fn with_reader<F, T>(&self, f: F) -> ShelfResult<T>
    where
        F: FnOnce(&Connection) -> ShelfResult<T>,
    {
        if self.file_backed {
            self.readers.with_conn(f)
        } else {
            self.writer.with_conn_sync(f)
        }
    }
}

//! # shelflife-storage
//!
//! SQLite persistence layer for library snapshots: connection pool,
//! migrations, snapshot CRUD, retention, and CSV export.

pub mod engine;
pub mod export;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod timestamps;

pub use engine::HistoryStore;
pub use export::CsvSink;
pub use pool::ConnectionPool;

use shelflife_core::errors::{ShelfError, StorageError};

/// Map a rusqlite error into the storage taxonomy. Busy/locked becomes
/// `Timeout` so callers can distinguish contention from corruption.
pub fn storage_err(e: rusqlite::Error) -> ShelfError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &e {
        if matches!(
            failure.code,
            rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
        ) {
            return StorageError::Timeout {
                message: e.to_string(),
            }
            .into();
        }
    }
    StorageError::Sqlite {
        message: e.to_string(),
    }
    .into()
}

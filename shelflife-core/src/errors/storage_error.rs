/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    Migration { version: u32, reason: String },

    #[error("storage operation timed out: {message}")]
    Timeout { message: String },

    #[error("database corruption detected: {details}")]
    Corruption { details: String },

    #[error("export sink error: {message}")]
    Sink { message: String },
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Durable store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub db_path: PathBuf,
    /// Number of read connections in the pool (clamped by the pool).
    pub read_pool_size: usize,
    /// Rolling window: snapshots older than this many days are purged by
    /// cleanup runs.
    pub retention_days: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(defaults::DEFAULT_DB_PATH),
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
            retention_days: defaults::DEFAULT_RETENTION_DAYS,
        }
    }
}

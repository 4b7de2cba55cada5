//! Default values for every config section.

pub const DEFAULT_DB_PATH: &str = "shelflife_history.db";
pub const DEFAULT_KEY_PATH: &str = ".shelflife_master.key";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_RETENTION_DAYS: u64 = 90;
pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;

/// Shelflife system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Timestamp format used for persisted snapshot keys.
/// Second precision; lexicographic order equals chronological order.
pub const SNAPSHOT_TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Day-granularity format used for retention cutoffs.
pub const CUTOFF_DAY_FORMAT: &str = "%Y-%m-%d";

/// Master key size in bytes (AES-256).
pub const MASTER_KEY_LEN: usize = 32;

/// AES-GCM nonce size in bytes (96 bits is the standard).
pub const NONCE_LEN: usize = 12;

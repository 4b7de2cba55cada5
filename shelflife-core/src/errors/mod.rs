//! Error taxonomy for the Shelflife workspace.
//!
//! Each subsystem has a focused error enum; `ShelfError` is the top-level
//! type every public API returns via `ShelfResult<T>`.

mod storage_error;
mod vault_error;

pub use storage_error::StorageError;
pub use vault_error::VaultError;

/// Result alias used across the workspace.
pub type ShelfResult<T> = Result<T, ShelfError>;

/// Top-level error for all Shelflife operations.
#[derive(Debug, thiserror::Error)]
pub enum ShelfError {
    /// Bad caller input: empty fields, thresholds out of range.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// A snapshot already exists at this timestamp and overwrite was not requested.
    #[error("snapshot for {timestamp} already exists; pass overwrite to replace it")]
    SnapshotConflict { timestamp: String },

    /// No snapshot stored at the given (namespace, timestamp).
    #[error("no snapshot found for namespace '{namespace}' at {timestamp}")]
    SnapshotNotFound {
        namespace: String,
        timestamp: String,
    },

    /// No credential record stored for the namespace.
    #[error("no credentials stored for namespace '{namespace}'")]
    SecretNotFound { namespace: String },

    /// Ciphertext failed authentication under the current master key.
    /// Always distinct from `SecretNotFound`; never masked as a generic failure.
    #[error("credential decryption failed: {reason}")]
    Decryption { reason: String },

    /// Durable-store failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Key-material failure.
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl ShelfError {
    /// Shorthand for a validation failure.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

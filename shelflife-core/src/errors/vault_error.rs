/// Key-vault errors for master key material.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("key material I/O failed at {path}: {message}")]
    Io { path: String, message: String },

    #[error("key material at {path} is malformed: expected {expected} bytes, found {actual}")]
    CorruptKeyMaterial {
        path: String,
        expected: usize,
        actual: usize,
    },

    #[error("cipher failure: {message}")]
    Crypto { message: String },
}

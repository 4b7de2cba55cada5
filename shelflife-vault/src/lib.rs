//! # shelflife-vault
//!
//! Master key lifecycle and encrypted per-namespace credential storage.
//! The key vault owns a single 32-byte key generated on first use; the
//! secret store seals credential envelopes with AES-256-GCM under it.

pub mod cipher;
pub mod key;
pub mod store;

pub use cipher::SecretCipher;
pub use key::{KeyVault, MasterKey};
pub use store::SecretStore;

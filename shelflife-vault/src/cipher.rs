//! AES-256-GCM sealing for credential envelopes.
//!
//! Envelope layout: 12-byte random nonce followed by the ciphertext (tag
//! included). A fresh nonce is drawn per seal, so identical plaintext
//! never produces identical output.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use shelflife_core::constants::{MASTER_KEY_LEN, NONCE_LEN};
use shelflife_core::errors::{ShelfError, ShelfResult, VaultError};

use crate::key::MasterKey;

/// Symmetric cipher keyed by the vault's master key.
pub struct SecretCipher {
    key: Zeroizing<[u8; MASTER_KEY_LEN]>,
}

impl SecretCipher {
    pub fn new(master_key: &MasterKey) -> Self {
        Self {
            key: Zeroizing::new(*master_key.as_bytes()),
        }
    }

    /// Encrypt plaintext into a self-contained envelope.
    pub fn seal(&self, plaintext: &[u8]) -> ShelfResult<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(&*self.key).map_err(|e| {
            ShelfError::from(VaultError::Crypto {
                message: format!("invalid key: {e}"),
            })
        })?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher.encrypt(nonce, plaintext).map_err(|e| {
            ShelfError::from(VaultError::Crypto {
                message: format!("encryption failed: {e}"),
            })
        })?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&ciphertext);
        Ok(envelope)
    }

    /// Decrypt an envelope. Any authentication failure (wrong key,
    /// corruption, tampering) is `Decryption`; plaintext is never
    /// returned unauthenticated.
    pub fn open(&self, envelope: &[u8]) -> ShelfResult<Vec<u8>> {
        if envelope.len() < NONCE_LEN {
            return Err(ShelfError::Decryption {
                reason: format!(
                    "envelope too short: {} bytes, need at least {NONCE_LEN}",
                    envelope.len()
                ),
            });
        }
        let (nonce_bytes, ciphertext) = envelope.split_at(NONCE_LEN);

        let cipher = Aes256Gcm::new_from_slice(&*self.key).map_err(|e| {
            ShelfError::from(VaultError::Crypto {
                message: format!("invalid key: {e}"),
            })
        })?;

        cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| ShelfError::Decryption {
                reason: "ciphertext failed authentication".to_string(),
            })
    }
}

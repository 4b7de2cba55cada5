//! Master key lifecycle: created once, persisted to protected storage,
//! loaded byte-for-byte afterwards.

use std::path::{Path, PathBuf};

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use shelflife_core::constants::MASTER_KEY_LEN;
use shelflife_core::errors::{ShelfResult, VaultError};

/// Master key material for the secret store (zeroized on drop).
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    bytes: [u8; MASTER_KEY_LEN],
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey").field("bytes", &"<redacted>").finish()
    }
}

impl MasterKey {
    pub(crate) fn from_bytes(bytes: [u8; MASTER_KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; MASTER_KEY_LEN] {
        &self.bytes
    }
}

/// Owns the master key file. Constructed once at process start and passed
/// by reference into the secret store; there is no ambient global key.
pub struct KeyVault {
    key_path: PathBuf,
}

impl KeyVault {
    pub fn new(key_path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: key_path.into(),
        }
    }

    /// The path holding the key material.
    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    /// Load the master key, generating and persisting it on first use.
    ///
    /// Later calls return the same bytes unchanged, across process
    /// restarts. Existing material of the wrong length is
    /// `CorruptKeyMaterial`; unreadable or unwritable storage is `Io`.
    pub fn load_or_generate(&self) -> ShelfResult<MasterKey> {
        match std::fs::read(&self.key_path) {
            Ok(bytes) => {
                let material: [u8; MASTER_KEY_LEN] =
                    bytes.as_slice().try_into().map_err(|_| {
                        VaultError::CorruptKeyMaterial {
                            path: self.key_path.display().to_string(),
                            expected: MASTER_KEY_LEN,
                            actual: bytes.len(),
                        }
                    })?;
                Ok(MasterKey::from_bytes(material))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => self.generate(),
            Err(e) => Err(self.io_err(e).into()),
        }
    }

    fn generate(&self) -> ShelfResult<MasterKey> {
        let mut material = [0u8; MASTER_KEY_LEN];
        OsRng.fill_bytes(&mut material);

        std::fs::write(&self.key_path, material).map_err(|e| self.io_err(e))?;
        self.restrict_permissions();

        tracing::info!(path = %self.key_path.display(), "master key generated");
        Ok(MasterKey::from_bytes(material))
    }

    /// Owner-only read/write where the platform supports it. Best effort:
    /// a chmod failure is logged, not fatal.
    #[cfg(unix)]
    fn restrict_permissions(&self) {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        if let Err(e) = std::fs::set_permissions(&self.key_path, perms) {
            tracing::warn!(
                path = %self.key_path.display(),
                error = %e,
                "could not restrict key file permissions"
            );
        }
    }

    #[cfg(not(unix))]
    fn restrict_permissions(&self) {}

    fn io_err(&self, e: std::io::Error) -> VaultError {
        VaultError::Io {
            path: self.key_path.display().to_string(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_key_on_first_use() {
        let dir = tempfile::tempdir().unwrap();
        let vault = KeyVault::new(dir.path().join("master.key"));

        let key = vault.load_or_generate().unwrap();
        assert_eq!(key.as_bytes().len(), MASTER_KEY_LEN);
        assert!(vault.key_path().exists());
    }

    #[test]
    fn reload_returns_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("master.key");

        let first = KeyVault::new(&path).load_or_generate().unwrap();
        let second = KeyVault::new(&path).load_or_generate().unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn distinct_vaults_generate_distinct_keys() {
        let dir = tempfile::tempdir().unwrap();
        let a = KeyVault::new(dir.path().join("a.key")).load_or_generate().unwrap();
        let b = KeyVault::new(dir.path().join("b.key")).load_or_generate().unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn truncated_material_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("master.key");
        std::fs::write(&path, [0u8; 7]).unwrap();

        let err = KeyVault::new(&path).load_or_generate().unwrap_err();
        assert!(matches!(
            err,
            shelflife_core::errors::ShelfError::Vault(VaultError::CorruptKeyMaterial {
                actual: 7,
                ..
            })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("master.key");
        KeyVault::new(&path).load_or_generate().unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

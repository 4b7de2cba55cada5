use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Master key configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Path to the master key file. Created on first use; only the service
    /// account should be able to read it.
    pub key_path: PathBuf,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            key_path: PathBuf::from(defaults::DEFAULT_KEY_PATH),
        }
    }
}

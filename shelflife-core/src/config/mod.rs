//! Workspace configuration: storage paths, vault key location, detector
//! thresholds. Loaded from TOML; every field has a default.

mod defaults;
mod detection_config;
mod storage_config;
mod vault_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ShelfError, ShelfResult};

pub use detection_config::DetectionConfig;
pub use storage_config::StorageConfig;
pub use vault_config::VaultConfig;

/// Top-level configuration for the snapshot engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    /// Durable store settings.
    pub storage: StorageConfig,
    /// Master key settings.
    pub vault: VaultConfig,
    /// Outlier detector settings.
    pub detection: DetectionConfig,
}

impl ShelfConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml(input: &str) -> ShelfResult<Self> {
        let config: Self = toml::from_str(input)
            .map_err(|e| ShelfError::validation(format!("config parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk.
    pub fn from_file(path: &Path) -> ShelfResult<Self> {
        let input = std::fs::read_to_string(path).map_err(|e| {
            ShelfError::validation(format!("cannot read config {}: {e}", path.display()))
        })?;
        Self::from_toml(&input)
    }

    /// Reject thresholds the detector cannot work with.
    pub fn validate(&self) -> ShelfResult<()> {
        let z = self.detection.z_threshold;
        if !z.is_finite() || z <= 0.0 {
            return Err(ShelfError::validation(format!(
                "z_threshold must be finite and positive, got {z}"
            )));
        }
        if let Some(abs) = self.detection.absolute_threshold_mb {
            if !abs.is_finite() || abs <= 0.0 {
                return Err(ShelfError::validation(format!(
                    "absolute_threshold_mb must be finite and positive, got {abs}"
                )));
            }
        }
        if self.storage.retention_days == 0 {
            return Err(ShelfError::validation(
                "retention_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

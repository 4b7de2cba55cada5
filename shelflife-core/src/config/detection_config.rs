use serde::{Deserialize, Serialize};

use super::defaults;

/// Outlier detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Z-score threshold: a series is flagged when its average episode
    /// size exceeds `mean + z_threshold * std`.
    pub z_threshold: f64,
    /// Optional absolute threshold in MB, OR-ed with the z-score rule.
    pub absolute_threshold_mb: Option<f64>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            z_threshold: defaults::DEFAULT_Z_THRESHOLD,
            absolute_threshold_mb: None,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Snapshot-level statistics produced by the outlier detector.
///
/// All fields are zero for an empty snapshot; the detector never divides
/// by zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionStats {
    /// Mean of `avg_size_mb` across the snapshot.
    pub mean_mb: f64,
    /// Population standard deviation of `avg_size_mb`.
    pub std_mb: f64,
    /// The z-threshold expressed in metric units: `mean + z * std`.
    pub z_cutoff_mb: f64,
    /// Number of rows flagged as outliers.
    pub outlier_count: u32,
    /// Flagged rows as a percentage of all rows (0 when empty).
    pub outlier_percentage: f64,
}

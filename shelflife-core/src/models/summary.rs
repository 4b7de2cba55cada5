use serde::{Deserialize, Serialize};

/// Aggregate statistics for one snapshot.
///
/// Always derived from the snapshot's series rows at save time; the store
/// never persists a caller-supplied summary that disagrees with the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    /// Number of series in the snapshot.
    pub total_series: u32,
    /// Total episode files across all series.
    pub total_episodes: u64,
    /// Total library size in gigabytes.
    pub total_size_gb: f64,
    /// Mean of per-series average episode size (MB).
    pub mean_avg_size_mb: f64,
    /// Standard deviation of per-series average episode size (MB).
    pub std_avg_size_mb: f64,
    /// Number of series flagged as outliers.
    pub outlier_count: u32,
    /// Outliers as a percentage of all series.
    pub outlier_percentage: f64,
}

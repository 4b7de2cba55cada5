use serde::{Deserialize, Serialize};

/// Per-series size metrics within one snapshot.
///
/// `series_id` is assigned by the upstream media server and is unique
/// within a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Upstream series identifier.
    pub series_id: i64,
    /// Display title.
    pub title: String,
    /// First-air year, when the upstream reports one.
    pub year: Option<String>,
    /// Upstream airing status (e.g. "continuing", "ended").
    pub status: Option<String>,
    /// Number of episode files on disk.
    pub episode_count: u32,
    /// Total size of all episode files, in gigabytes.
    pub total_size_gb: f64,
    /// Average episode file size, in megabytes.
    pub avg_size_mb: f64,
    /// Z-score of `avg_size_mb` relative to the snapshot; 0 when the
    /// snapshot has zero spread.
    pub z_score: f64,
    /// Whether this series was flagged by the outlier detector.
    pub is_outlier: bool,
}

impl SeriesStats {
    /// A row with no detector annotations yet (z-score 0, not an outlier).
    pub fn unscored(
        series_id: i64,
        title: impl Into<String>,
        episode_count: u32,
        total_size_gb: f64,
        avg_size_mb: f64,
    ) -> Self {
        Self {
            series_id,
            title: title.into(),
            year: None,
            status: None,
            episode_count,
            total_size_gb,
            avg_size_mb,
            z_score: 0.0,
            is_outlier: false,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Metric column selectable for time-series queries.
///
/// A closed enum so callers can never interpolate arbitrary column names
/// into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    TotalSizeGb,
    AvgSizeMb,
    EpisodeCount,
}

impl MetricKind {
    /// The backing column name in the snapshot table.
    pub fn column(&self) -> &'static str {
        match self {
            MetricKind::TotalSizeGb => "total_size_gb",
            MetricKind::AvgSizeMb => "avg_size_mb",
            MetricKind::EpisodeCount => "episode_count",
        }
    }
}

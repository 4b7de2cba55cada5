use serde::{Deserialize, Serialize};

/// Presence of a series across the two sides of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    /// Present only in the newer snapshot.
    New,
    /// Present only in the older snapshot.
    Removed,
    /// Present in both.
    Existing,
}

impl std::fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChangeStatus::New => "new",
            ChangeStatus::Removed => "removed",
            ChangeStatus::Existing => "existing",
        };
        f.write_str(s)
    }
}

/// One row of a two-snapshot comparison: the full outer join of the two
/// sides on `series_id`, annotated with status and deltas.
///
/// Delta fields treat a missing side as zero. `size_change_pct` is `None`
/// whenever the old side is missing or has zero total size; callers rely
/// on the null to suppress display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Upstream series identifier.
    pub series_id: i64,
    /// Title from the newer snapshot when present, else the older one.
    pub title: String,
    /// new / removed / existing.
    pub status: ChangeStatus,
    /// Episode count on the old side, if present.
    pub episodes_old: Option<u32>,
    /// Episode count on the new side, if present.
    pub episodes_new: Option<u32>,
    /// `new - old`, missing side treated as 0.
    pub episodes_change: i64,
    /// Total size (GB) on the old side, if present.
    pub size_old_gb: Option<f64>,
    /// Total size (GB) on the new side, if present.
    pub size_new_gb: Option<f64>,
    /// `new - old` in GB, missing side treated as 0.
    pub size_change_gb: f64,
    /// `size_change_gb / size_old_gb * 100`; `None` when the old side is
    /// missing or zero.
    pub size_change_pct: Option<f64>,
    /// Average episode size (MB) on the old side, if present.
    pub avg_old_mb: Option<f64>,
    /// Average episode size (MB) on the new side, if present.
    pub avg_new_mb: Option<f64>,
    /// `new - old` in MB, missing side treated as 0.
    pub avg_change_mb: f64,
}

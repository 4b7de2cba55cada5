//! Two-snapshot comparison: full outer join on series id.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use shelflife_core::errors::{ShelfError, ShelfResult};
use shelflife_core::models::{ChangeStatus, ComparisonRow, SeriesStats};
use shelflife_core::traits::ISnapshotStore;

/// Compare two snapshots of one namespace, loading both through the
/// store. Fails with `SnapshotNotFound` naming whichever side is missing.
/// Rows come back sorted by absolute size change, largest first.
pub fn compare(
    store: &dyn ISnapshotStore,
    namespace: &str,
    old_taken_at: DateTime<Utc>,
    new_taken_at: DateTime<Utc>,
) -> ShelfResult<Vec<ComparisonRow>> {
    let old_rows = store
        .load_snapshot(namespace, old_taken_at)?
        .ok_or_else(|| not_found(namespace, old_taken_at))?;
    let new_rows = store
        .load_snapshot(namespace, new_taken_at)?
        .ok_or_else(|| not_found(namespace, new_taken_at))?;

    tracing::debug!(
        namespace,
        old = old_rows.len(),
        new = new_rows.len(),
        "comparing snapshots"
    );
    Ok(diff_rows(&old_rows, &new_rows))
}

fn not_found(namespace: &str, taken_at: DateTime<Utc>) -> ShelfError {
    ShelfError::SnapshotNotFound {
        namespace: namespace.to_string(),
        timestamp: taken_at.to_rfc3339(),
    }
}

/// Full outer join of two row sets on `series_id`.
///
/// Deltas treat a missing side as zero. The percentage change divides by
/// the old total and is `None` when that total is missing or zero — the
/// null is a signal downstream display relies on. Output is sorted by
/// `|size_change_gb|` descending.
pub fn diff_rows(old: &[SeriesStats], new: &[SeriesStats]) -> Vec<ComparisonRow> {
    let old_by_id: BTreeMap<i64, &SeriesStats> = old.iter().map(|r| (r.series_id, r)).collect();
    let new_by_id: BTreeMap<i64, &SeriesStats> = new.iter().map(|r| (r.series_id, r)).collect();

    let mut ids: Vec<i64> = old_by_id.keys().chain(new_by_id.keys()).copied().collect();
    ids.sort_unstable();
    ids.dedup();

    let mut rows: Vec<ComparisonRow> = ids
        .into_iter()
        .map(|series_id| {
            let old_side = old_by_id.get(&series_id).copied();
            let new_side = new_by_id.get(&series_id).copied();
            join_one(series_id, old_side, new_side)
        })
        .collect();

    rows.sort_by(|a, b| {
        b.size_change_gb
            .abs()
            .total_cmp(&a.size_change_gb.abs())
    });
    rows
}

fn join_one(
    series_id: i64,
    old_side: Option<&SeriesStats>,
    new_side: Option<&SeriesStats>,
) -> ComparisonRow {
    let status = match (old_side, new_side) {
        (None, Some(_)) => ChangeStatus::New,
        (Some(_), None) => ChangeStatus::Removed,
        _ => ChangeStatus::Existing,
    };

    let title = new_side
        .or(old_side)
        .map(|r| r.title.clone())
        .unwrap_or_default();

    let episodes_old = old_side.map(|r| r.episode_count);
    let episodes_new = new_side.map(|r| r.episode_count);
    let size_old_gb = old_side.map(|r| r.total_size_gb);
    let size_new_gb = new_side.map(|r| r.total_size_gb);
    let avg_old_mb = old_side.map(|r| r.avg_size_mb);
    let avg_new_mb = new_side.map(|r| r.avg_size_mb);

    let size_change_gb = size_new_gb.unwrap_or(0.0) - size_old_gb.unwrap_or(0.0);
    let size_change_pct = match size_old_gb {
        Some(old_total) if old_total != 0.0 => Some(size_change_gb / old_total * 100.0),
        _ => None,
    };

    ComparisonRow {
        series_id,
        title,
        status,
        episodes_old,
        episodes_new,
        episodes_change: i64::from(episodes_new.unwrap_or(0)) - i64::from(episodes_old.unwrap_or(0)),
        size_old_gb,
        size_new_gb,
        size_change_gb,
        size_change_pct,
        avg_old_mb,
        avg_new_mb,
        avg_change_mb: avg_new_mb.unwrap_or(0.0) - avg_old_mb.unwrap_or(0.0),
    }
}

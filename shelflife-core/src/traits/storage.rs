use chrono::{DateTime, Utc};

use crate::errors::ShelfResult;
use crate::models::{
    DetectionStats, MetricKind, SeriesStats, SnapshotSummary, UpstreamCredentials,
};
use crate::traits::RowSink;

/// Snapshot persistence: save, list, load, diff inputs, retention, export.
///
/// Every operation is scoped by the caller-supplied namespace; an
/// implementation must never read or write rows of another namespace.
pub trait ISnapshotStore: Send + Sync {
    // --- CRUD ---

    /// Persist a snapshot at `(namespace, taken_at)`. Fails with
    /// `SnapshotConflict` when one exists and `overwrite` is false;
    /// otherwise replaces it atomically. Returns the number of series
    /// rows written.
    fn save_snapshot(
        &self,
        namespace: &str,
        taken_at: DateTime<Utc>,
        rows: &[SeriesStats],
        stats: &DetectionStats,
        overwrite: bool,
    ) -> ShelfResult<usize>;

    /// Distinct snapshot timestamps for the namespace, newest first.
    fn list_timestamps(&self, namespace: &str) -> ShelfResult<Vec<DateTime<Utc>>>;

    /// Load a snapshot's series rows sorted by `avg_size_mb` descending;
    /// `None` when nothing is stored at that timestamp.
    fn load_snapshot(
        &self,
        namespace: &str,
        taken_at: DateTime<Utc>,
    ) -> ShelfResult<Option<Vec<SeriesStats>>>;

    /// The stored summary row, if any.
    fn get_summary(
        &self,
        namespace: &str,
        taken_at: DateTime<Utc>,
    ) -> ShelfResult<Option<SnapshotSummary>>;

    /// Delete one snapshot (rows + summary). Fails with
    /// `SnapshotNotFound` when nothing matched; returns the number of
    /// series rows removed.
    fn delete_snapshot(&self, namespace: &str, taken_at: DateTime<Utc>) -> ShelfResult<usize>;

    // --- History ---

    /// Metric history across snapshots, oldest first. With a `series_id`,
    /// one value per snapshot containing that series; without, the metric
    /// summed across all series per snapshot.
    fn time_series(
        &self,
        namespace: &str,
        series_id: Option<i64>,
        metric: MetricKind,
    ) -> ShelfResult<Vec<(DateTime<Utc>, f64)>>;

    /// Every stored summary, oldest first.
    fn global_trends(&self, namespace: &str)
        -> ShelfResult<Vec<(DateTime<Utc>, SnapshotSummary)>>;

    // --- Retention & export ---

    /// Delete every snapshot older than `days_to_keep` days (day
    /// granularity). Returns the number of series rows removed; zero
    /// matches is not an error.
    fn cleanup(&self, namespace: &str, days_to_keep: u64) -> ShelfResult<usize>;

    /// Stream every series row across all timestamps, ordered by
    /// `(taken_at, title)`, into the sink. Returns the row count.
    fn export_all(&self, namespace: &str, sink: &mut dyn RowSink) -> ShelfResult<usize>;
}

/// Per-namespace encrypted credential storage.
pub trait ISecretStore: Send + Sync {
    /// Encrypt and upsert the credentials for a namespace. Empty url or
    /// token is a `Validation` error.
    fn save(&self, namespace: &str, endpoint_url: &str, token: &str) -> ShelfResult<()>;

    /// Decrypt and return the stored credentials. `SecretNotFound` when
    /// no record exists; `Decryption` when the ciphertext fails
    /// authentication.
    fn load(&self, namespace: &str) -> ShelfResult<UpstreamCredentials>;

    /// Whether a record exists for the namespace.
    fn exists(&self, namespace: &str) -> ShelfResult<bool>;

    /// Remove the record. Deleting a missing record succeeds and reports
    /// zero rows affected.
    fn delete(&self, namespace: &str) -> ShelfResult<usize>;
}

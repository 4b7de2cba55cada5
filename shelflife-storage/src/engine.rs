//! HistoryStore — owns the ConnectionPool, implements ISnapshotStore,
//! startup migrations.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use shelflife_core::errors::ShelfResult;
use shelflife_core::models::{DetectionStats, MetricKind, SeriesStats, SnapshotSummary};
use shelflife_core::traits::{ISnapshotStore, RowSink};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::timestamps::format_cutoff_day;

/// The snapshot storage engine. Owns the connection pool and provides the
/// full `ISnapshotStore` interface.
pub struct HistoryStore {
    pool: Arc<ConnectionPool>,
}

impl HistoryStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path, read_pool_size: usize) -> ShelfResult<Self> {
        let pool = ConnectionPool::open(path, read_pool_size)?;
        Self::from_pool(Arc::new(pool))
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> ShelfResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        Self::from_pool(Arc::new(pool))
    }

    /// Build a store around an existing pool, running migrations.
    pub fn from_pool(pool: Arc<ConnectionPool>) -> ShelfResult<Self> {
        pool.writer
            .with_conn_sync(|conn| migrations::run_migrations(conn))?;
        Ok(Self { pool })
    }

    /// The shared connection pool, for collaborators (e.g. the secret
    /// store) that persist through the same database.
    pub fn pool(&self) -> Arc<ConnectionPool> {
        Arc::clone(&self.pool)
    }
}

impl ISnapshotStore for HistoryStore {
    fn save_snapshot(
        &self,
        namespace: &str,
        taken_at: DateTime<Utc>,
        rows: &[SeriesStats],
        stats: &DetectionStats,
        overwrite: bool,
    ) -> ShelfResult<usize> {
        let count = self.pool.writer.with_conn_sync(|conn| {
            crate::queries::snapshot_crud::save_snapshot(
                conn, namespace, taken_at, rows, stats, overwrite,
            )
        })?;
        tracing::debug!(namespace, %taken_at, rows = count, overwrite, "snapshot saved");
        Ok(count)
    }

    fn list_timestamps(&self, namespace: &str) -> ShelfResult<Vec<DateTime<Utc>>> {
        self.pool
            .with_reader(|conn| crate::queries::snapshot_query::list_timestamps(conn, namespace))
    }

    fn load_snapshot(
        &self,
        namespace: &str,
        taken_at: DateTime<Utc>,
    ) -> ShelfResult<Option<Vec<SeriesStats>>> {
        self.pool.with_reader(|conn| {
            crate::queries::snapshot_query::load_snapshot(conn, namespace, taken_at)
        })
    }

    fn get_summary(
        &self,
        namespace: &str,
        taken_at: DateTime<Utc>,
    ) -> ShelfResult<Option<SnapshotSummary>> {
        self.pool.with_reader(|conn| {
            crate::queries::snapshot_query::get_summary(conn, namespace, taken_at)
        })
    }

    fn delete_snapshot(&self, namespace: &str, taken_at: DateTime<Utc>) -> ShelfResult<usize> {
        let deleted = self.pool.writer.with_conn_sync(|conn| {
            crate::queries::snapshot_crud::delete_snapshot(conn, namespace, taken_at)
        })?;
        tracing::debug!(namespace, %taken_at, rows = deleted, "snapshot deleted");
        Ok(deleted)
    }

    fn time_series(
        &self,
        namespace: &str,
        series_id: Option<i64>,
        metric: MetricKind,
    ) -> ShelfResult<Vec<(DateTime<Utc>, f64)>> {
        self.pool.with_reader(|conn| {
            crate::queries::snapshot_query::time_series(conn, namespace, series_id, metric)
        })
    }

    fn global_trends(
        &self,
        namespace: &str,
    ) -> ShelfResult<Vec<(DateTime<Utc>, SnapshotSummary)>> {
        self.pool
            .with_reader(|conn| crate::queries::snapshot_query::global_trends(conn, namespace))
    }

    fn cleanup(&self, namespace: &str, days_to_keep: u64) -> ShelfResult<usize> {
        let cutoff = format_cutoff_day(Utc::now() - Duration::days(days_to_keep as i64));
        let deleted = self.pool.writer.with_conn_sync(|conn| {
            crate::queries::retention::cleanup_before(conn, namespace, &cutoff)
        })?;
        tracing::info!(namespace, %cutoff, rows = deleted, "retention cleanup");
        Ok(deleted)
    }

    fn export_all(&self, namespace: &str, sink: &mut dyn RowSink) -> ShelfResult<usize> {
        self.pool
            .with_reader(|conn| crate::export::export_history(conn, namespace, sink))
    }
}

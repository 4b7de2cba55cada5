//! Retention cleanup and CSV export.

use chrono::{Duration, TimeZone, Utc};
use shelflife_core::models::{DetectionStats, MetricKind, SeriesStats};
use shelflife_core::traits::ISnapshotStore;
use shelflife_storage::{CsvSink, HistoryStore};

fn rows() -> Vec<SeriesStats> {
    vec![
        SeriesStats::unscored(1, "Zebra Town", 10, 5.0, 500.0),
        SeriesStats::unscored(2, "Alpha House", 20, 10.0, 512.0),
    ]
}

// ── Cleanup ───────────────────────────────────────────────────────────────

#[test]
fn cleanup_removes_only_stale_snapshots() {
    let store = HistoryStore::open_in_memory().unwrap();
    let stats = DetectionStats::default();
    let stale = Utc::now() - Duration::days(200);
    let fresh = Utc::now() - Duration::days(1);

    store.save_snapshot("ns", stale, &rows(), &stats, false).unwrap();
    store.save_snapshot("ns", fresh, &rows(), &stats, false).unwrap();

    let deleted = store.cleanup("ns", 90).unwrap();
    assert_eq!(deleted, 2, "two series rows in the stale snapshot");

    let remaining = store.list_timestamps("ns").unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(store.get_summary("ns", stale).unwrap().is_none());
    assert!(store.get_summary("ns", remaining[0]).unwrap().is_some());
}

#[test]
fn cleanup_with_nothing_stale_deletes_nothing() {
    let store = HistoryStore::open_in_memory().unwrap();
    let stats = DetectionStats::default();
    store
        .save_snapshot("ns", Utc::now(), &rows(), &stats, false)
        .unwrap();

    assert_eq!(store.cleanup("ns", 90).unwrap(), 0);
    assert_eq!(store.list_timestamps("ns").unwrap().len(), 1);
}

#[test]
fn cleanup_on_empty_namespace_succeeds() {
    let store = HistoryStore::open_in_memory().unwrap();
    assert_eq!(store.cleanup("nobody", 90).unwrap(), 0);
}

// ── Export ────────────────────────────────────────────────────────────────

#[test]
fn export_orders_by_timestamp_then_title() {
    let store = HistoryStore::open_in_memory().unwrap();
    let stats = DetectionStats::default();
    let early = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();

    store.save_snapshot("ns", late, &rows(), &stats, false).unwrap();
    store.save_snapshot("ns", early, &rows(), &stats, false).unwrap();

    let mut sink = CsvSink::new(Vec::new());
    let count = store.export_all("ns", &mut sink).unwrap();
    assert_eq!(count, 4);

    let csv = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5, "header plus four rows");
    assert!(lines[0].starts_with("taken_at,series_id,title"));
    // Within each timestamp, titles sort ascending.
    assert!(lines[1].contains("2025-06-01T09:00:00Z") && lines[1].contains("Alpha House"));
    assert!(lines[2].contains("2025-06-01T09:00:00Z") && lines[2].contains("Zebra Town"));
    assert!(lines[3].contains("2025-06-02T09:00:00Z") && lines[3].contains("Alpha House"));
    assert!(lines[4].contains("2025-06-02T09:00:00Z") && lines[4].contains("Zebra Town"));
}

#[test]
fn export_quotes_fields_containing_delimiters() {
    let store = HistoryStore::open_in_memory().unwrap();
    let stats = DetectionStats::default();
    let tricky = vec![SeriesStats::unscored(1, "Comma, The \"Show\"", 1, 1.0, 100.0)];
    store
        .save_snapshot("ns", Utc::now(), &tricky, &stats, false)
        .unwrap();

    let mut sink = CsvSink::new(Vec::new());
    store.export_all("ns", &mut sink).unwrap();
    let csv = String::from_utf8(sink.into_inner().unwrap()).unwrap();

    assert!(csv.contains("\"Comma, The \"\"Show\"\"\""));
}

#[test]
fn export_of_empty_namespace_writes_header_only() {
    let store = HistoryStore::open_in_memory().unwrap();
    let mut sink = CsvSink::new(Vec::new());
    let count = store.export_all("nobody", &mut sink).unwrap();

    assert_eq!(count, 0);
    let csv = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

// ── History queries ───────────────────────────────────────────────────────

#[test]
fn aggregated_time_series_sums_across_series() {
    let store = HistoryStore::open_in_memory().unwrap();
    let stats = DetectionStats::default();
    let early = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();

    store.save_snapshot("ns", early, &rows(), &stats, false).unwrap();
    store.save_snapshot("ns", late, &rows(), &stats, false).unwrap();

    let series = store
        .time_series("ns", None, MetricKind::TotalSizeGb)
        .unwrap();
    assert_eq!(series.len(), 2);
    // Oldest first, each point summing both series (5.0 + 10.0).
    assert_eq!(series[0].0, early);
    assert!((series[0].1 - 15.0).abs() < 1e-9);
    assert!((series[1].1 - 15.0).abs() < 1e-9);
}

#[test]
fn per_series_time_series_tracks_one_series() {
    let store = HistoryStore::open_in_memory().unwrap();
    let stats = DetectionStats::default();
    let early = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();

    store.save_snapshot("ns", early, &rows(), &stats, false).unwrap();
    let mut grown = rows();
    grown[1].episode_count = 25;
    store.save_snapshot("ns", late, &grown, &stats, false).unwrap();

    let series = store
        .time_series("ns", Some(2), MetricKind::EpisodeCount)
        .unwrap();
    assert_eq!(series.len(), 2);
    assert!((series[0].1 - 20.0).abs() < 1e-9);
    assert!((series[1].1 - 25.0).abs() < 1e-9);
}

#[test]
fn global_trends_returns_summaries_oldest_first() {
    let store = HistoryStore::open_in_memory().unwrap();
    let early = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
    let stats = DetectionStats {
        mean_mb: 506.0,
        ..DetectionStats::default()
    };

    store.save_snapshot("ns", late, &rows(), &stats, false).unwrap();
    store.save_snapshot("ns", early, &rows(), &stats, false).unwrap();

    let trends = store.global_trends("ns").unwrap();
    assert_eq!(trends.len(), 2);
    assert_eq!(trends[0].0, early);
    assert_eq!(trends[1].0, late);
    assert_eq!(trends[0].1.total_series, 2);
    assert!((trends[0].1.mean_avg_size_mb - 506.0).abs() < 1e-9);
}

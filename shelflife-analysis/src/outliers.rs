//! Z-score outlier detection over a snapshot's average-size column.

use shelflife_core::models::{DetectionStats, SeriesStats};

/// Annotate rows with z-scores and outlier flags.
///
/// The spread is the population standard deviation of `avg_size_mb`.
/// A row is an outlier when its value exceeds `mean + z_threshold * std`,
/// or exceeds `absolute_threshold_mb` when one is set; the two rules are
/// OR-ed. With zero spread every z-score is 0 and the z-rule flags
/// nothing. Empty input comes back unchanged with zeroed stats.
pub fn detect(
    mut rows: Vec<SeriesStats>,
    z_threshold: f64,
    absolute_threshold_mb: Option<f64>,
) -> (Vec<SeriesStats>, DetectionStats) {
    if rows.is_empty() {
        return (rows, DetectionStats::default());
    }

    let n = rows.len() as f64;
    let mean = rows.iter().map(|r| r.avg_size_mb).sum::<f64>() / n;
    let variance = rows
        .iter()
        .map(|r| {
            let d = r.avg_size_mb - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    let std = variance.sqrt();

    let z_cutoff = mean + z_threshold * std;

    let mut outlier_count = 0u32;
    for row in &mut rows {
        row.z_score = if std > 0.0 {
            (row.avg_size_mb - mean) / std
        } else {
            0.0
        };
        let z_hit = row.avg_size_mb > z_cutoff;
        let abs_hit = absolute_threshold_mb.is_some_and(|abs| row.avg_size_mb > abs);
        row.is_outlier = z_hit || abs_hit;
        if row.is_outlier {
            outlier_count += 1;
        }
    }

    let stats = DetectionStats {
        mean_mb: mean,
        std_mb: std,
        z_cutoff_mb: z_cutoff,
        outlier_count,
        outlier_percentage: f64::from(outlier_count) / n * 100.0,
    };
    (rows, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(series_id: i64, avg_size_mb: f64) -> SeriesStats {
        SeriesStats::unscored(series_id, format!("series-{series_id}"), 10, 5.0, avg_size_mb)
    }

    #[test]
    fn empty_input_returns_empty_stats() {
        let (rows, stats) = detect(Vec::new(), 2.0, None);
        assert!(rows.is_empty());
        assert_eq!(stats, DetectionStats::default());
    }

    // 500/512/5000 at z=2.0: mean 2004, population std ~2118.5, cutoff
    // ~6241 — no z-outliers. With an absolute threshold of 1000 MB only
    // the 5000 MB series is flagged.
    #[test]
    fn concrete_scenario_no_z_outliers() {
        let input = vec![row(1, 500.0), row(2, 512.0), row(3, 5000.0)];

        let (rows, stats) = detect(input.clone(), 2.0, None);
        assert!((stats.mean_mb - 2004.0).abs() < 1e-9);
        assert!(stats.std_mb > 2118.0 && stats.std_mb < 2119.0);
        assert!(rows.iter().all(|r| !r.is_outlier));
        assert_eq!(stats.outlier_count, 0);

        let (rows, stats) = detect(input, 2.0, Some(1000.0));
        assert!(!rows.iter().find(|r| r.series_id == 1).unwrap().is_outlier);
        assert!(!rows.iter().find(|r| r.series_id == 2).unwrap().is_outlier);
        assert!(rows.iter().find(|r| r.series_id == 3).unwrap().is_outlier);
        assert_eq!(stats.outlier_count, 1);
        assert!((stats.outlier_percentage - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn zero_spread_yields_zero_z_scores_and_no_outliers() {
        let input = vec![row(1, 500.0), row(2, 500.0), row(3, 500.0)];
        let (rows, stats) = detect(input, 2.0, None);

        assert_eq!(stats.std_mb, 0.0);
        assert!(rows.iter().all(|r| r.z_score == 0.0));
        assert!(rows.iter().all(|r| !r.is_outlier));
    }

    #[test]
    fn z_rule_flags_above_cutoff() {
        // Nine at 100 plus one at 1000: mean 190, std 270, cutoff at
        // z=1.0 is 460, so only the 1000 MB row is above it.
        let mut input: Vec<SeriesStats> = (1..=9).map(|id| row(id, 100.0)).collect();
        input.push(row(10, 1000.0));

        let (rows, stats) = detect(input, 1.0, None);
        assert_eq!(stats.outlier_count, 1);
        assert!(rows.iter().find(|r| r.series_id == 10).unwrap().is_outlier);
        assert!(rows.iter().find(|r| r.series_id == 10).unwrap().z_score > 1.0);
    }

    #[test]
    fn absolute_rule_is_ored_not_anded() {
        // 512 MB is nowhere near the z-cutoff, but above the absolute
        // threshold, so it must still be flagged.
        let input = vec![row(1, 500.0), row(2, 512.0), row(3, 5000.0)];
        let (rows, _) = detect(input, 50.0, Some(510.0));

        assert!(rows.iter().find(|r| r.series_id == 2).unwrap().is_outlier);
        assert!(rows.iter().find(|r| r.series_id == 3).unwrap().is_outlier);
        assert!(!rows.iter().find(|r| r.series_id == 1).unwrap().is_outlier);
    }

    #[test]
    fn rows_come_back_in_input_order_with_fields_intact() {
        let input = vec![row(3, 5000.0), row(1, 500.0)];
        let (rows, _) = detect(input, 2.0, None);

        assert_eq!(rows[0].series_id, 3);
        assert_eq!(rows[1].series_id, 1);
        assert_eq!(rows[0].title, "series-3");
        assert_eq!(rows[0].episode_count, 10);
    }
}

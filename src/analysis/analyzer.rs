use crate::analysis::stats::{self, SeriesStats};

/// |z| threshold above which a point is flagged as an anomaly.
pub const ANOMALY_Z_THRESHOLD: f64 = 2.0;

/// Trailing window length for the rolling-average overlay.
pub const ROLLING_WINDOW: usize = 7;

/// Everything derived from one numeric column in a single pass. The
/// narrative writer and the render-plan builder both read from here, so the
/// anomalies they report can never disagree.
#[derive(Debug, Clone)]
pub struct ColumnAnalysis {
    pub name: String,
    /// Forward-filled series, aligned 1:1 with the sorted time axis.
    pub filled: Vec<f64>,
    pub stats: SeriesStats,
    pub slope: f64,
    /// Indices into `filled` whose |z| exceeds the threshold, ascending.
    pub anomalies: Vec<usize>,
    /// Rolling average aligned with `filled`; NaN until the window fills.
    pub rolling: Vec<f64>,
}

/// Analyze one numeric column whose values are already in time-sorted order.
///
/// Degrades rather than fails: with fewer than two valid points the std dev
/// is NaN, the anomaly set is empty, and the slope is 0.0.
pub fn analyze_column(name: &str, sorted_values: &[f64]) -> ColumnAnalysis {
    let filled = stats::forward_fill(sorted_values);
    let series_stats = SeriesStats::compute(&filled);
    let anomalies = stats::detect_anomalies(&filled, &series_stats, ANOMALY_Z_THRESHOLD);
    let slope = stats::trend_slope(&filled);
    let rolling = stats::rolling_mean(&filled, ROLLING_WINDOW);

    ColumnAnalysis {
        name: name.to_string(),
        filled,
        stats: series_stats,
        slope,
        anomalies,
        rolling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spike_column_end_to_end() {
        let mut values = vec![10.0; 9];
        values.push(1000.0);
        let a = analyze_column("value", &values);
        assert_eq!(a.anomalies, vec![9]);
        assert!(a.slope > 0.0);
        assert_eq!(a.stats.mean, 109.0);
        assert_eq!(a.rolling.len(), a.filled.len());
    }

    #[test]
    fn all_missing_column_degrades() {
        let values = vec![f64::NAN; 5];
        let a = analyze_column("ghost", &values);
        assert_eq!(a.slope, 0.0);
        assert!(a.anomalies.is_empty());
        assert!(a.stats.mean.is_nan());
    }

    #[test]
    fn gaps_are_filled_before_statistics() {
        let a = analyze_column("v", &[2.0, f64::NAN, 2.0, f64::NAN]);
        assert_eq!(a.filled, vec![2.0, 2.0, 2.0, 2.0]);
        assert_eq!(a.stats.count, 4);
    }
}

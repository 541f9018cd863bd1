/// Replace each missing (NaN) value with the most recent preceding
/// non-missing value. Leading missing values stay missing.
pub fn forward_fill(values: &[f64]) -> Vec<f64> {
    let mut filled = Vec::with_capacity(values.len());
    let mut last = f64::NAN;
    for &v in values {
        if v.is_finite() {
            last = v;
        }
        filled.push(last);
    }
    filled
}

/// Mean and sample standard deviation of a series, ignoring NaN entries.
#[derive(Debug, Clone, Copy)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl SeriesStats {
    /// Compute over the finite values of `y`. With zero finite values the
    /// mean is NaN; with fewer than two, the sample std dev is NaN.
    pub fn compute(y: &[f64]) -> Self {
        let vals: Vec<f64> = y.iter().copied().filter(|v| v.is_finite()).collect();
        let count = vals.len();
        if count == 0 {
            return SeriesStats {
                count,
                mean: f64::NAN,
                std_dev: f64::NAN,
            };
        }

        let mean = vals.iter().sum::<f64>() / count as f64;
        let std_dev = if count < 2 {
            f64::NAN
        } else {
            let ss = vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
            (ss / (count - 1) as f64).sqrt()
        };

        SeriesStats {
            count,
            mean,
            std_dev,
        }
    }
}

/// Indices whose |z-score| exceeds `threshold`, in ascending order.
/// Returns no anomalies when the std dev is zero or undefined, so a flat
/// or near-empty series never hits a division error.
pub fn detect_anomalies(y: &[f64], stats: &SeriesStats, threshold: f64) -> Vec<usize> {
    if !stats.std_dev.is_finite() || stats.std_dev == 0.0 {
        return Vec::new();
    }
    y.iter()
        .enumerate()
        .filter(|(_, &v)| v.is_finite() && ((v - stats.mean) / stats.std_dev).abs() > threshold)
        .map(|(i, _)| i)
        .collect()
}

/// Ordinary least squares slope of the series against positional index
/// 0..n-1. NaN entries are skipped; with fewer than two finite points the
/// slope is undefined and reported as 0.0.
pub fn trend_slope(y: &[f64]) -> f64 {
    let points: Vec<(f64, f64)> = y
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| (i as f64, v))
        .collect();

    let n = points.len();
    if n < 2 {
        return 0.0;
    }

    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

    let mut num = 0.0;
    let mut den = 0.0;
    for (x, v) in &points {
        num += (x - mean_x) * (v - mean_y);
        den += (x - mean_x) * (x - mean_x);
    }

    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Trailing rolling mean. Position i holds the mean of the `window` values
/// ending at i; positions whose window is not yet full of finite values
/// (including the first window-1) are NaN. Output length equals input length.
pub fn rolling_mean(y: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; y.len()];
    if window == 0 {
        return out;
    }
    for i in (window - 1)..y.len() {
        let slice = &y[i + 1 - window..=i];
        if slice.iter().all(|v| v.is_finite()) {
            out[i] = slice.iter().sum::<f64>() / window as f64;
        }
    }
    out
}

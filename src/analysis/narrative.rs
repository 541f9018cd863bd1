use crate::analysis::analyzer::ColumnAnalysis;
use crate::data::datetime::format_date;

/// Report header: the chosen time column and the observed date range.
/// With no parseable timestamps at all the range is reported as unknown.
pub fn header_lines(time_name: &str, time_axis: &[f64]) -> Vec<String> {
    let mut lines = vec![format!("Time column: {time_name}")];

    let finite = time_axis.iter().copied().filter(|t| t.is_finite());
    let min = finite.clone().fold(f64::INFINITY, f64::min);
    let max = finite.fold(f64::NEG_INFINITY, f64::max);

    if min.is_finite() && max.is_finite() {
        lines.push(format!(
            "Dataset range: {} to {}",
            format_date(min),
            format_date(max)
        ));
    } else {
        lines.push("Dataset range: unknown".to_string());
    }

    lines
}

/// Per-column summary block. Mean and std dev to 2 decimal places, slope to
/// 4, then the anomaly count.
pub fn column_fragment(analysis: &ColumnAnalysis) -> Vec<String> {
    vec![
        format!("Column: {}", analysis.name),
        format!(
            "  Mean: {:.2}, Std: {:.2}",
            analysis.stats.mean, analysis.stats.std_dev
        ),
        format!("  Trend slope: {:.4}", analysis.slope),
        format!("  Anomalies detected: {}", analysis.anomalies.len()),
    ]
}

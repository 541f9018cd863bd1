use crate::analysis::analyzer::ColumnAnalysis;

/// One flagged point: timestamp paired with the filled-series value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyPoint {
    pub time: f64,
    pub value: f64,
}

/// Everything a drawing backend needs for one plot: the time axis, the raw
/// (filled) series, the rolling overlay, and the anomaly markers. NaN means
/// a missing point; backends skip it. The builder never draws.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Time axis, 1:1 with `series` and `rolling`.
    pub time: Vec<f64>,
    pub series: Vec<f64>,
    pub rolling: Vec<f64>,
    pub anomalies: Vec<AnomalyPoint>,
}

impl RenderPlan {
    /// An empty plan carries no points at all; surfaces treat it as a no-op.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Assemble the render plan for one analyzed column. Anomaly markers come
/// straight from the analyzer's index set, so the plot always flags exactly
/// the points the narrative counted.
pub fn build_render_plan(
    time_axis: &[f64],
    analysis: &ColumnAnalysis,
    time_name: &str,
) -> RenderPlan {
    let anomalies = analysis
        .anomalies
        .iter()
        .map(|&i| AnomalyPoint {
            time: time_axis[i],
            value: analysis.filled[i],
        })
        .collect();

    RenderPlan {
        title: format!("Time Series: {}", analysis.name),
        x_label: time_name.to_string(),
        y_label: analysis.name.clone(),
        time: time_axis.to_vec(),
        series: analysis.filled.clone(),
        rolling: analysis.rolling.clone(),
        anomalies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::analyze_column;

    #[test]
    fn plan_aligns_all_overlays_with_the_axis() {
        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let axis: Vec<f64> = (0..10).map(|i| 1_000.0 + i as f64).collect();
        let a = analyze_column("v", &values);
        let plan = build_render_plan(&axis, &a, "date");
        assert_eq!(plan.series.len(), plan.time.len());
        assert_eq!(plan.rolling.len(), plan.time.len());
        assert_eq!(plan.title, "Time Series: v");
        assert_eq!(plan.x_label, "date");
    }

    #[test]
    fn anomaly_markers_reuse_the_analyzer_indices() {
        let mut values = vec![10.0; 9];
        values.push(1000.0);
        let axis: Vec<f64> = (0..10).map(|i| i as f64 * 86_400.0).collect();
        let a = analyze_column("v", &values);
        let plan = build_render_plan(&axis, &a, "date");
        assert_eq!(plan.anomalies.len(), 1);
        assert_eq!(plan.anomalies[0].time, 9.0 * 86_400.0);
        assert_eq!(plan.anomalies[0].value, 1000.0);
    }

    #[test]
    fn zero_rows_make_an_empty_plan() {
        let a = analyze_column("v", &[]);
        let plan = build_render_plan(&[], &a, "date");
        assert!(plan.is_empty());
        assert!(plan.anomalies.is_empty());
    }
}

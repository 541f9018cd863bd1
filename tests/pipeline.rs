use std::cell::RefCell;

use trendscope::analysis::RenderPlan;
use trendscope::error::RenderError;
use trendscope::{analyze_table, AnalysisOutcome, PlotSurface, Table};

/// Test surface that records every non-empty plan instead of drawing.
#[derive(Default)]
struct RecordingSurface {
    plans: RefCell<Vec<RenderPlan>>,
}

impl PlotSurface for RecordingSurface {
    fn render(&self, plan: &RenderPlan, filename: &str) -> Result<Option<String>, RenderError> {
        if plan.is_empty() {
            return Ok(None);
        }
        self.plans.borrow_mut().push(plan.clone());
        Ok(Some(filename.to_string()))
    }
}

fn table(cols: &[(&str, &[&str])]) -> Table {
    Table::from_columns(
        cols.iter()
            .map(|(name, cells)| {
                (
                    name.to_string(),
                    cells.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect(),
    )
}

fn report(outcome: AnalysisOutcome) -> (String, Vec<String>) {
    match outcome {
        AnalysisOutcome::Report(r) => (r.insights.join("\n"), r.plots),
        other => panic!("expected a report, got {other:?}"),
    }
}

#[test]
fn spike_dataset_flags_one_anomaly_with_positive_trend() {
    let dates: Vec<String> = (1..=10).map(|d| format!("2023-01-{d:02}")).collect();
    let date_refs: Vec<&str> = dates.iter().map(|s| s.as_str()).collect();
    let t = table(&[
        ("timestamp", date_refs.as_slice()),
        (
            "value",
            &["10", "10", "10", "10", "10", "10", "10", "10", "10", "1000"],
        ),
    ]);

    let surface = RecordingSurface::default();
    let (text, plots) = report(analyze_table(&t, &surface).unwrap());

    assert!(text.contains("Time column: timestamp"));
    assert!(text.contains("Dataset range: 2023-01-01 to 2023-01-10"));
    assert!(text.contains("Anomalies detected: 1"));
    assert!(text.contains("Trend slope: 54.0000"));
    assert_eq!(plots.len(), 1);

    let plans = surface.plans.borrow();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].anomalies.len(), 1);
    // the spike is the last point on the sorted axis
    assert_eq!(plans[0].anomalies[0].time, *plans[0].time.last().unwrap());
    assert_eq!(plans[0].anomalies[0].value, 1000.0);
}

#[test]
fn missing_time_column_yields_the_diagnostic_and_no_plots() {
    let t = table(&[("id", &["1", "2"]), ("value", &["10", "20"])]);
    let surface = RecordingSurface::default();
    let outcome = analyze_table(&t, &surface).unwrap();

    assert!(matches!(outcome, AnalysisOutcome::NoTimeColumn));
    assert_eq!(
        outcome.text(),
        "No time column detected. Provide a timestamp column."
    );
    assert!(outcome.plots().is_empty());
    assert!(surface.plans.borrow().is_empty());
}

#[test]
fn time_column_without_numeric_columns_is_tagged() {
    let t = table(&[
        ("date", &["2023-01-01", "2023-01-02"]),
        ("label", &["a", "b"]),
    ]);
    let surface = RecordingSurface::default();
    let outcome = analyze_table(&t, &surface).unwrap();

    assert!(matches!(outcome, AnalysisOutcome::NoNumericColumns));
    assert_eq!(outcome.text(), "No numeric columns found for analysis.");
}

#[test]
fn entirely_missing_numeric_column_degrades_without_crashing() {
    let t = table(&[
        ("date", &["2023-01-01", "2023-01-02", "2023-01-03"]),
        ("ghost", &["", "", ""]),
    ]);
    let surface = RecordingSurface::default();
    let (text, plots) = report(analyze_table(&t, &surface).unwrap());

    assert!(text.contains("Column: ghost"));
    assert!(text.contains("Trend slope: 0.0000"));
    assert!(text.contains("Anomalies detected: 0"));
    // the plan still has an axis, so an artifact is produced
    assert_eq!(plots.len(), 1);
}

#[test]
fn two_numeric_columns_in_original_order() {
    let t = table(&[
        ("beta", &["1", "2", "3"]),
        ("date", &["2023-01-01", "2023-01-02", "2023-01-03"]),
        ("alpha", &["30", "20", "10"]),
    ]);
    let surface = RecordingSurface::default();
    let (text, plots) = report(analyze_table(&t, &surface).unwrap());

    let beta_pos = text.find("Column: beta").unwrap();
    let alpha_pos = text.find("Column: alpha").unwrap();
    assert!(beta_pos < alpha_pos, "fragments must follow table order");

    assert_eq!(plots.len(), 2);
    assert!(plots[0].starts_with("ts_beta_"));
    assert!(plots[1].starts_with("ts_alpha_"));

    let plans = surface.plans.borrow();
    assert_eq!(plans[0].y_label, "beta");
    assert_eq!(plans[1].y_label, "alpha");
}

#[test]
fn rows_are_sorted_by_time_before_analysis() {
    let t = table(&[
        ("date", &["2023-01-03", "2023-01-01", "2023-01-02"]),
        ("value", &["3", "1", "2"]),
    ]);
    let surface = RecordingSurface::default();
    let (text, _) = report(analyze_table(&t, &surface).unwrap());

    let plans = surface.plans.borrow();
    assert_eq!(plans[0].series, vec![1.0, 2.0, 3.0]);
    assert!(text.contains("Dataset range: 2023-01-01 to 2023-01-03"));
}

#[test]
fn fragments_are_separated_by_blank_lines() {
    let t = table(&[
        ("date", &["2023-01-01", "2023-01-02"]),
        ("a", &["1", "2"]),
        ("b", &["3", "4"]),
    ]);
    let surface = RecordingSurface::default();
    let (text, _) = report(analyze_table(&t, &surface).unwrap());
    assert!(text.contains("\n\nColumn: a"));
    assert!(text.contains("\n\nColumn: b"));
}

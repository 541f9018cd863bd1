use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::analyzer::analyze_column;
use crate::analysis::{classifier, narrative, plan};
use crate::data::Table;
use crate::error::{AnalysisError, ClassifyError};
use crate::render::PlotSurface;

/// A completed analysis: narrative lines plus one plot artifact per numeric
/// column, both in the columns' original table order.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub insights: Vec<String>,
    pub plots: Vec<String>,
}

/// Tagged result of analyzing one table. The degenerate variants replace the
/// report with a single diagnostic sentence; callers match on the variant
/// instead of sniffing strings.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Report(AnalysisReport),
    NoTimeColumn,
    NoNumericColumns,
}

impl AnalysisOutcome {
    /// The user-facing text: the joined narrative, or the diagnostic line.
    pub fn text(&self) -> String {
        match self {
            AnalysisOutcome::Report(report) => report.insights.join("\n"),
            AnalysisOutcome::NoTimeColumn => ClassifyError::MissingTimeColumn.to_string(),
            AnalysisOutcome::NoNumericColumns => ClassifyError::NoNumericColumns.to_string(),
        }
    }

    pub fn plots(&self) -> &[String] {
        match self {
            AnalysisOutcome::Report(report) => &report.plots,
            _ => &[],
        }
    }
}

/// Run the full analysis over one table: classify columns, sort by time,
/// then analyze and plot each numeric column independently.
///
/// The two table-level conditions abort before any per-column work and come
/// back as degenerate outcomes; a degenerate column (for instance one with
/// no valid points) only degrades its own fragment.
pub fn analyze_table(
    table: &Table,
    surface: &dyn PlotSurface,
) -> Result<AnalysisOutcome, AnalysisError> {
    let selection = match classifier::classify(table) {
        Ok(selection) => selection,
        Err(ClassifyError::MissingTimeColumn) => {
            warn!("no time column detected");
            return Ok(AnalysisOutcome::NoTimeColumn);
        }
        Err(ClassifyError::NoNumericColumns) => {
            warn!("no numeric columns to analyze");
            return Ok(AnalysisOutcome::NoNumericColumns);
        }
    };

    let time_name = &table.columns[selection.time_column];
    let (axis, order) = classifier::time_axis(table, selection.time_column);

    let mut insights = narrative::header_lines(time_name, &axis);
    let mut plots = Vec::with_capacity(selection.numeric_columns.len());

    for &col in &selection.numeric_columns {
        let name = &table.columns[col];
        let sorted = classifier::reorder(&table.column_to_f64(col), &order);
        let analysis = analyze_column(name, &sorted);

        insights.push(String::new());
        insights.extend(narrative::column_fragment(&analysis));

        let render_plan = plan::build_render_plan(&axis, &analysis, time_name);
        if let Some(artifact) = surface.render(&render_plan, &plot_filename(name))? {
            plots.push(artifact);
        }
    }

    info!(
        columns = selection.numeric_columns.len(),
        plots = plots.len(),
        "analysis complete"
    );

    Ok(AnalysisOutcome::Report(AnalysisReport { insights, plots }))
}

/// Timestamped plot filename, unique per column per invocation.
fn plot_filename(column: &str) -> String {
    let sanitized: String = column
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "ts_{}_{}.png",
        sanitized,
        Utc::now().format("%Y%m%d%H%M%S%6f")
    )
}

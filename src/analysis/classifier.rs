use tracing::debug;

use crate::data::datetime::{detect_date_format, parse_to_timestamp};
use crate::data::Table;
use crate::error::ClassifyError;

/// Columns selected for analysis: one time axis plus the numeric targets,
/// all as indices into the original table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    pub time_column: usize,
    pub numeric_columns: Vec<usize>,
}

/// Select the timestamp column and the numeric columns of a table.
///
/// The timestamp column is the first column, in original order, whose
/// lowercased name contains "date" or "time". Numeric columns are every
/// other column whose inferred type is numeric, kept in original order.
pub fn classify(table: &Table) -> Result<ColumnSelection, ClassifyError> {
    let time_column = table
        .columns
        .iter()
        .position(|name| {
            let lower = name.to_lowercase();
            lower.contains("date") || lower.contains("time")
        })
        .ok_or(ClassifyError::MissingTimeColumn)?;

    let numeric_columns: Vec<usize> = (0..table.columns.len())
        .filter(|&i| i != time_column && table.is_numeric_column(i))
        .collect();

    if numeric_columns.is_empty() {
        return Err(ClassifyError::NoNumericColumns);
    }

    debug!(
        time_column = %table.columns[time_column],
        numeric = numeric_columns.len(),
        "classified columns"
    );

    Ok(ColumnSelection {
        time_column,
        numeric_columns,
    })
}

/// Parse the timestamp column and compute the ascending-time row order.
///
/// Cells that fail to parse become NaN rather than aborting the column.
/// Returns the sorted time axis and the row permutation that realizes it;
/// applying the permutation to any other column aligns it with the axis.
/// Missing timestamps sort last; the sort is stable, so ties and missing
/// entries keep their original row order.
pub fn time_axis(table: &Table, time_column: usize) -> (Vec<f64>, Vec<usize>) {
    let cells = &table.column_data[time_column];
    let format = detect_date_format(cells);

    let raw: Vec<f64> = cells
        .iter()
        .map(|s| match format {
            Some(fmt) => parse_to_timestamp(s.trim(), fmt).unwrap_or(f64::NAN),
            None => f64::NAN,
        })
        .collect();

    let mut order: Vec<usize> = (0..raw.len()).collect();
    order.sort_by(|&a, &b| match (raw[a].is_nan(), raw[b].is_nan()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => raw[a].total_cmp(&raw[b]),
    });

    let axis: Vec<f64> = order.iter().map(|&i| raw[i]).collect();
    (axis, order)
}

/// Apply a row permutation produced by `time_axis` to a value column.
pub fn reorder(values: &[f64], order: &[usize]) -> Vec<f64> {
    order.iter().map(|&i| values[i]).collect()
}

/// An in-memory tabular dataset: column names plus column-major string cells.
/// All columns have `row_count` entries; rows keep their ingestion order until
/// the analysis layer re-sorts them by time.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub column_data: Vec<Vec<String>>, // column_data[col_idx][row_idx]
    pub row_count: usize,
}

impl Table {
    /// Build a table from (name, cells) pairs. Shorter columns are padded
    /// with empty cells so all columns share the same length.
    pub fn from_columns(cols: Vec<(String, Vec<String>)>) -> Self {
        let row_count = cols.iter().map(|(_, c)| c.len()).max().unwrap_or(0);
        let mut columns = Vec::with_capacity(cols.len());
        let mut column_data = Vec::with_capacity(cols.len());
        for (name, mut cells) in cols {
            cells.resize(row_count, String::new());
            columns.push(name);
            column_data.push(cells);
        }
        Table {
            columns,
            column_data,
            row_count,
        }
    }

    /// Whether a column's declared/inferred type is numeric: every non-empty
    /// cell parses as a float. A column with no non-empty cells counts as
    /// numeric (an entirely-missing measurement column is still analyzable).
    pub fn is_numeric_column(&self, col_idx: usize) -> bool {
        self.column_data[col_idx]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .all(|s| s.parse::<f64>().is_ok())
    }

    /// Extract a column as f64 values; empty or unparseable cells become NaN.
    pub fn column_to_f64(&self, col_idx: usize) -> Vec<f64> {
        self.column_data[col_idx]
            .iter()
            .map(|s| s.trim().parse::<f64>().unwrap_or(f64::NAN))
            .collect()
    }
}

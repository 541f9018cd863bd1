use std::path::Path;

use tracing::debug;

use crate::data::parser;
use crate::data::table::Table;
use crate::error::LoadError;

const HEADER_SCAN_ROWS: usize = 50;

/// Load a CSV or Excel file into a `Table`.
pub fn load_file(path: &Path) -> Result<Table, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => load_csv(path),
        "xls" | "xlsx" => load_excel(path),
        _ => Err(LoadError::UnsupportedFormat(ext)),
    }
}

fn load_csv(path: &Path) -> Result<Table, LoadError> {
    // Try UTF-8 first, then latin1 (each byte maps to the same code point)
    let content = std::fs::read(path)?;
    let text = String::from_utf8(content.clone())
        .unwrap_or_else(|_| content.iter().map(|&b| b as char).collect());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut all_rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => {
                let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
                if !row.is_empty() {
                    all_rows.push(row);
                }
            }
            Err(_) => continue,
        }
    }

    table_from_rows(all_rows)
}

fn load_excel(path: &Path) -> Result<Table, LoadError> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .ok_or(LoadError::NoData)?
        .clone();

    let range = workbook.worksheet_range(&sheet_name)?;

    let all_rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    Data::String(s) => s.clone(),
                    Data::Float(f) => f.to_string(),
                    Data::Int(i) => i.to_string(),
                    Data::Bool(b) => b.to_string(),
                    Data::DateTime(dt) => dt.to_string(),
                    Data::DateTimeIso(s) => s.clone(),
                    Data::DurationIso(s) => s.clone(),
                    Data::Error(e) => format!("{e:?}"),
                })
                .collect()
        })
        .collect();

    table_from_rows(all_rows)
}

/// Convert row-major cells into a column-major `Table`, splitting off the
/// detected header row as column names.
fn table_from_rows(all_rows: Vec<Vec<String>>) -> Result<Table, LoadError> {
    let header_row = parser::detect_header_row(&all_rows, HEADER_SCAN_ROWS);
    if all_rows.is_empty() || header_row >= all_rows.len() {
        return Err(LoadError::NoData);
    }

    let columns: Vec<String> = all_rows[header_row]
        .iter()
        .map(|s| s.trim().to_string())
        .collect();

    let data_rows = &all_rows[header_row + 1..];
    let num_cols = columns.len();
    let row_count = data_rows.len();

    let mut column_data: Vec<Vec<String>> = vec![Vec::with_capacity(row_count); num_cols];
    for row in data_rows {
        for (col_idx, col_data) in column_data.iter_mut().enumerate() {
            if col_idx < row.len() {
                col_data.push(row[col_idx].clone());
            } else {
                col_data.push(String::new());
            }
        }
    }

    debug!(columns = num_cols, rows = row_count, header_row, "loaded table");

    Ok(Table {
        columns,
        column_data,
        row_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_csv_with_header() {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(f, "date,value").unwrap();
        writeln!(f, "2023-01-01,10").unwrap();
        writeln!(f, "2023-01-02,20").unwrap();
        f.flush().unwrap();

        let table = load_file(f.path()).unwrap();
        assert_eq!(table.columns, vec!["date", "value"]);
        assert_eq!(table.row_count, 2);
        assert_eq!(table.column_data[1], vec!["10", "20"]);
    }

    #[test]
    fn short_rows_are_padded() {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(f, "date,value,extra").unwrap();
        writeln!(f, "2023-01-01,10").unwrap();
        f.flush().unwrap();

        let table = load_file(f.path()).unwrap();
        assert_eq!(table.column_data[2], vec![""]);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("data.parquet")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn empty_file_is_no_data() {
        let f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let err = load_file(f.path()).unwrap_err();
        assert!(matches!(err, LoadError::NoData));
    }
}

use std::collections::HashMap;

/// Detect the header row index within already-loaded rows.
///
/// Scans bottom-up (over the first `max_rows` rows) for the last row whose
/// cells are all non-numeric, non-date text and whose width matches the most
/// common column count. Falls back to row 0.
pub fn detect_header_row(rows: &[Vec<String>], max_rows: usize) -> usize {
    let scan = &rows[..rows.len().min(max_rows)];
    if scan.is_empty() {
        return 0;
    }

    // Find most common column count
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for row in scan {
        *counts.entry(row.len()).or_insert(0) += 1;
    }
    let most_common = counts
        .into_iter()
        .max_by_key(|&(_, c)| c)
        .map(|(len, _)| len)
        .unwrap_or(0);

    for i in (0..scan.len()).rev() {
        let row = &scan[i];
        if row.len() != most_common {
            continue;
        }

        let mut all_strings = true;
        let mut has_content = true;

        for cell in row {
            let trimmed = cell.trim();
            if trimmed.is_empty() {
                has_content = false;
                break;
            }
            // A numeric cell means this is a data row, not a header
            if trimmed.parse::<f64>().is_ok() {
                all_strings = false;
                break;
            }
            if is_date_like(trimmed) {
                all_strings = false;
                break;
            }
        }

        if all_strings && has_content {
            return i;
        }
    }

    0
}

fn is_date_like(s: &str) -> bool {
    let lower = s.to_lowercase();
    let has_separators = s.contains('/') || s.contains(':');
    let has_meridiem = lower.contains("am") || lower.contains("pm");

    if !has_separators && !has_meridiem {
        return false;
    }

    use chrono::NaiveDateTime;
    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%Y-%m-%d",
        "%m/%d/%Y",
    ];
    for fmt in &formats {
        if NaiveDateTime::parse_from_str(s, fmt).is_ok() {
            return true;
        }
        if chrono::NaiveDate::parse_from_str(s, fmt).is_ok() {
            return true;
        }
    }
    false
}

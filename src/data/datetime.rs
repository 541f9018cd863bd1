use chrono::NaiveDateTime;

/// Sentinel returned by `detect_date_format` when the column contains
/// RFC 3339 / ISO 8601 timestamps (e.g. `2026-02-10T22:26:28.987Z`).
pub const RFC3339_FORMAT: &str = "__rfc3339__";

/// Candidate date formats, datetime variants before date-only ones.
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m-%d-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d-%m-%Y",
];

/// Detect the most likely date format from a slice of string values.
/// Returns the format string with the highest parse success rate, or
/// `RFC3339_FORMAT` for ISO 8601 timestamps with a timezone suffix.
pub fn detect_date_format(values: &[String]) -> Option<&'static str> {
    let sample: Vec<&str> = values
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .take(100)
        .collect();

    if sample.is_empty() {
        return None;
    }

    let rfc3339_valid = sample
        .iter()
        .filter(|s| chrono::DateTime::parse_from_rfc3339(s).is_ok())
        .count();
    let rfc3339_score = rfc3339_valid as f64 / sample.len() as f64;

    let mut best_format: Option<&'static str> = None;
    let mut best_score: f64 = rfc3339_score;
    if rfc3339_score > 0.0 {
        best_format = Some(RFC3339_FORMAT);
    }

    for &fmt in DATE_FORMATS {
        let valid = sample
            .iter()
            .filter(|s| {
                NaiveDateTime::parse_from_str(s, fmt).is_ok()
                    || chrono::NaiveDate::parse_from_str(s, fmt).is_ok()
            })
            .count();

        let score = valid as f64 / sample.len() as f64;
        if score > best_score {
            best_score = score;
            best_format = Some(fmt);
        }
    }

    if best_score > 0.0 {
        best_format
    } else {
        None
    }
}

/// Parse a string value to a Unix timestamp (seconds, with subsecond
/// precision) using the given format. Returns None on parse failure.
pub fn parse_to_timestamp(value: &str, format: &str) -> Option<f64> {
    if format == RFC3339_FORMAT {
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
            return Some(dt.timestamp_millis() as f64 / 1000.0);
        }
        return None;
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
        Some(dt.and_utc().timestamp_millis() as f64 / 1000.0)
    } else if let Ok(d) = chrono::NaiveDate::parse_from_str(value, format) {
        Some(d.and_hms_opt(0, 0, 0)?.and_utc().timestamp() as f64)
    } else {
        None
    }
}

/// Format a Unix timestamp as a calendar date (`YYYY-MM-DD`).
pub fn format_date(ts: f64) -> String {
    use chrono::{DateTime, Utc};
    let secs = ts.floor() as i64;
    match DateTime::<Utc>::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => format!("{ts:.0}"),
    }
}

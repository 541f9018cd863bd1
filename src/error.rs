use std::path::PathBuf;

use thiserror::Error;

/// Table-level classification conditions. Both are recoverable: the caller
/// surfaces the message as the whole analysis result and skips per-column work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("No time column detected. Provide a timestamp column.")]
    MissingTimeColumn,
    #[error("No numeric columns found for analysis.")]
    NoNumericColumns,
}

/// Failures while materializing a `Table` from a file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),
    #[error("Cannot read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("No data found after header detection")]
    NoData,
}

/// Failures while rendering a plot artifact.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot create plot directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot encode plot image: {0}")]
    Image(#[from] image::ImageError),
}

/// Failures in the dataset/analysis store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Corrupt plot file list: {0}")]
    PlotList(#[from] serde_json::Error),
}

/// Umbrella error for a full analysis run. Classification conditions are not
/// in here: they are outcomes, not failures.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Render(#[from] RenderError),
}

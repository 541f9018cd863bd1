pub mod analyzer;
pub mod classifier;
pub mod narrative;
pub mod pipeline;
pub mod plan;
pub mod stats;

pub use analyzer::{analyze_column, ColumnAnalysis, ANOMALY_Z_THRESHOLD, ROLLING_WINDOW};
pub use classifier::{classify, ColumnSelection};
pub use pipeline::{analyze_table, AnalysisOutcome, AnalysisReport};
pub use plan::{AnomalyPoint, RenderPlan};

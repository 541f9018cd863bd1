pub mod analysis;
pub mod data;
pub mod error;
pub mod render;
pub mod storage;

pub use analysis::{analyze_table, AnalysisOutcome, AnalysisReport};
pub use data::{load_file, Table};
pub use render::{PlotSurface, PngSurface};
pub use storage::AnalysisStore;

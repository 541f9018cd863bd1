use crate::analysis::RenderPlan;
use crate::error::RenderError;

/// A drawing backend for render plans. Renders one artifact per plan under
/// the suggested filename and returns the identifier it stored it as.
/// An empty plan is a no-op and yields `Ok(None)`.
pub trait PlotSurface {
    fn render(&self, plan: &RenderPlan, filename: &str) -> Result<Option<String>, RenderError>;
}

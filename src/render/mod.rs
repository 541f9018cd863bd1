pub mod png;
pub mod surface;

pub use png::PngSurface;
pub use surface::PlotSurface;

use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use tracing::info;

use crate::analysis::RenderPlan;
use crate::error::RenderError;
use crate::render::surface::PlotSurface;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 500;
const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 20;
const MARGIN_BOTTOM: u32 = 40;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FRAME: Rgba<u8> = Rgba([120, 120, 120, 255]);
const SERIES: Rgba<u8> = Rgba([0, 0, 255, 255]);
const ROLLING: Rgba<u8> = Rgba([255, 165, 0, 255]);
const ANOMALY: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Headless plot renderer: draws each render plan into a PNG under `out_dir`.
/// Raw series in blue, rolling average in orange, anomalies as red markers.
pub struct PngSurface {
    out_dir: PathBuf,
}

impl PngSurface {
    pub fn new(out_dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let out_dir = out_dir.into();
        std::fs::create_dir_all(&out_dir).map_err(|source| RenderError::CreateDir {
            path: out_dir.clone(),
            source,
        })?;
        Ok(PngSurface { out_dir })
    }
}

impl PlotSurface for PngSurface {
    fn render(&self, plan: &RenderPlan, filename: &str) -> Result<Option<String>, RenderError> {
        if plan.is_empty() {
            return Ok(None);
        }

        let mut img = RgbaImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
        let scale = Scale::fit(plan);

        draw_frame(&mut img);
        draw_polyline(&mut img, &scale, &plan.time, &plan.series, SERIES);
        draw_polyline(&mut img, &scale, &plan.time, &plan.rolling, ROLLING);
        for a in &plan.anomalies {
            if let Some((x, y)) = scale.project(a.time, a.value) {
                draw_marker(&mut img, x, y, ANOMALY);
            }
        }

        let path = self.out_dir.join(filename);
        img.save(&path)?;
        info!(plot = %path.display(), "rendered plot");
        Ok(Some(filename.to_string()))
    }
}

/// Data-to-pixel mapping for the plot area.
struct Scale {
    x_min: f64,
    x_span: f64,
    y_min: f64,
    y_span: f64,
}

impl Scale {
    /// Fit the scale to every finite point in the plan. Degenerate ranges
    /// (a single point, or no finite data at all) fall back to a unit span
    /// so the frame still renders.
    fn fit(plan: &RenderPlan) -> Self {
        let xs = plan.time.iter().copied().filter(|v| v.is_finite());
        let ys = plan
            .series
            .iter()
            .chain(plan.rolling.iter())
            .copied()
            .filter(|v| v.is_finite());

        let (x_min, x_max) = min_max(xs);
        let (y_min, y_max) = min_max(ys);

        let (x_min, x_span) = normalize(x_min, x_max);
        let (y_min, y_span) = normalize(y_min, y_max);

        Scale {
            x_min,
            x_span,
            y_min,
            y_span,
        }
    }

    /// Map a data point into pixel coordinates; None for non-finite values.
    fn project(&self, t: f64, v: f64) -> Option<(f32, f32)> {
        if !t.is_finite() || !v.is_finite() {
            return None;
        }
        let plot_w = (WIDTH - MARGIN_LEFT - MARGIN_RIGHT) as f64;
        let plot_h = (HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) as f64;
        let x = MARGIN_LEFT as f64 + (t - self.x_min) / self.x_span * plot_w;
        let y = MARGIN_TOP as f64 + (1.0 - (v - self.y_min) / self.y_span) * plot_h;
        Some((x as f32, y as f32))
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn normalize(min: f64, max: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        (0.0, 1.0)
    } else if max > min {
        (min, max - min)
    } else {
        (min - 0.5, 1.0)
    }
}

fn draw_frame(img: &mut RgbaImage) {
    let (x0, x1) = (MARGIN_LEFT, WIDTH - MARGIN_RIGHT);
    let (y0, y1) = (MARGIN_TOP, HEIGHT - MARGIN_BOTTOM);
    for x in x0..=x1 {
        img.put_pixel(x, y0, FRAME);
        img.put_pixel(x, y1, FRAME);
    }
    for y in y0..=y1 {
        img.put_pixel(x0, y, FRAME);
        img.put_pixel(x1, y, FRAME);
    }
}

/// Draw line segments between consecutive finite points; a NaN on either
/// side of a segment breaks the line instead of drawing through it.
fn draw_polyline(img: &mut RgbaImage, scale: &Scale, xs: &[f64], ys: &[f64], color: Rgba<u8>) {
    for i in 1..xs.len().min(ys.len()) {
        let from = scale.project(xs[i - 1], ys[i - 1]);
        let to = scale.project(xs[i], ys[i]);
        if let (Some(a), Some(b)) = (from, to) {
            draw_line(img, a, b, color);
        }
    }
}

fn draw_line(img: &mut RgbaImage, from: (f32, f32), to: (f32, f32), color: Rgba<u8>) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
    for s in 0..=steps {
        let t = s as f32 / steps as f32;
        put_pixel_clamped(img, from.0 + dx * t, from.1 + dy * t, color);
    }
}

fn draw_marker(img: &mut RgbaImage, x: f32, y: f32, color: Rgba<u8>) {
    for ox in -2i32..=2 {
        for oy in -2i32..=2 {
            put_pixel_clamped(img, x + ox as f32, y + oy as f32, color);
        }
    }
}

fn put_pixel_clamped(img: &mut RgbaImage, x: f32, y: f32, color: Rgba<u8>) {
    if x < 0.0 || y < 0.0 {
        return;
    }
    let (x, y) = (x.round() as u32, y.round() as u32);
    if x < img.width() && y < img.height() {
        img.put_pixel(x, y, color);
    }
}

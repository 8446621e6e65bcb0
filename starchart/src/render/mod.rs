//! Chart image output.
//!
//! The sky is a navy unit disk on a white square canvas covering the fixed
//! window [-1, 1]². Stars are white filled dots whose area follows their
//! flux. There are no axes, labels or legend.

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ChartError, ChartResult};
use crate::pipeline::StarChart;

/// Sky disk colour (CSS "navy").
pub const SKY_COLOR: RGBColor = RGBColor(0, 0, 128);
pub const STAR_COLOR: RGBColor = WHITE;

/// Marker area in points² for a star of `magnitude`: `size_max · 10^(m / -2.5)`.
///
/// A magnitude 0 star gets `size_max`; every magnitude fainter divides the
/// area by ~2.512.
pub fn marker_size(magnitude: f64, size_max: f64) -> f64 {
    size_max * 10f64.powf(magnitude / -2.5)
}

/// Pixel radius of a point marker of area `size` points², at least one pixel.
///
/// A point marker is drawn at half the diameter of a plain circle marker of
/// the same area.
pub fn marker_radius_px(size: f64, dpi: u32) -> u32 {
    let points = 0.25 * size.max(0.0).sqrt();
    let px = points * f64::from(dpi) / 72.0;
    (px.round() as u32).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Canvas edge in inches
    pub chart_size: f64,
    pub dpi: u32,
    /// Marker area of a magnitude 0 star, points²
    pub star_size_max: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            chart_size: 10.0,
            dpi: 100,
            star_size_max: 100.0,
        }
    }
}

impl RenderOptions {
    /// Canvas edge in pixels.
    pub fn canvas_px(&self) -> u32 {
        (self.chart_size * f64::from(self.dpi)).round().max(1.0) as u32
    }
}

/// Draw `chart` and write it to `path`. `.png` selects the bitmap backend,
/// anything else is written as SVG.
pub fn render_chart(chart: &StarChart, options: &RenderOptions, path: &Path) -> ChartResult<()> {
    let px = options.canvas_px();
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));

    if is_png {
        render_png(chart, options, path, px)?;
    } else {
        draw(SVGBackend::new(path, (px, px)).into_drawing_area(), chart, options)?;
    }

    log::info!(
        "Chart with {} stars written to {} ({}x{} px)",
        chart.stars.len(),
        path.display(),
        px,
        px
    );
    Ok(())
}

#[cfg(feature = "png")]
fn render_png(chart: &StarChart, options: &RenderOptions, path: &Path, px: u32) -> ChartResult<()> {
    draw(BitMapBackend::new(path, (px, px)).into_drawing_area(), chart, options)
}

#[cfg(not(feature = "png"))]
fn render_png(_: &StarChart, _: &RenderOptions, path: &Path, _: u32) -> ChartResult<()> {
    Err(ChartError::Render(format!(
        "{}: PNG output needs the `png` feature; use an .svg path",
        path.display()
    )))
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    chart: &StarChart,
    options: &RenderOptions,
) -> ChartResult<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(render_err)?;
    let (width, _) = root.dim_in_pixel();

    let mut plot = ChartBuilder::on(&root)
        .margin(0)
        .build_cartesian_2d(-1.0f64..1.0f64, -1.0f64..1.0f64)
        .map_err(render_err)?;

    plot.draw_series(std::iter::once(Circle::new(
        (0.0, 0.0),
        width / 2,
        SKY_COLOR.filled(),
    )))
    .map_err(render_err)?;

    plot.draw_series(
        chart
            .stars
            .iter()
            .filter(|s| s.x.is_finite() && s.y.is_finite())
            .map(|s| {
                let size = marker_size(s.magnitude(), options.star_size_max);
                Circle::new(
                    (s.x, s.y),
                    marker_radius_px(size, options.dpi),
                    STAR_COLOR.filled(),
                )
            }),
    )
    .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_marker_size_reference_points() {
        assert!((marker_size(0.0, 100.0) - 100.0).abs() < 1e-12);
        assert!((marker_size(5.0, 100.0) - 1.0).abs() < 1e-12);
        assert!((marker_size(-2.5, 100.0) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_marker_radius() {
        // 100 pt² point marker: 2.5 pt radius, ~3.5 px at 100 dpi
        assert_eq!(marker_radius_px(100.0, 100), 3);
        assert_eq!(marker_radius_px(0.01, 100), 1);
        assert_eq!(marker_radius_px(10_000.0, 72), 25);
    }

    #[test]
    fn test_canvas_size() {
        assert_eq!(RenderOptions::default().canvas_px(), 1000);
        let small = RenderOptions {
            chart_size: 2.5,
            dpi: 80,
            star_size_max: 100.0,
        };
        assert_eq!(small.canvas_px(), 200);
    }

    proptest! {
        #[test]
        fn prop_marker_size_decreases_with_magnitude(
            m in -2.0f64..10.0,
            delta in 0.01f64..5.0,
        ) {
            prop_assert!(marker_size(m + delta, 100.0) < marker_size(m, 100.0));
        }

        #[test]
        fn prop_marker_radius_is_monotonic(a in 0.0f64..500.0, b in 0.0f64..500.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(marker_radius_px(lo, 100) <= marker_radius_px(hi, 100));
        }
    }
}

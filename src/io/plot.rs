//! SVG rendering of segmented fits.
//!
//! Points are drawn coloured by segment index and each segment's winning
//! curve is overlaid in its model colour. The colour per model tag is fixed:
//! linear blue, quadratic green, cubic yellow, sine red, exponential magenta.

use std::path::Path;

use plotters::prelude::*;

use crate::algorithms::basis::{BasisKind, BasisLibrary};
use crate::engine::output::FitReport;
use crate::primitives::errors::SegfitError;
use crate::primitives::segment::{Point, SEGMENT_LEN};

/// Samples per fitted curve.
pub const CURVE_SAMPLES: usize = 200;

// Dark2 qualitative palette
const SEGMENT_COLORS: [RGBColor; 8] = [
    RGBColor(27, 158, 119),
    RGBColor(217, 95, 2),
    RGBColor(117, 112, 179),
    RGBColor(231, 41, 138),
    RGBColor(102, 166, 30),
    RGBColor(230, 171, 2),
    RGBColor(166, 118, 29),
    RGBColor(102, 102, 102),
];

/// Curve colour of a model tag.
pub fn model_color(kind: BasisKind) -> RGBColor {
    match kind {
        BasisKind::Linear => BLUE,
        BasisKind::Quadratic => GREEN,
        BasisKind::Cubic => YELLOW,
        BasisKind::Sine => RED,
        BasisKind::Exponential => MAGENTA,
    }
}

/// Scatter colour of segment `index`.
pub fn segment_color(index: usize) -> RGBColor {
    SEGMENT_COLORS[index % SEGMENT_COLORS.len()]
}

/// `samples` evenly spaced values covering `[lo, hi]`.
pub fn linspace(lo: f64, hi: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (samples - 1) as f64;
            (0..samples).map(|i| lo + step * i as f64).collect()
        }
    }
}

/// Renders a fit report over its points to an SVG file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotRenderer {
    size: (u32, u32),
    samples: usize,
}

impl Default for PlotRenderer {
    fn default() -> Self {
        Self {
            size: (1024, 768),
            samples: CURVE_SAMPLES,
        }
    }
}

impl PlotRenderer {
    /// Set the image size in pixels.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Sampled curve for every segment of `report`, paired with its model tag.
    pub fn curves(
        &self,
        report: &FitReport<f64>,
        library: &BasisLibrary,
    ) -> Result<Vec<(BasisKind, Vec<(f64, f64)>)>, SegfitError> {
        report
            .segments
            .iter()
            .map(|outcome| {
                let xs = linspace(outcome.x_range.0, outcome.x_range.1, self.samples);
                let ys = library.evaluate(&outcome.coefficients, outcome.basis, &xs)?;
                Ok((outcome.basis, xs.into_iter().zip(ys).collect()))
            })
            .collect()
    }

    /// Draw `points` and the curves of `report` into `path`.
    pub fn render<P: AsRef<Path>>(
        &self,
        path: P,
        points: &[Point<f64>],
        report: &FitReport<f64>,
        library: &BasisLibrary,
    ) -> Result<(), SegfitError> {
        let curves = self.curves(report, library)?;

        let all = points
            .iter()
            .map(|p| (p.x, p.y))
            .chain(curves.iter().flat_map(|(_, c)| c.iter().copied()));
        let (x_range, y_range) = padded_bounds(all);

        let root = SVGBackend::new(path.as_ref(), self.size).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Segmented least-squares fit", ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(32)
            .y_label_area_size(48)
            .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
            .map_err(plot_error)?;
        chart.configure_mesh().draw().map_err(plot_error)?;

        for (index, chunk) in points.chunks(SEGMENT_LEN).enumerate() {
            let color = segment_color(index);
            chart
                .draw_series(
                    chunk
                        .iter()
                        .map(|p| Circle::new((p.x, p.y), 3, color.filled())),
                )
                .map_err(plot_error)?;
        }

        for (kind, curve) in curves {
            chart
                .draw_series(LineSeries::new(curve, model_color(kind).stroke_width(2)))
                .map_err(plot_error)?;
        }

        // Empty series carry one legend entry per active model.
        for &kind in library.active() {
            let color = model_color(kind);
            chart
                .draw_series(LineSeries::new(Vec::<(f64, f64)>::new(), color))
                .map_err(plot_error)?
                .label(kind.name())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_error)?;

        root.present().map_err(plot_error)?;
        Ok(())
    }
}

fn padded_bounds(values: impl Iterator<Item = (f64, f64)>) -> ((f64, f64), (f64, f64)) {
    let (mut x_lo, mut x_hi) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_lo, mut y_hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for (x, y) in values {
        x_lo = x_lo.min(x);
        x_hi = x_hi.max(x);
        y_lo = y_lo.min(y);
        y_hi = y_hi.max(y);
    }
    (pad(x_lo, x_hi), pad(y_lo, y_hi))
}

fn pad(lo: f64, hi: f64) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let margin = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    (lo - margin, hi + margin)
}

fn plot_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> SegfitError {
    SegfitError::PlotFailed(err.to_string())
}

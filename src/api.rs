//! High-level API for segmented model selection.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for configuring the candidate set, cross-validation
//! strategy and regularization, and the `run` orchestration used by the
//! command-line binary.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults.
//! * **Validated**: All parameters are validated when `.build()` is called.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`SegfitBuilder`] via `Segfit::new()`.
//! 2. Chain configuration methods (`.candidates()`, `.threshold()`, etc.).
//! 3. Call `.build()` to obtain a [`SegfitModel`].
//! 4. Call `.fit(&points)` or `.fit_xy(&x, &y)`.

use std::fmt::Debug;
use std::path::Path;

use log::info;

use crate::algorithms::basis::BasisLibrary;
use crate::engine::executor::{SegfitConfig, SegfitExecutor};
use crate::engine::selector::{ModelSelector, DEFAULT_THRESHOLD, DEFAULT_TOLERANCE};
use crate::engine::validator::Validator;
use crate::io::loader::PointLoader;
use crate::io::plot::PlotRenderer;
use crate::io::report::write_json;
use crate::math::linalg::FloatLinalg;
use crate::primitives::segment::zip_points;

// Publicly re-exported types
pub use crate::algorithms::basis::{BasisKind, ExponentialMode};
pub use crate::algorithms::least_squares::Solver;
pub use crate::engine::output::{FitReport, SegmentOutcome};
pub use crate::evaluation::cv::{CVConfig, HoldOut, InSample, KFold, LOOCV};
pub use crate::primitives::errors::SegfitError;
pub use crate::primitives::segment::{Point, SEGMENT_LEN};

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a segmented fit.
#[derive(Debug, Clone)]
pub struct SegfitBuilder<T: FloatLinalg + Debug> {
    /// Active candidate set (default: linear, cubic, sine).
    pub candidates: Option<Vec<BasisKind>>,

    /// Composition of the exponential basis.
    pub exponential_mode: Option<ExponentialMode>,

    /// Cross-validation strategy (default: LOOCV).
    pub cv: Option<CVConfig>,

    /// Regularization strength (default: 0.8).
    pub threshold: Option<T>,

    /// Relative noise floor for CV totals (default: 1e-10).
    pub tolerance: Option<T>,

    /// Linear solve strategy (default: SVD).
    pub solver: Option<Solver>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: FloatLinalg + Debug> Default for SegfitBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatLinalg + Debug> SegfitBuilder<T> {
    /// Create a new builder with default parameters.
    pub fn new() -> Self {
        Self {
            candidates: None,
            exponential_mode: None,
            cv: None,
            threshold: None,
            tolerance: None,
            solver: None,
            duplicate_param: None,
        }
    }

    fn mark(&mut self, already_set: bool, parameter: &'static str) {
        if already_set && self.duplicate_param.is_none() {
            self.duplicate_param = Some(parameter);
        }
    }

    /// Set the candidate models that compete on every segment.
    pub fn candidates(mut self, candidates: &[BasisKind]) -> Self {
        self.mark(self.candidates.is_some(), "candidates");
        self.candidates = Some(candidates.to_vec());
        self
    }

    /// Set how the exponential basis is composed.
    pub fn exponential_mode(mut self, mode: ExponentialMode) -> Self {
        self.mark(self.exponential_mode.is_some(), "exponential_mode");
        self.exponential_mode = Some(mode);
        self
    }

    /// Set the cross-validation strategy.
    pub fn cross_validate(mut self, cv: CVConfig) -> Self {
        self.mark(self.cv.is_some(), "cross_validate");
        self.cv = Some(cv);
        self
    }

    /// Set the regularization threshold: a non-linear winner must score below
    /// `threshold * linear_error`.
    pub fn threshold(mut self, threshold: T) -> Self {
        self.mark(self.threshold.is_some(), "threshold");
        self.threshold = Some(threshold);
        self
    }

    /// Set the relative noise floor below which CV totals count as zero.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.mark(self.tolerance.is_some(), "tolerance");
        self.tolerance = Some(tolerance);
        self
    }

    /// Set the linear solve strategy.
    pub fn solver(mut self, solver: Solver) -> Self {
        self.mark(self.solver.is_some(), "solver");
        self.solver = Some(solver);
        self
    }

    /// Validate the configuration and build the model.
    pub fn build(self) -> Result<SegfitModel<T>, SegfitError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let library = match self.candidates {
            Some(candidates) => {
                BasisLibrary::new(&candidates, self.exponential_mode.unwrap_or_default())?
            }
            None => BasisLibrary::new(
                BasisLibrary::default().active(),
                self.exponential_mode.unwrap_or_default(),
            )?,
        };
        Validator::validate_candidates(&library)?;

        let threshold = self
            .threshold
            .unwrap_or_else(|| T::from(DEFAULT_THRESHOLD).unwrap());
        Validator::validate_threshold(threshold)?;

        let tolerance = self
            .tolerance
            .unwrap_or_else(|| T::from(DEFAULT_TOLERANCE).unwrap());
        Validator::validate_tolerance(tolerance)?;

        let cv = self.cv.unwrap_or_default();
        Validator::validate_cv(&cv, &library)?;

        Ok(SegfitModel {
            config: SegfitConfig {
                library,
                cv,
                selector: ModelSelector::new(threshold, tolerance),
                solver: self.solver.unwrap_or_default(),
            },
        })
    }
}

// ============================================================================
// Model
// ============================================================================

/// A validated, ready-to-run segmented fit.
#[derive(Debug, Clone, PartialEq)]
pub struct SegfitModel<T> {
    config: SegfitConfig<T>,
}

impl<T: FloatLinalg + Debug> SegfitModel<T> {
    /// Fit every 20-point segment of `points`.
    pub fn fit(&self, points: &[Point<T>]) -> Result<FitReport<T>, SegfitError> {
        Validator::validate_points(points)?;
        SegfitExecutor::run(&self.config, points)
    }

    /// Fit parallel coordinate slices.
    pub fn fit_xy(&self, x: &[T], y: &[T]) -> Result<FitReport<T>, SegfitError> {
        let points = zip_points(x, y)?;
        self.fit(&points)
    }

    /// The active basis library.
    pub fn library(&self) -> &BasisLibrary {
        &self.config.library
    }

    /// The validated configuration.
    pub fn config(&self) -> &SegfitConfig<T> {
        &self.config
    }
}

// ============================================================================
// Orchestration
// ============================================================================

/// Options of one end-to-end run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions<'a> {
    /// Field delimiter of the input file.
    pub delimiter: Option<u8>,
    /// Render an SVG plot to this path.
    pub plot: Option<&'a Path>,
    /// Write the JSON report to this path.
    pub report: Option<&'a Path>,
}

/// Load `path`, fit it with `model` and emit the requested artifacts.
pub fn run<P: AsRef<Path>>(
    path: P,
    model: &SegfitModel<f64>,
    options: &RunOptions<'_>,
) -> Result<FitReport<f64>, SegfitError> {
    let loader = match options.delimiter {
        Some(d) => PointLoader::new().delimiter(d),
        None => PointLoader::new(),
    };
    let points = loader.load(path)?;
    let report = model.fit(&points)?;

    if let Some(report_path) = options.report {
        write_json(report_path, &report)?;
        info!("report written to {}", report_path.display());
    }

    if let Some(plot_path) = options.plot {
        PlotRenderer::default().render(plot_path, &points, &report, model.library())?;
        info!("plot written to {}", plot_path.display());
    }

    Ok(report)
}

//! Execution engine for segmented model selection.
//!
//! ## Purpose
//!
//! This module runs the per-segment pipeline: cross-validate every candidate,
//! select the winner, refit it on the full segment, then aggregate the
//! segment outcomes into a `FitReport`.
//!
//! ## Design notes
//!
//! * **Pure**: Segments are processed independently over borrowed input; no
//!   state survives between runs.
//! * **Sequential**: Segments are fitted in input order.
//! * **Refit**: CV folds only choose the model family; reported coefficients
//!   and SSR come from a fit on all points of the segment.
//!
//! ## Invariants
//!
//! * One outcome per segment, ordered by segment index.
//! * The first failure aborts the run.

use log::{debug, info};

use crate::algorithms::basis::BasisLibrary;
use crate::algorithms::least_squares::{LeastSquares, Solver};
use crate::engine::output::{FitReport, SegmentOutcome};
use crate::engine::selector::ModelSelector;
use crate::evaluation::cv::CVConfig;
use crate::math::linalg::FloatLinalg;
use crate::primitives::errors::SegfitError;
use crate::primitives::segment::{split_segments, Point, Segment};

// ============================================================================
// Configuration
// ============================================================================

/// Validated configuration consumed by the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct SegfitConfig<T> {
    /// Active candidate set.
    pub library: BasisLibrary,
    /// Cross-validation strategy.
    pub cv: CVConfig,
    /// Regularized selection rule.
    pub selector: ModelSelector<T>,
    /// Linear solve strategy.
    pub solver: Solver,
}

// ============================================================================
// Executor
// ============================================================================

/// Stateless driver for the fitting pipeline.
pub struct SegfitExecutor;

impl SegfitExecutor {
    /// Fit all segments of `points`.
    pub fn run<T: FloatLinalg>(
        config: &SegfitConfig<T>,
        points: &[Point<T>],
    ) -> Result<FitReport<T>, SegfitError> {
        let segments = split_segments(points)?;
        info!(
            "fitting {} segments with candidates [{}]",
            segments.len(),
            config
                .library
                .active()
                .iter()
                .map(|k| k.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let outcomes = segments
            .iter()
            .map(|segment| Self::fit_segment(config, segment))
            .collect::<Result<Vec<_>, _>>()?;

        let report = FitReport::from_outcomes(outcomes);
        info!(
            "total reconstruction error {}",
            report.total_error.to_f64().unwrap_or(f64::NAN)
        );
        Ok(report)
    }

    /// Cross-validate, select and refit one segment.
    pub fn fit_segment<T: FloatLinalg>(
        config: &SegfitConfig<T>,
        segment: &Segment<'_, T>,
    ) -> Result<SegmentOutcome<T>, SegfitError> {
        let xs = segment.xs();
        let ys = segment.ys();

        let scores = config.cv.run(&config.library, config.solver, &xs, &ys)?;
        let selection = config.selector.select(&scores)?;

        if selection.regularized {
            debug!(
                "segment {}: {} beat linear by less than the threshold, falling back to linear",
                segment.index, selection.raw_winner
            );
        }

        let refit =
            LeastSquares::fit_basis(&config.library, selection.basis, &xs, &ys, config.solver)?;

        debug!(
            "segment {}: winner {} (cv error {}, refit ssr {})",
            segment.index,
            selection.basis,
            selection.cv_error.to_f64().unwrap_or(f64::NAN),
            refit.ssr.to_f64().unwrap_or(f64::NAN)
        );

        Ok(SegmentOutcome {
            index: segment.index,
            x_range: segment.x_range(),
            basis: selection.basis,
            cv_error: selection.cv_error,
            coefficients: refit.coefficients,
            ssr: refit.ssr,
            regularized: selection.regularized,
            scores: scores.entries,
        })
    }
}

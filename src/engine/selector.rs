//! Regularized model selection.
//!
//! ## Purpose
//!
//! This module picks one winning basis per segment from the cross-validation
//! totals, biased toward the linear model.
//!
//! ## Design notes
//!
//! * **Raw winner**: The candidate with the smallest total error wins; equal
//!   totals resolve by `BasisKind::priority` (lowest wins).
//! * **Linear fallback**: A non-linear raw winner is kept only if its error is
//!   strictly below `threshold * linear_error`; otherwise linear is chosen.
//! * **Noise floor**: Totals at or below `tolerance * Σ(y - ȳ)²` are treated
//!   as exact zeros, so several exact fits tie and fall to the priority order.
//!   A second floor of `(ROUNDOFF_SCALE * ε * max|y|)²` covers flat segments,
//!   whose centered sum of squares is zero.
//!
//! ## Invariants
//!
//! * The selected basis always belongs to the scored candidate set.
//! * Selection is deterministic for a given score table.
//! * Adding a constant to y or rescaling it does not change the selection
//!   unless errors land in rounding noise.

use num_traits::Float;

use crate::algorithms::basis::BasisKind;
use crate::evaluation::cv::{CandidateScore, CvScores};
use crate::primitives::errors::SegfitError;

/// Default regularization strength.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Default noise floor for CV totals, relative to the segment's spread.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Multiple of `ε * max|y|` below which a residual is rounding noise.
pub const ROUNDOFF_SCALE: f64 = 2000.0;

/// Winner of one segment's selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<T> {
    /// Selected basis.
    pub basis: BasisKind,
    /// Total held-out error of the selected basis.
    pub cv_error: T,
    /// Candidate with the minimum error before regularization.
    pub raw_winner: BasisKind,
    /// Whether the linear fallback overrode the raw winner.
    pub regularized: bool,
}

/// Applies the linear-preference rule to CV totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSelector<T> {
    threshold: T,
    tolerance: T,
}

impl<T: Float> Default for ModelSelector<T> {
    fn default() -> Self {
        Self::new(
            T::from(DEFAULT_THRESHOLD).unwrap(),
            T::from(DEFAULT_TOLERANCE).unwrap(),
        )
    }
}

impl<T: Float> ModelSelector<T> {
    /// Create a selector; parameters are validated by the builder.
    pub fn new(threshold: T, tolerance: T) -> Self {
        Self {
            threshold,
            tolerance,
        }
    }

    /// Regularization strength.
    pub fn threshold(&self) -> T {
        self.threshold
    }

    /// Relative noise floor.
    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    /// Pick the winning basis from `scores`.
    pub fn select(&self, scores: &CvScores<T>) -> Result<Selection<T>, SegfitError> {
        let mut ordered: Vec<CandidateScore<T>> = scores.entries.clone();
        ordered.sort_by_key(|s| s.basis.priority());

        for s in &ordered {
            if !s.error.is_finite() {
                return Err(SegfitError::InvalidNumericValue(format!(
                    "cv error of {}={}",
                    s.basis,
                    s.error.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        let roundoff = T::from(ROUNDOFF_SCALE).unwrap() * T::epsilon() * scores.peak.abs();
        let floor = (self.tolerance * scores.spread.abs()).max(roundoff * roundoff);
        let snap = |e: T| if e <= floor { T::zero() } else { e };

        let (first, rest) = ordered.split_first().ok_or_else(|| {
            SegfitError::InvalidCandidateSet("no candidates were scored".to_string())
        })?;

        // Strict comparison keeps the earlier (higher-priority) candidate on ties.
        let mut best = *first;
        let mut best_error = snap(first.error);
        for s in rest {
            let e = snap(s.error);
            if e < best_error {
                best = *s;
                best_error = e;
            }
        }

        if best.basis == BasisKind::Linear {
            return Ok(Selection {
                basis: BasisKind::Linear,
                cv_error: best.error,
                raw_winner: BasisKind::Linear,
                regularized: false,
            });
        }

        let linear = ordered
            .iter()
            .find(|s| s.basis == BasisKind::Linear)
            .ok_or_else(|| {
                SegfitError::InvalidCandidateSet("linear fallback was not scored".to_string())
            })?;

        if best_error < self.threshold * snap(linear.error) {
            Ok(Selection {
                basis: best.basis,
                cv_error: best.error,
                raw_winner: best.basis,
                regularized: false,
            })
        } else {
            Ok(Selection {
                basis: BasisKind::Linear,
                cv_error: linear.error,
                raw_winner: best.basis,
                regularized: true,
            })
        }
    }
}

//! Cross-validation for candidate model selection.
//!
//! ## Purpose
//!
//! This module estimates each candidate basis' out-of-sample error on one
//! segment. Exhaustive leave-one-out is the default; k-fold, a single
//! random hold-out split, and plain in-sample scoring are available as
//! configuration variants of the same fold loop.
//!
//! ## Design notes
//!
//! * **Fold plans**: Every strategy reduces to a list of test-index sets. The
//!   training set of a fold is the complement of its test set, in input order.
//! * **Summed error**: Squared held-out residuals are summed over all folds,
//!   never averaged.
//! * **Shuffling**: K-fold shuffles indices with a seeded `StdRng` when a seed
//!   is given and otherwise keeps contiguous folds in input order. Hold-out
//!   always shuffles, falling back to `DEFAULT_HOLDOUT_SEED`.
//!
//! ## Key concepts
//!
//! * **LOOCV**: n folds, each holding out a single point.
//! * **K-Fold**: k nearly equal folds; the last one absorbs the remainder.
//! * **Hold-out**: one fold of `round(n * fraction)` test points.
//! * **In-sample**: one fold that trains and tests on all points.
//!
//! ## Invariants
//!
//! * Training and test sets are disjoint in each fold (except in-sample).
//! * Every training set has at least as many points as the largest candidate
//!   has terms.
//!
//! ## Non-goals
//!
//! * This module does not pick the winner (see `engine::selector`).

use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::algorithms::basis::{BasisKind, BasisLibrary};
use crate::algorithms::least_squares::{sum_squared_residuals, LeastSquares, Solver};
use crate::math::linalg::FloatLinalg;
use crate::primitives::errors::SegfitError;

/// Seed used by hold-out splits configured without one.
pub const DEFAULT_HOLDOUT_SEED: u64 = 0x5EF1;

// ============================================================================
// CV Kind
// ============================================================================

/// Cross-validation strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CVKind {
    /// Leave-one-out cross-validation.
    #[allow(clippy::upper_case_acronyms)]
    LOOCV,
    /// K-fold cross-validation with k folds.
    KFold(usize),
    /// Single train/test split holding out the given fraction.
    HoldOut(f64),
    /// No cross-validation: score each fit on its own training points.
    InSample,
}

// ============================================================================
// Cross-Validation Configuration
// ============================================================================

/// Cross-validation configuration combining strategy and seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CVConfig {
    /// The CV strategy kind.
    pub(crate) kind: CVKind,
    /// Shuffle seed; only k-fold and hold-out read it.
    pub(crate) seed: Option<u64>,
}

impl Default for CVConfig {
    fn default() -> Self {
        LOOCV()
    }
}

impl CVConfig {
    /// Set the seed used to shuffle indices before fold assignment.
    ///
    /// LOOCV and in-sample scoring ignore it. An unseeded hold-out split uses
    /// `DEFAULT_HOLDOUT_SEED`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configured strategy.
    pub fn kind(&self) -> CVKind {
        self.kind
    }

    /// The configured seed, if any.
    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Run the configured strategy on one segment.
    pub fn run<T: FloatLinalg>(
        &self,
        library: &BasisLibrary,
        solver: Solver,
        xs: &[T],
        ys: &[T],
    ) -> Result<CvScores<T>, SegfitError> {
        self.kind.run(library, solver, xs, ys, self.seed)
    }
}

/// Hold out each point of the segment in turn.
#[allow(non_snake_case)]
pub fn LOOCV() -> CVConfig {
    CVConfig {
        kind: CVKind::LOOCV,
        seed: None,
    }
}

/// Split the segment into `k` folds.
#[allow(non_snake_case)]
pub fn KFold(k: usize) -> CVConfig {
    CVConfig {
        kind: CVKind::KFold(k),
        seed: None,
    }
}

/// Score on one shuffled split holding out `test_fraction` of the points.
#[allow(non_snake_case)]
pub fn HoldOut(test_fraction: f64) -> CVConfig {
    CVConfig {
        kind: CVKind::HoldOut(test_fraction),
        seed: None,
    }
}

/// Score each fit on the points it was trained on.
#[allow(non_snake_case)]
pub fn InSample() -> CVConfig {
    CVConfig {
        kind: CVKind::InSample,
        seed: None,
    }
}

// ============================================================================
// Scores
// ============================================================================

/// Accumulated held-out error of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateScore<T> {
    /// Candidate basis.
    pub basis: BasisKind,
    /// Sum of squared held-out residuals over all folds.
    pub error: T,
}

/// Per-candidate cross-validation totals for one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CvScores<T> {
    /// One entry per active candidate, in priority order.
    pub entries: Vec<CandidateScore<T>>,
    /// Centered sum of squares `Σ (y - ȳ)²` of the segment.
    pub spread: T,
    /// Largest `|y|` of the segment; bounds the rounding noise of a fit.
    pub peak: T,
}

impl<T: Copy> CvScores<T> {
    /// Build scores from `(basis, error)` pairs.
    pub fn new(entries: &[(BasisKind, T)], spread: T, peak: T) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|&(basis, error)| CandidateScore { basis, error })
                .collect(),
            spread,
            peak,
        }
    }

    /// Total error of `basis`, if it was scored.
    pub fn error_of(&self, basis: BasisKind) -> Option<T> {
        self.entries
            .iter()
            .find(|s| s.basis == basis)
            .map(|s| s.error)
    }
}

// ============================================================================
// Cross-Validation Execution
// ============================================================================

impl CVKind {
    // ========================================================================
    // Public API
    // ========================================================================

    /// Run cross-validation, returning summed held-out error per candidate.
    pub fn run<T: FloatLinalg>(
        self,
        library: &BasisLibrary,
        solver: Solver,
        xs: &[T],
        ys: &[T],
        seed: Option<u64>,
    ) -> Result<CvScores<T>, SegfitError> {
        if xs.len() != ys.len() {
            return Err(SegfitError::MismatchedInputs {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }

        let n = xs.len();
        let folds = self.fold_plan(n, seed)?;
        let max_terms = library.max_terms();

        let mut totals = vec![T::zero(); library.active().len()];
        let mut train_x = Vec::with_capacity(n);
        let mut train_y = Vec::with_capacity(n);
        let mut in_test = vec![false; n];

        for (fold_idx, test) in folds.iter().enumerate() {
            in_test.iter_mut().for_each(|flag| *flag = false);
            for &i in test {
                in_test[i] = true;
            }

            // In-sample folds train on everything they test on.
            let train_all = matches!(self, CVKind::InSample);
            train_x.clear();
            train_y.clear();
            for j in 0..n {
                if train_all || !in_test[j] {
                    train_x.push(xs[j]);
                    train_y.push(ys[j]);
                }
            }

            if train_x.len() < max_terms {
                return Err(SegfitError::TooFewPoints {
                    got: train_x.len(),
                    min: max_terms,
                });
            }

            let (test_x, test_y) = Self::build_subset_from_indices(xs, ys, test);

            for (slot, &kind) in totals.iter_mut().zip(library.active()) {
                let fit = LeastSquares::fit_basis(library, kind, &train_x, &train_y, solver)?;
                let predicted = library.evaluate(&fit.coefficients, kind, &test_x)?;
                let error = sum_squared_residuals(&predicted, &test_y);
                trace!(
                    "fold {fold_idx}: {kind} held-out error {}",
                    error.to_f64().unwrap_or(f64::NAN)
                );
                *slot = *slot + error;
            }
        }

        let count = T::from(n).unwrap();
        let mean = ys.iter().fold(T::zero(), |acc, &y| acc + y) / count;
        let spread = ys.iter().fold(T::zero(), |acc, &y| acc + (y - mean) * (y - mean));
        let peak = ys.iter().fold(T::zero(), |acc, &y| acc.max(y.abs()));
        let entries = library
            .active()
            .iter()
            .zip(totals)
            .map(|(&basis, error)| CandidateScore { basis, error })
            .collect();

        Ok(CvScores {
            entries,
            spread,
            peak,
        })
    }

    // ========================================================================
    // Utility Methods
    // ========================================================================

    /// Build a data subset from a list of indices.
    pub fn build_subset_from_indices<T: Copy>(
        x: &[T],
        y: &[T],
        indices: &[usize],
    ) -> (Vec<T>, Vec<T>) {
        indices.iter().map(|&i| (x[i], y[i])).unzip()
    }

    /// Test-index sets for `n` points.
    pub fn fold_plan(self, n: usize, seed: Option<u64>) -> Result<Vec<Vec<usize>>, SegfitError> {
        if n == 0 {
            return Err(SegfitError::TooFewPoints { got: 0, min: 1 });
        }

        match self {
            CVKind::LOOCV => Ok((0..n).map(|i| vec![i]).collect()),
            CVKind::InSample => Ok(vec![(0..n).collect()]),
            CVKind::KFold(k) => {
                if k < 2 || k > n {
                    return Err(SegfitError::InvalidFolds { k, n });
                }
                let indices = Self::shuffled_indices(n, seed);
                let fold_size = n / k;
                Ok((0..k)
                    .map(|fold| {
                        let start = fold * fold_size;
                        // Last fold includes remainder
                        let end = if fold == k - 1 { n } else { start + fold_size };
                        indices[start..end].to_vec()
                    })
                    .collect())
            }
            CVKind::HoldOut(fraction) => {
                if !fraction.is_finite() || fraction <= 0.0 || fraction >= 1.0 {
                    return Err(SegfitError::InvalidTestFraction(fraction));
                }
                if n < 2 {
                    return Err(SegfitError::TooFewPoints { got: n, min: 2 });
                }
                let seed = seed.unwrap_or(DEFAULT_HOLDOUT_SEED);
                let indices = Self::shuffled_indices(n, Some(seed));
                let n_test = ((n as f64 * fraction).round() as usize).clamp(1, n - 1);
                Ok(vec![indices[..n_test].to_vec()])
            }
        }
    }

    fn shuffled_indices(n: usize, seed: Option<u64>) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..n).collect();
        if let Some(s) = seed {
            indices.shuffle(&mut StdRng::seed_from_u64(s));
        }
        indices
    }
}

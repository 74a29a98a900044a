//! Candidate basis functions.
//!
//! ## Purpose
//!
//! This module defines the closed set of candidate models and, for each one,
//! how to build a design-matrix row from a raw x-value and how to evaluate a
//! fitted coefficient vector at arbitrary x.
//!
//! ## Design notes
//!
//! * **Tagged dispatch**: Candidates are a `BasisKind` enum; every builder and
//!   evaluator matches exhaustively on it.
//! * **Active set**: A `BasisLibrary` fixes which candidates compete and how
//!   the exponential basis is composed. Tags outside the active set are
//!   rejected with `InvalidModelTag`.
//! * **Priority order**: The active set is kept sorted by `BasisKind::priority`
//!   so every consumer iterates candidates simplest-first.
//!
//! ## Key concepts
//!
//! | Tag           | Row                                   | Terms |
//! |---------------|---------------------------------------|-------|
//! | `Linear`      | `[1, x]`                              | 2     |
//! | `Quadratic`   | `[1, x, x²]`                          | 3     |
//! | `Cubic`       | `[1, x, x², x³]`                      | 4     |
//! | `Sine`        | `[1, sin(x)]`                         | 2     |
//! | `Exponential` | `[1, exp(x)]` or `[1, x, x², x³, exp(x)]` | 2 / 5 |
//!
//! ## Non-goals
//!
//! * This module does not solve for coefficients (see `least_squares`).
//! * This module does not accept user-defined basis functions.

use std::fmt::{Display, Formatter};

use num_traits::Float;
use serde::Serialize;

use crate::primitives::errors::SegfitError;

// ============================================================================
// Basis Kind
// ============================================================================

/// Tag of a candidate model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BasisKind {
    /// `c0 + c1 x`
    Linear,

    /// `c0 + c1 x + c2 x²`
    Quadratic,

    /// `c0 + c1 x + c2 x² + c3 x³`
    Cubic,

    /// `c0 + c1 sin(x)`
    Sine,

    /// `c0 + c1 exp(x)`, optionally sharing the cubic terms.
    Exponential,
}

impl BasisKind {
    /// Every tag, in priority order.
    pub const ALL: [BasisKind; 5] = [
        BasisKind::Linear,
        BasisKind::Quadratic,
        BasisKind::Cubic,
        BasisKind::Sine,
        BasisKind::Exponential,
    ];

    /// Tie-break rank: lower wins among equal errors.
    #[inline]
    pub const fn priority(&self) -> usize {
        match self {
            BasisKind::Linear => 0,
            BasisKind::Quadratic => 1,
            BasisKind::Cubic => 2,
            BasisKind::Sine => 3,
            BasisKind::Exponential => 4,
        }
    }

    /// Lowercase name used on the command line and in reports.
    pub const fn name(&self) -> &'static str {
        match self {
            BasisKind::Linear => "linear",
            BasisKind::Quadratic => "quadratic",
            BasisKind::Cubic => "cubic",
            BasisKind::Sine => "sine",
            BasisKind::Exponential => "exponential",
        }
    }
}

impl Display for BasisKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Exponential Composition
// ============================================================================

/// How the exponential candidate composes its design row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExponentialMode {
    /// `[1, exp(x)]`
    #[default]
    Isolated,

    /// `[1, x, x², x³, exp(x)]`
    WithCubic,
}

// ============================================================================
// Design Matrix
// ============================================================================

/// Row-major design matrix: one row of basis terms per x-value.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix<T> {
    /// Number of observations.
    pub rows: usize,
    /// Number of basis terms.
    pub cols: usize,
    /// `rows * cols` entries, row-major.
    pub data: Vec<T>,
}

impl<T: Copy> DesignMatrix<T> {
    /// Borrow row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
}

// ============================================================================
// Basis Library
// ============================================================================

/// The active candidate set together with its basis composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasisLibrary {
    active: Vec<BasisKind>,
    exponential_mode: ExponentialMode,
}

impl Default for BasisLibrary {
    /// Linear, cubic and sine: the default candidate set.
    fn default() -> Self {
        Self {
            active: vec![BasisKind::Linear, BasisKind::Cubic, BasisKind::Sine],
            exponential_mode: ExponentialMode::default(),
        }
    }
}

impl BasisLibrary {
    /// Build a library from a candidate list.
    ///
    /// Duplicates collapse and candidates are reordered by priority. The set
    /// must be non-empty; the linear fallback requirement is enforced by the
    /// builder, not here.
    pub fn new(candidates: &[BasisKind], mode: ExponentialMode) -> Result<Self, SegfitError> {
        if candidates.is_empty() {
            return Err(SegfitError::InvalidCandidateSet(
                "at least one candidate is required".to_string(),
            ));
        }

        let mut active = candidates.to_vec();
        active.sort_by_key(BasisKind::priority);
        active.dedup();

        Ok(Self {
            active,
            exponential_mode: mode,
        })
    }

    /// Active candidates in priority order.
    pub fn active(&self) -> &[BasisKind] {
        &self.active
    }

    /// Exponential composition in effect.
    pub fn exponential_mode(&self) -> ExponentialMode {
        self.exponential_mode
    }

    /// Whether `kind` is in the active set.
    pub fn contains(&self, kind: BasisKind) -> bool {
        self.active.contains(&kind)
    }

    /// Number of basis terms (design-matrix columns) for `kind`.
    pub fn num_terms(&self, kind: BasisKind) -> Result<usize, SegfitError> {
        self.check_active(kind)?;
        Ok(self.terms_unchecked(kind))
    }

    /// Largest number of terms across the active set.
    pub fn max_terms(&self) -> usize {
        self.active
            .iter()
            .map(|&k| self.terms_unchecked(k))
            .max()
            .unwrap_or(0)
    }

    /// Map every x to its feature row.
    pub fn design_matrix<T: Float>(
        &self,
        xs: &[T],
        kind: BasisKind,
    ) -> Result<DesignMatrix<T>, SegfitError> {
        let cols = self.num_terms(kind)?;
        let mut data = vec![T::zero(); xs.len() * cols];
        for (row, &x) in data.chunks_exact_mut(cols).zip(xs) {
            self.build_terms(kind, x, row);
        }
        Ok(DesignMatrix {
            rows: xs.len(),
            cols,
            data,
        })
    }

    /// Evaluate a fitted model at every x.
    pub fn evaluate<T: Float>(
        &self,
        coefficients: &[T],
        kind: BasisKind,
        xs: &[T],
    ) -> Result<Vec<T>, SegfitError> {
        let cols = self.num_terms(kind)?;
        if coefficients.len() != cols {
            return Err(SegfitError::InvalidCoefficients {
                expected: cols,
                got: coefficients.len(),
            });
        }

        let mut terms = vec![T::zero(); cols];
        Ok(xs
            .iter()
            .map(|&x| {
                self.build_terms(kind, x, &mut terms);
                terms
                    .iter()
                    .zip(coefficients)
                    .fold(T::zero(), |acc, (&t, &c)| acc + t * c)
            })
            .collect())
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn check_active(&self, kind: BasisKind) -> Result<(), SegfitError> {
        if self.contains(kind) {
            Ok(())
        } else {
            Err(SegfitError::InvalidModelTag(kind))
        }
    }

    fn terms_unchecked(&self, kind: BasisKind) -> usize {
        match kind {
            BasisKind::Linear | BasisKind::Sine => 2,
            BasisKind::Quadratic => 3,
            BasisKind::Cubic => 4,
            BasisKind::Exponential => match self.exponential_mode {
                ExponentialMode::Isolated => 2,
                ExponentialMode::WithCubic => 5,
            },
        }
    }

    /// Fill `terms` with the feature row of `x`; `terms.len()` must equal the
    /// basis' term count.
    fn build_terms<T: Float>(&self, kind: BasisKind, x: T, terms: &mut [T]) {
        terms[0] = T::one();
        match kind {
            BasisKind::Linear => terms[1] = x,
            BasisKind::Sine => terms[1] = x.sin(),
            BasisKind::Quadratic => {
                terms[1] = x;
                terms[2] = x * x;
            }
            BasisKind::Cubic => {
                terms[1] = x;
                terms[2] = x * x;
                terms[3] = x * x * x;
            }
            BasisKind::Exponential => match self.exponential_mode {
                ExponentialMode::Isolated => terms[1] = x.exp(),
                ExponentialMode::WithCubic => {
                    terms[1] = x;
                    terms[2] = x * x;
                    terms[3] = x * x * x;
                    terms[4] = x.exp();
                }
            },
        }
    }
}

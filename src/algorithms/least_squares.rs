//! Ordinary least squares over a basis design matrix.
//!
//! ## Purpose
//!
//! This module computes the closed-form OLS coefficient vector for a design
//! matrix and target values, and scores a fit by its sum of squared residuals.
//!
//! ## Design notes
//!
//! * **Solver choice**: `Svd` factors `X` directly; `NormalEquations` solves
//!   `(XᵗX)c = Xᵗy` through an explicit inverse. Both fail the same way on a
//!   rank-deficient design.
//! * **No regularization**: Near-singular systems are not damped; the failure
//!   is surfaced as `SingularDesignMatrix`.
//!
//! ## Invariants
//!
//! * The design matrix has at least as many rows as columns.
//! * The returned coefficient vector has one entry per column.

use num_traits::Float;
use serde::Serialize;

use crate::algorithms::basis::{BasisKind, BasisLibrary, DesignMatrix};
use crate::math::linalg::FloatLinalg;
use crate::primitives::errors::SegfitError;

// ============================================================================
// Solver
// ============================================================================

/// Linear solve strategy for the least-squares problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Solver {
    /// SVD of the design matrix (default).
    #[default]
    Svd,

    /// Explicit inverse of `XᵗX`.
    NormalEquations,
}

// ============================================================================
// Fit Result
// ============================================================================

/// Outcome of fitting one basis to one set of points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult<T> {
    /// Basis that was fitted.
    pub basis: BasisKind,
    /// One coefficient per basis term.
    pub coefficients: Vec<T>,
    /// Sum of squared residuals on the fitted points.
    pub ssr: T,
}

// ============================================================================
// Least Squares Fitter
// ============================================================================

/// Closed-form ordinary least squares.
pub struct LeastSquares;

impl LeastSquares {
    /// Solve for the coefficient vector minimising `||Xc - y||²`.
    pub fn fit<T: FloatLinalg>(
        design: &DesignMatrix<T>,
        y: &[T],
        solver: Solver,
    ) -> Result<Vec<T>, SegfitError> {
        if design.rows != y.len() {
            return Err(SegfitError::MismatchedInputs {
                x_len: design.rows,
                y_len: y.len(),
            });
        }
        if design.rows < design.cols {
            return Err(SegfitError::SingularDesignMatrix {
                rows: design.rows,
                cols: design.cols,
            });
        }

        let solution = match solver {
            Solver::Svd => T::solve_svd(&design.data, y, design.rows, design.cols),
            Solver::NormalEquations => T::solve_normal(&design.data, y, design.rows, design.cols),
        };

        solution.ok_or(SegfitError::SingularDesignMatrix {
            rows: design.rows,
            cols: design.cols,
        })
    }

    /// Fit `kind` to `(xs, ys)` and score it on the same points.
    pub fn fit_basis<T: FloatLinalg>(
        library: &BasisLibrary,
        kind: BasisKind,
        xs: &[T],
        ys: &[T],
        solver: Solver,
    ) -> Result<FitResult<T>, SegfitError> {
        let design = library.design_matrix(xs, kind)?;
        let coefficients = Self::fit(&design, ys, solver)?;
        let predicted = library.evaluate(&coefficients, kind, xs)?;
        let ssr = sum_squared_residuals(&predicted, ys);

        Ok(FitResult {
            basis: kind,
            coefficients,
            ssr,
        })
    }
}

/// `Σ (predicted - actual)²`
pub fn sum_squared_residuals<T: Float>(predicted: &[T], actual: &[T]) -> T {
    predicted
        .iter()
        .zip(actual)
        .fold(T::zero(), |acc, (&p, &a)| {
            let r = p - a;
            acc + r * r
        })
}

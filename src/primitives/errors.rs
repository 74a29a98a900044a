//! Error types for segmented model selection.
//!
//! ## Purpose
//!
//! This module defines every error condition that can occur while loading
//! points, splitting them into segments, fitting candidate bases and
//! rendering the results.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include the relevant values (line numbers, matrix
//!   shapes, offending parameters).
//! * **Fatal**: There is no partial-success mode; the first error aborts a run.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`.
//!
//! ## Key concepts
//!
//! 1. **Input errors**: Malformed files, unreadable paths, bad point counts.
//! 2. **Numerical errors**: Rank-deficient design matrices, non-finite values.
//! 3. **Configuration errors**: Invalid thresholds, folds, candidate sets.
//! 4. **Programming errors**: Tags outside the active basis set.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or retries.

use std::error::Error;
use std::fmt::{Display, Formatter, Result};

use crate::algorithms::basis::BasisKind;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for segmented fitting operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SegfitError {
    /// A row of the input file has the wrong column count or a non-numeric field.
    MalformedInputFile {
        /// 1-based line number of the offending row.
        line: u64,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// The input file (or an output path) could not be opened.
    Io {
        /// Path that failed.
        path: String,
        /// Underlying IO error message.
        message: String,
    },

    /// The point count is zero or not a multiple of the segment length.
    InvalidSegmentCount {
        /// Number of points provided.
        got: usize,
        /// Required segment length.
        segment_len: usize,
    },

    /// `XᵗX` is singular (too few distinct x-values for the basis).
    SingularDesignMatrix {
        /// Number of rows in the design matrix.
        rows: usize,
        /// Number of columns (basis terms) in the design matrix.
        cols: usize,
    },

    /// A basis tag outside the active candidate set was requested.
    InvalidModelTag(BasisKind),

    /// A coefficient vector does not match the basis' number of terms.
    InvalidCoefficients {
        /// Number of terms of the basis.
        expected: usize,
        /// Number of coefficients supplied.
        got: usize,
    },

    /// `x` and `y` arrays must have the same number of elements.
    MismatchedInputs {
        /// Number of elements in the `x` array.
        x_len: usize,
        /// Number of elements in the `y` array.
        y_len: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// A training subset has fewer points than a candidate has terms.
    TooFewPoints {
        /// Number of points provided.
        got: usize,
        /// Minimum required points.
        min: usize,
    },

    /// The candidate set is empty or lacks the linear fallback.
    InvalidCandidateSet(String),

    /// Regularization threshold must be in (0, 1].
    InvalidThreshold(f64),

    /// Noise-floor tolerance must be finite and non-negative.
    InvalidTolerance(f64),

    /// K-fold cross-validation needs 2 <= k <= n.
    InvalidFolds {
        /// Number of folds requested.
        k: usize,
        /// Number of points per segment.
        n: usize,
    },

    /// Hold-out fraction must be strictly between 0 and 1.
    InvalidTestFraction(f64),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// Rendering the plot failed.
    PlotFailed(String),

    /// Writing the JSON report failed.
    ReportFailed(String),
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for SegfitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::MalformedInputFile { line, reason } => {
                write!(f, "Malformed input file at line {line}: {reason}")
            }
            Self::Io { path, message } => write!(f, "Cannot access '{path}': {message}"),
            Self::InvalidSegmentCount { got, segment_len } => {
                write!(
                    f,
                    "Invalid point count: {got} (must be a positive multiple of {segment_len})"
                )
            }
            Self::SingularDesignMatrix { rows, cols } => {
                write!(
                    f,
                    "Singular design matrix: {rows}x{cols} system is rank deficient"
                )
            }
            Self::InvalidModelTag(kind) => {
                write!(f, "Model '{kind}' is not in the active candidate set")
            }
            Self::InvalidCoefficients { expected, got } => {
                write!(f, "Invalid coefficients: got {got}, basis has {expected} terms")
            }
            Self::MismatchedInputs { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} points, y has {y_len}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::TooFewPoints { got, min } => {
                write!(f, "Too few points: got {got}, need at least {min}")
            }
            Self::InvalidCandidateSet(msg) => write!(f, "Invalid candidate set: {msg}"),
            Self::InvalidThreshold(t) => {
                write!(f, "Invalid threshold: {t} (must be > 0 and <= 1)")
            }
            Self::InvalidTolerance(tol) => {
                write!(f, "Invalid tolerance: {tol} (must be >= 0 and finite)")
            }
            Self::InvalidFolds { k, n } => {
                write!(f, "Invalid folds: {k} (must be between 2 and {n})")
            }
            Self::InvalidTestFraction(frac) => {
                write!(f, "Invalid test fraction: {frac} (must be > 0 and < 1)")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
            Self::PlotFailed(msg) => write!(f, "Plot rendering failed: {msg}"),
            Self::ReportFailed(msg) => write!(f, "Report writing failed: {msg}"),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for SegfitError {}

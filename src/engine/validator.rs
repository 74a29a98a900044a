//! Input validation for segmented fitting configuration and data.
//!
//! ## Purpose
//!
//! This module checks builder parameters and input data before any fitting
//! starts, so configuration mistakes surface once instead of per segment.
//!
//! ## Design notes
//!
//! * Parameter checks run once in `SegfitBuilder::build`; point checks run on
//!   every `fit` before the input is split.
//! * CV strategies are checked against a full 20-point segment, so a fold
//!   plan that would starve the largest basis fails at build time.
//!
//! ## Invariants
//!
//! * A model that passed `build` never fails with `TooFewPoints` mid-run.
//! * The first violated constraint is the one reported.

use num_traits::Float;

use crate::algorithms::basis::{BasisKind, BasisLibrary};
use crate::evaluation::cv::{CVConfig, CVKind};
use crate::primitives::errors::SegfitError;
use crate::primitives::segment::{Point, SEGMENT_LEN};

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for configuration and input data.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate a point sequence: finite values, positive multiple of the segment length.
    pub fn validate_points<T: Float>(points: &[Point<T>]) -> Result<(), SegfitError> {
        if points.is_empty() || points.len() % SEGMENT_LEN != 0 {
            return Err(SegfitError::InvalidSegmentCount {
                got: points.len(),
                segment_len: SEGMENT_LEN,
            });
        }

        for (i, p) in points.iter().enumerate() {
            if !p.x.is_finite() {
                return Err(SegfitError::InvalidNumericValue(format!(
                    "x[{}]={}",
                    i,
                    p.x.to_f64().unwrap_or(f64::NAN)
                )));
            }
            if !p.y.is_finite() {
                return Err(SegfitError::InvalidNumericValue(format!(
                    "y[{}]={}",
                    i,
                    p.y.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the regularization threshold.
    pub fn validate_threshold<T: Float>(threshold: T) -> Result<(), SegfitError> {
        if !threshold.is_finite() || threshold <= T::zero() || threshold > T::one() {
            return Err(SegfitError::InvalidThreshold(
                threshold.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the noise-floor tolerance.
    pub fn validate_tolerance<T: Float>(tolerance: T) -> Result<(), SegfitError> {
        if !tolerance.is_finite() || tolerance < T::zero() {
            return Err(SegfitError::InvalidTolerance(
                tolerance.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// The linear model is the regularization fallback and must compete.
    pub fn validate_candidates(library: &BasisLibrary) -> Result<(), SegfitError> {
        if !library.contains(BasisKind::Linear) {
            return Err(SegfitError::InvalidCandidateSet(
                "the linear candidate is required as the regularization fallback".to_string(),
            ));
        }
        Ok(())
    }

    /// Check that every fold of `cv` leaves enough training points on a segment.
    pub fn validate_cv(cv: &CVConfig, library: &BasisLibrary) -> Result<(), SegfitError> {
        let folds = cv.kind().fold_plan(SEGMENT_LEN, cv.get_seed())?;
        let min = library.max_terms();

        for test in &folds {
            let got = match cv.kind() {
                CVKind::InSample => SEGMENT_LEN,
                _ => SEGMENT_LEN - test.len(),
            };
            if got < min {
                return Err(SegfitError::TooFewPoints { got, min });
            }
        }
        Ok(())
    }

    /// Validate that no parameter was set multiple times.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), SegfitError> {
        if let Some(parameter) = duplicate_param {
            return Err(SegfitError::DuplicateParameter { parameter });
        }
        Ok(())
    }
}

//! Output types for segmented fitting runs.
//!
//! ## Purpose
//!
//! This module defines `SegmentOutcome`, the per-segment selection record,
//! and `FitReport`, the ordered collection of outcomes plus the total
//! reconstruction error.
//!
//! ## Design notes
//!
//! * **Serializable**: Both types derive `Serialize` for the JSON report.
//! * **Ergonomics**: `FitReport` implements `Display` as a summary table with
//!   one CV column per scored candidate.
//!
//! ## Invariants
//!
//! * Outcomes are ordered by segment index.
//! * `total_error` equals the sum of the outcomes' `ssr`.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations beyond simple aggregation.

use std::fmt::{Display, Formatter, Result};

use num_traits::Float;
use serde::Serialize;

use crate::algorithms::basis::BasisKind;
use crate::evaluation::cv::CandidateScore;

// ============================================================================
// Segment Outcome
// ============================================================================

/// Selection and refit result for one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentOutcome<T> {
    /// Position of the segment in the input.
    pub index: usize,
    /// Smallest and largest x-value of the segment.
    pub x_range: (T, T),
    /// Winning basis.
    pub basis: BasisKind,
    /// Total held-out CV error of the winning basis.
    pub cv_error: T,
    /// Coefficients of the winning basis refitted on the full segment.
    pub coefficients: Vec<T>,
    /// Sum of squared residuals of the refit on the full segment.
    pub ssr: T,
    /// Whether the linear fallback overrode a lower-error candidate.
    pub regularized: bool,
    /// CV totals of every candidate, in priority order.
    pub scores: Vec<CandidateScore<T>>,
}

// ============================================================================
// Fit Report
// ============================================================================

/// Result of a full run over all segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport<T> {
    /// One outcome per segment, in input order.
    pub segments: Vec<SegmentOutcome<T>>,
    /// Sum of the refit SSR over all segments.
    pub total_error: T,
}

impl<T: Float> FitReport<T> {
    /// Assemble a report, summing the per-segment errors.
    pub fn from_outcomes(segments: Vec<SegmentOutcome<T>>) -> Self {
        let total_error = segments.iter().fold(T::zero(), |acc, s| acc + s.ssr);
        Self {
            segments,
            total_error,
        }
    }

    /// Winning basis of every segment, in order.
    pub fn winners(&self) -> Vec<BasisKind> {
        self.segments.iter().map(|s| s.basis).collect()
    }

    /// Number of segments won by `basis`.
    pub fn count_of(&self, basis: BasisKind) -> usize {
        self.segments.iter().filter(|s| s.basis == basis).count()
    }
}

impl<T: Float + Display> Display for FitReport<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Segments:    {}", self.segments.len())?;
        writeln!(f, "  Total error: {}", self.total_error)?;
        for kind in BasisKind::ALL {
            let count = self.count_of(kind);
            if count > 0 {
                writeln!(f, "  {:<12} {}", format!("{kind}:"), count)?;
            }
        }
        writeln!(f)?;

        // Every segment scores the same candidates.
        let candidates: Vec<BasisKind> = self
            .segments
            .first()
            .map(|s| s.scores.iter().map(|c| c.basis).collect())
            .unwrap_or_default();

        writeln!(f, "Segments:")?;
        write!(
            f,
            "{:>6} {:>10} {:>10} {:>12} {:>14} {:>14}",
            "Index", "X_min", "X_max", "Model", "CV_error", "SSR"
        )?;
        for kind in &candidates {
            write!(f, " {:>14}", format!("CV_{kind}"))?;
        }
        writeln!(f)?;
        writeln!(f, "  {}", "-".repeat(70 + 15 * candidates.len()))?;
        for s in &self.segments {
            let marker = if s.regularized { "*" } else { "" };
            write!(
                f,
                "{:>6} {:>10.3} {:>10.3} {:>12} {:>14.6e} {:>14.6e}",
                s.index,
                s.x_range.0.to_f64().unwrap_or(f64::NAN),
                s.x_range.1.to_f64().unwrap_or(f64::NAN),
                format!("{}{}", s.basis, marker),
                s.cv_error.to_f64().unwrap_or(f64::NAN),
                s.ssr.to_f64().unwrap_or(f64::NAN),
            )?;
            for score in &s.scores {
                write!(f, " {:>14.6e}", score.error.to_f64().unwrap_or(f64::NAN))?;
            }
            writeln!(f)?;
        }

        if self.segments.iter().any(|s| s.regularized) {
            writeln!(f)?;
            writeln!(f, "  * linear fallback applied by regularization")?;
        }
        Ok(())
    }
}

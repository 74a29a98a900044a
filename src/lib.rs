//! # segfit: cross-validated piecewise model selection for Rust
//!
//! Fits piecewise regression models to an ordered sequence of 2-D points.
//! The sequence is cut into contiguous 20-point segments; on every segment a
//! small closed set of candidate basis functions competes, the winner is
//! chosen by leave-one-out cross-validation with a regularization rule that
//! favours the linear model, and the winner is refitted on the whole segment.
//! The total reconstruction error is the sum of the refit residuals.
//!
//! ## How it works
//!
//! 1. Split the points into segments of exactly 20 points (input order).
//! 2. For every held-out point, fit each candidate on the other 19 by
//!    ordinary least squares and accumulate the squared held-out residual.
//! 3. Take the candidate with the smallest total; keep it only if its total
//!    is below `0.8 ×` the linear total, otherwise fall back to linear.
//! 4. Refit the winner on all 20 points and report its residual sum.
//!
//! ## Quick Start
//!
//! ```rust
//! use segfit_rs::prelude::*;
//!
//! // Two segments: y = 2x + 1, then y = x³ - x
//! let x: Vec<f64> = (0..40).map(|i| -1.0 + i as f64 * 0.05).collect();
//! let y: Vec<f64> = x
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &x)| if i < 20 { 2.0 * x + 1.0 } else { x * x * x - x })
//!     .collect();
//!
//! let model = Segfit::new().build()?;
//! let report = model.fit_xy(&x, &y)?;
//!
//! assert_eq!(report.winners(), vec![Linear, Cubic]);
//! assert!(report.total_error < 1e-6);
//! # Result::<(), SegfitError>::Ok(())
//! ```
//!
//! ## Builder
//!
//! | Parameter              | Default                  | Options                                        |
//! |------------------------|--------------------------|------------------------------------------------|
//! | **candidates**         | `Linear, Cubic, Sine`    | any subset containing `Linear`                 |
//! | **exponential_mode**   | `Isolated`               | `Isolated` (`[1, eˣ]`), `WithCubic`            |
//! | **cross_validate**     | `LOOCV()`                | `LOOCV()`, `KFold(k)`, `HoldOut(f)`, `InSample()` |
//! | **threshold**          | 0.8                      | (0, 1]                                         |
//! | **tolerance**          | 1e-10                    | [0, ∞)                                         |
//! | **solver**             | `Svd`                    | `Svd`, `NormalEquations`                       |
//!
//! ```rust
//! use segfit_rs::prelude::*;
//! # let x: Vec<f64> = (0..20).map(|i| i as f64 * 0.3).collect();
//! # let y: Vec<f64> = x.iter().map(|&x| x.sin()).collect();
//!
//! let model = Segfit::new()
//!     .candidates(&[Linear, Quadratic, Cubic, Sine, Exponential])
//!     .cross_validate(KFold(5).seed(42))
//!     .threshold(0.8)
//!     .build()?;
//!
//! let report = model.fit_xy(&x, &y)?;
//! assert_eq!(report.winners(), vec![Sine]);
//! # Result::<(), SegfitError>::Ok(())
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns `Result<_, SegfitError>`. Errors are
//! fatal: a malformed row, a point count that is not a multiple of 20, or a
//! singular design matrix aborts the whole run.

#![deny(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the error type, `Point`, `Segment` and the segment splitter.
mod primitives;

// Layer 2: Math - linear algebra backend.
mod math;

// Layer 3: Algorithms - candidate bases and least squares.
mod algorithms;

// Layer 4: Evaluation - cross-validation of candidates.
mod evaluation;

// Layer 5: Engine - validation, selection and per-segment orchestration.
mod engine;

// Layer 6: IO - point loading, plotting, report export.
mod io;

// High-level fluent API.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use segfit_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        run,
        BasisKind::{self, Cubic, Exponential, Linear, Quadratic, Sine},
        CVConfig,
        ExponentialMode::{self, Isolated, WithCubic},
        FitReport, HoldOut, InSample, KFold, Point, RunOptions, SegfitBuilder as Segfit,
        SegfitError, SegfitModel, SegmentOutcome,
        Solver::{self, NormalEquations, Svd},
        LOOCV, SEGMENT_LEN,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// **Warning**: These are internal implementation details and may change without notice.
#[doc(hidden)]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal fitting algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal cross-validation.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal IO.
    pub mod io {
        pub use crate::io::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}

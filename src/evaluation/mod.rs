//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer scores candidate bases on held-out data:
//! - Leave-one-out, k-fold, hold-out and in-sample strategies
//! - Per-candidate error totals
//!
//! # Architecture
//!
//! ```text
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//! ```

/// Cross-validation strategies and scores.
pub mod cv;

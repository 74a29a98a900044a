//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the fitting building blocks:
//! - The candidate basis library (design-matrix rows and evaluation)
//! - Closed-form ordinary least squares
//!
//! # Architecture
//!
//! ```text
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Candidate basis functions.
pub mod basis;

/// Ordinary least squares.
pub mod least_squares;

//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the numeric backend used by the least-squares fitter.
//! It holds no model-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Linear algebra bridge to nalgebra.
pub mod linalg;

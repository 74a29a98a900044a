//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates a run:
//! - Configuration and input validation
//! - Regularized model selection
//! - The per-segment CV → select → refit pipeline
//! - Result assembly
//!
//! # Architecture
//!
//! ```text
//! Layer 6: IO
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//! ```

/// Per-segment pipeline driver.
pub mod executor;

/// Result structures.
pub mod output;

/// Regularized model selection.
pub mod selector;

/// Validation of configuration and data.
pub mod validator;

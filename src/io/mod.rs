//! Layer 6: IO
//!
//! # Purpose
//!
//! This layer connects the engine to the filesystem:
//! - Loading points from delimited files
//! - Rendering fits to SVG
//! - Exporting reports as JSON
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: IO ← You are here
//!   ↓
//! Layer 5: Engine
//! ```

/// Point-file loader.
pub mod loader;

/// SVG plot rendering.
pub mod plot;

/// JSON report export.
pub mod report;

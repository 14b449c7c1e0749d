//! # Workflows Module
//!
//! Top-level entry points that take a flat atom collection and a target table
//! and return the reoriented structure with one report per fragment.
//!
//! - **Reorientation Workflow** ([`reorient`]) - Groups atoms into fragments, reorients
//!   each one (in parallel when enabled) and emits diagnostics in fragment order.

pub mod reorient;

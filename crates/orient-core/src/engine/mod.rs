//! # Engine Module
//!
//! Per-fragment reorientation: resolving a fragment's target direction,
//! estimating its current direction, and rotating it rigidly about its root.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Root markers, tail count, default directions and grouping
//! - **Fragment Driver** ([`reorient`]) - `Grouped → RootFound → DirectionEstimated →
//!   RotationBuilt → Repositioned` for one fragment, with a report of each step
//! - **Progress Monitoring** ([`progress`]) - Callback sink for progress and diagnostics
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Fragments share no state, so the driver can run on any number of groups in parallel.

pub mod config;
pub mod error;
pub mod progress;
pub mod reorient;

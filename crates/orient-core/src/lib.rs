//! # lipidorient
//!
//! Rigid reorientation of lipid fragments: each fragment's principal axis is
//! estimated from its atoms and the fragment is rotated about its root atom so
//! that axis points along a caller-supplied direction.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Atom records, fragment grouping, vector algebra,
//!   minimal rotations (including the parallel and antiparallel cases), orientation
//!   estimation, target tables and fixed-column file I/O. Everything here is a pure
//!   value-to-value transformation apart from the I/O helpers.
//!
//! - **[`engine`]: The Fragment Driver.** Configuration, per-fragment reorientation with
//!   target resolution and default substitution, error types and progress events.
//!
//! - **[`workflows`]: The Public API.** Runs the driver over a whole structure and
//!   returns the reoriented atoms with per-fragment reports.

pub mod core;
pub mod engine;
pub mod workflows;

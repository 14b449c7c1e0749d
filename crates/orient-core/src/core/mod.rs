//! # Core Module
//!
//! Stateless building blocks of the reorientation engine: value-typed atom
//! models, vector algebra, rotation construction, orientation estimation and
//! file I/O.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atom records and fragment grouping
//! - **Vector Algebra** ([`utils::geometry`]) - Distances, directions, normalization
//! - **Rigid Transforms** ([`transform`]) - Minimal vector-to-vector rotations and
//!   their application about a pivot atom
//! - **Orientation Estimation** ([`orientation`]) - Root atom selection and
//!   tail-based direction estimates
//! - **Target Directions** ([`targets`]) - Per-fragment target tables
//! - **File I/O** ([`io`]) - Reading and writing fixed-column atom records
//!
//! Nothing in this module performs I/O except [`io`] and [`targets::TargetTable::load`];
//! everything else is a pure value-to-value transformation.

pub mod io;
pub mod models;
pub mod orientation;
pub mod targets;
pub mod transform;
pub mod utils;

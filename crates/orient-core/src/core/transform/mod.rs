//! Rigid-body transformations of lipid fragments.
//!
//! - [`rotation`] - Construction of the minimal rotation mapping one direction onto
//!   another, including the parallel and antiparallel special cases.
//! - [`rigid`] - Application of a rotation to atoms about a pivot atom.

pub mod rigid;
pub mod rotation;

//! Data structures describing the atoms of a lipid structure.
//!
//! - [`atom`] - The value-typed [`atom::Atom`] record that mirrors one row of the
//!   fixed-column structure format.
//! - [`fragment`] - Grouping of atoms into rigid fragments by fragment identifier.

pub mod atom;
pub mod fragment;

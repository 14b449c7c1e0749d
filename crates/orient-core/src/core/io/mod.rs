//! Provides input/output functionality for atom-record file formats.
//!
//! - [`traits`] - The [`traits::MolecularFile`] interface shared by all formats.
//! - [`pdb`] - The fixed-column `ATOM` record format read and written by the
//!   reorientation workflow.

pub mod pdb;
pub mod traits;

pub mod inspect;
pub mod reorient;

use crate::error::{CliError, Result};
use lipidorient::core::io::pdb::{PdbError, PdbFile, PdbMetadata};
use lipidorient::core::io::traits::MolecularFile;
use lipidorient::core::models::atom::Atom;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{error, info, warn};

/// Reads the input structure.
///
/// An input that cannot be opened is reported and yields an empty collection;
/// each command decides whether that is fatal. In strict mode a malformed
/// record fails the read instead of being skipped.
pub(crate) fn load_structure(path: &Path, strict: bool) -> Result<(Vec<Atom>, PdbMetadata)> {
    info!("Loading input structure from {:?}", path);
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            error!("Cannot open input {:?}: {}", path, e);
            return Ok((Vec::new(), PdbMetadata::default()));
        }
    };

    let mut reader = BufReader::new(file);
    let result = if strict {
        PdbFile::read_strict(&mut reader)
    } else {
        PdbFile::read_from(&mut reader)
    };
    let (atoms, metadata) = result.map_err(|e: PdbError| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    if !metadata.skipped_records.is_empty() {
        warn!(
            "Skipped {} malformed record(s) in {:?}.",
            metadata.skipped_records.len(),
            path
        );
    }
    info!("Read {} atom record(s).", atoms.len());
    Ok((atoms, metadata))
}

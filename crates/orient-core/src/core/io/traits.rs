use crate::core::models::atom::Atom;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing atom-record file formats.
///
/// Implementors handle format-specific parsing and serialization of a flat,
/// ordered atom collection plus whatever per-file metadata the format carries.
pub trait MolecularFile {
    /// The type of metadata associated with the file format.
    type Metadata;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads an atom collection from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the parsed atoms in file order and associated metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails.
    fn read_from(reader: &mut impl BufRead) -> Result<(Vec<Atom>, Self::Metadata), Self::Error>;

    /// Writes an atom collection and metadata to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(
        atoms: &[Atom],
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Reads an atom collection from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<(Vec<Atom>, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes an atom collection and metadata to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        atoms: &[Atom],
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(atoms, metadata, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, warn};

/// Header describing an unbounded (unit) cell, written at the top of every file.
pub const UNIT_CELL_HEADER: &str =
    "CRYST1    0.000    0.000    0.000  90.00  90.00  90.00 P 1           1";
/// Static remark identifying the producer of the file.
pub const GENERATOR_REMARK: &str = "Generated by lipid-orient fragment reorientation";
pub const DEFAULT_TITLE: &str = "REPOSITIONED LIPIDS";

#[derive(Debug, Clone, PartialEq)]
pub struct PdbMetadata {
    /// Caller-supplied title, written as the second remark line.
    pub title: String,
    /// Text of the `REMARK` lines found while reading.
    pub remarks: Vec<String>,
    /// `ATOM` rows that failed to parse and were skipped while reading.
    pub skipped_records: Vec<SkippedRecord>,
}

impl Default for PdbMetadata {
    fn default() -> Self {
        Self::with_title(DEFAULT_TITLE)
    }
}

impl PdbMetadata {
    pub fn with_title(title: &str) -> Self {
        Self {
            title: title.to_string(),
            remarks: Vec::new(),
            skipped_records: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// 1-based line number in the source.
    pub line: usize,
    pub content: String,
    pub error: PdbParseErrorKind,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
}

/// Returns the trimmed text of the 0-based, end-exclusive column range, clamped to
/// the line length.
fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).unwrap_or("").trim()
}

fn parse_int<T: std::str::FromStr>(
    line: &str,
    start: usize,
    end: usize,
    columns: &'static str,
) -> Result<T, PdbParseErrorKind> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbParseErrorKind::InvalidInt {
        columns,
        value: value.to_string(),
    })
}

fn parse_float(
    line: &str,
    start: usize,
    end: usize,
    columns: &'static str,
) -> Result<f64, PdbParseErrorKind> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbParseErrorKind::InvalidFloat {
        columns,
        value: value.to_string(),
    })
}

/// Fixed-column atom-record format.
///
/// Only rows tagged `ATOM` in columns 1-4 are read. Atom names longer than four
/// characters or residue names longer than three are written unpadded and shift
/// the following columns.
pub struct PdbFile;

impl PdbFile {
    /// Parses a single `ATOM` row into an [`Atom`].
    ///
    /// # Errors
    ///
    /// Returns the first field that fails to parse as a number.
    pub fn parse_atom_record(line: &str) -> Result<Atom, PdbParseErrorKind> {
        let serial: usize = parse_int(line, 6, 11, "7-11")?;
        let name = slice_and_trim(line, 12, 16);
        let res_name = slice_and_trim(line, 17, 20);
        let fragment_id: isize = parse_int(line, 22, 26, "23-26")?;
        let x = parse_float(line, 30, 38, "31-38")?;
        let y = parse_float(line, 38, 46, "39-46")?;
        let z = parse_float(line, 46, 54, "47-54")?;
        let occupancy = parse_float(line, 54, 60, "55-60")?;
        let temp_factor = parse_float(line, 60, 66, "61-66")?;
        let chain_label = slice_and_trim(line, 72, 76);

        Ok(Atom {
            serial,
            name: name.to_string(),
            res_name: res_name.to_string(),
            fragment_id,
            position: Point3::new(x, y, z),
            occupancy,
            temp_factor,
            chain_label: chain_label.to_string(),
        })
    }

    /// Formats an atom as one fixed-column `ATOM` row (without line terminator).
    pub fn format_atom_record(atom: &Atom) -> String {
        format!(
            "ATOM  {:>5} {:>4} {:>3} 1{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}      {}",
            atom.serial,
            atom.name,
            atom.res_name,
            atom.fragment_id,
            atom.position.x,
            atom.position.y,
            atom.position.z,
            atom.occupancy,
            atom.temp_factor,
            atom.chain_label
        )
    }

    /// Reads atoms, failing on the first malformed `ATOM` row instead of skipping it.
    ///
    /// # Errors
    ///
    /// Returns [`PdbError::Parse`] for the first malformed row, or [`PdbError::Io`].
    pub fn read_strict(reader: &mut impl BufRead) -> Result<(Vec<Atom>, PdbMetadata), PdbError> {
        let (atoms, metadata) = Self::read_from(reader)?;
        if let Some(first) = metadata.skipped_records.first() {
            return Err(PdbError::Parse {
                line: first.line,
                kind: first.error.clone(),
            });
        }
        Ok((atoms, metadata))
    }
}

impl MolecularFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Vec<Atom>, Self::Metadata), Self::Error> {
        let mut atoms = Vec::new();
        let mut metadata = PdbMetadata::default();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if line.starts_with("ATOM") {
                match Self::parse_atom_record(&line) {
                    Ok(atom) => atoms.push(atom),
                    Err(kind) => {
                        warn!(
                            "Skipping malformed line {}: {} - Error: {}",
                            line_num,
                            line.trim(),
                            kind
                        );
                        metadata.skipped_records.push(SkippedRecord {
                            line: line_num,
                            content: line.clone(),
                            error: kind,
                        });
                    }
                }
            } else if let Some(remark) = line.strip_prefix("REMARK") {
                metadata.remarks.push(remark.trim().to_string());
            }
        }

        if let Some(title) = metadata.remarks.last() {
            metadata.title = title.clone();
        }

        debug!(
            "Parsed {} atom record(s), skipped {}.",
            atoms.len(),
            metadata.skipped_records.len()
        );
        Ok((atoms, metadata))
    }

    fn write_to(
        atoms: &[Atom],
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "{}", UNIT_CELL_HEADER)?;
        writeln!(writer, "REMARK {}", GENERATOR_REMARK)?;
        writeln!(writer, "REMARK {}", metadata.title)?;

        for atom in atoms {
            writeln!(writer, "{}", Self::format_atom_record(atom))?;
        }

        writeln!(writer, "END")?;
        Ok(())
    }
}

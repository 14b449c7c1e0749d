use crate::error::{CliError, Result};
use lipidorient::engine::reorient::FragmentReport;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize, PartialEq)]
struct ReportRow<'a> {
    fragment: isize,
    residue: &'a str,
    atoms: usize,
    root: &'a str,
    root_x: f64,
    root_y: f64,
    root_z: f64,
    direction_x: f64,
    direction_y: f64,
    direction_z: f64,
    target_x: Option<f64>,
    target_y: Option<f64>,
    target_z: Option<f64>,
    defaulted: bool,
}

impl<'a> From<&'a FragmentReport> for ReportRow<'a> {
    fn from(report: &'a FragmentReport) -> Self {
        let target = report.target.map(|t| t.direction);
        Self {
            fragment: report.fragment_id,
            residue: &report.res_name,
            atoms: report.atom_count,
            root: &report.root_name,
            root_x: report.root_position.x,
            root_y: report.root_position.y,
            root_z: report.root_position.z,
            direction_x: report.original_direction.x,
            direction_y: report.original_direction.y,
            direction_z: report.original_direction.z,
            target_x: target.map(|t| t.x),
            target_y: target.map(|t| t.y),
            target_z: target.map(|t| t.z),
            defaulted: report.target_defaulted(),
        }
    }
}

/// Writes one CSV row per fragment. Inspection-only reports leave the target columns empty.
pub fn write_report(reports: &[FragmentReport], writer: impl Write) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for report in reports {
        csv_writer.serialize(ReportRow::from(report))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_report_to_path(reports: &[FragmentReport], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    write_report(reports, file).map_err(|e| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

use super::load_structure;
use crate::cli::{InspectArgs, TargetArgs};
use crate::config::build_config;
use crate::error::Result;
use crate::report::write_report_to_path;
use lipidorient::workflows;
use tracing::{info, warn};

pub fn run(args: InspectArgs) -> Result<()> {
    let app_config = build_config(&args.orientation, &TargetArgs::default(), None)?;

    let (atoms, _) = load_structure(&args.input, args.orientation.strict)?;
    if atoms.is_empty() {
        warn!("No atom records in {:?}; nothing to inspect.", &args.input);
    }

    let reports = workflows::reorient::inspect(&atoms, &app_config.core_config);

    for report in &reports {
        let d = report.original_direction;
        println!(
            "Fragment {:>5} {:<4} {:>5} atoms  root {:<4} at ({:.3}, {:.3}, {:.3})  direction ({:.3}, {:.3}, {:.3})",
            report.fragment_id,
            report.res_name,
            report.atom_count,
            report.root_name,
            report.root_position.x,
            report.root_position.y,
            report.root_position.z,
            d.x,
            d.y,
            d.z
        );
    }

    if let Some(report_path) = &args.report {
        info!("Writing fragment report to {:?}", report_path);
        write_report_to_path(&reports, report_path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OrientationArgs;
    use lipidorient::core::io::pdb::{PdbFile, PdbMetadata};
    use lipidorient::core::io::traits::MolecularFile;
    use lipidorient::core::models::atom::Atom;
    use nalgebra::Point3;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn run_writes_inspection_report() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        let report = dir.path().join("report.csv");
        let atoms = vec![
            Atom::new(1, "N", "DPP", 3, Point3::new(0.0, 0.0, 1.0)),
            Atom::new(2, "P", "DPP", 3, Point3::new(0.0, 0.0, 0.0)),
            Atom::new(3, "C218", "DPP", 3, Point3::new(0.0, 0.0, -6.0)),
        ];
        PdbFile::write_to_path(&atoms, &PdbMetadata::default(), &input).unwrap();

        run(InspectArgs {
            input,
            orientation: OrientationArgs::default(),
            report: Some(report.clone()),
        })
        .unwrap();

        let csv = fs::read_to_string(report).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("3,DPP,3,P,"));
        assert!(row.ends_with(",,,,false"));
    }

    #[test]
    fn run_tolerates_missing_input() {
        let dir = tempdir().unwrap();
        let result = run(InspectArgs {
            input: dir.path().join("absent.pdb"),
            orientation: OrientationArgs::default(),
            report: None,
        });
        assert!(result.is_ok());
    }
}

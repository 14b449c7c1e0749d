use super::load_structure;
use crate::cli::ReorientArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::report::write_report_to_path;
use crate::utils::progress::CliProgressHandler;
use lipidorient::{
    core::io::{
        pdb::{PdbFile, PdbMetadata},
        traits::MolecularFile,
    },
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::{info, warn};

pub fn run(args: ReorientArgs) -> Result<()> {
    let app_config = build_config(&args.orientation, &args.targets, args.title.as_deref())?;

    let (atoms, _input_metadata) = load_structure(&args.input, args.orientation.strict)?;
    if atoms.is_empty() {
        return Err(CliError::EmptyInput {
            path: args.input.clone(),
        });
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Reorienting {} atom(s)...", atoms.len());
    info!("Invoking the core reorientation workflow...");

    let result = workflows::reorient::run(
        &atoms,
        &app_config.targets,
        &app_config.core_config,
        &reporter,
    )?;

    let defaulted = progress_handler.defaulted_fragments();
    if !defaulted.is_empty() {
        warn!(
            "{} fragment(s) had no target and were pointed along {:?}: {:?}",
            defaulted.len(),
            app_config.core_config.default_direction,
            defaulted
        );
    }

    // The report does not depend on the structure write succeeding.
    if let Some(report_path) = &args.report {
        info!("Writing fragment report to {:?}", report_path);
        write_report_to_path(&result.fragments, report_path)?;
    }

    info!("Writing reoriented structure to {:?}", &args.output);
    PdbFile::write_to_path(
        &result.atoms,
        &PdbMetadata::with_title(&app_config.title),
        &args.output,
    )
    .map_err(|e| CliError::FileWriting {
        path: args.output.clone(),
        source: e.into(),
    })?;

    println!(
        "✓ {} fragment(s) written to: {}",
        result.fragments.len(),
        args.output.display()
    );
    Ok(())
}

use crate::core::models::atom::Atom;
use crate::core::models::fragment::{FragmentGroup, group_by_fragment, single_group};
use crate::core::targets::TargetTable;
use crate::engine::config::{GroupingMode, ReorientConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::reorient::{FragmentOutcome, FragmentReport, inspect_group, reorient_group};
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Default)]
pub struct ReorientResult {
    /// Every atom after reorientation, grouped by fragment in first-seen order.
    pub atoms: Vec<Atom>,
    pub fragments: Vec<FragmentReport>,
}

impl ReorientResult {
    pub fn defaulted_fragments(&self) -> impl Iterator<Item = &FragmentReport> {
        self.fragments.iter().filter(|f| f.target_defaulted())
    }
}

#[instrument(skip_all, name = "reorient_workflow")]
pub fn run(
    atoms: &[Atom],
    targets: &TargetTable,
    config: &ReorientConfig,
    reporter: &ProgressReporter,
) -> Result<ReorientResult, EngineError> {
    // === Phase 1: Grouping ===
    reporter.report(Progress::PhaseStart { name: "Grouping" });
    let groups = partition(atoms, config.grouping);
    info!(
        "Grouped {} atom(s) into {} fragment(s).",
        atoms.len(),
        groups.len()
    );
    reporter.report(Progress::PhaseFinish);

    if groups.is_empty() {
        info!("No atoms to reorient.");
        return Ok(ReorientResult::default());
    }

    // === Phase 2: Reorientation ===
    reporter.report(Progress::PhaseStart {
        name: "Reorienting Fragments",
    });
    reporter.report(Progress::TaskStart {
        total_steps: groups.len() as u64,
    });

    let outcomes: Vec<FragmentOutcome> = if config.parallel {
        groups
            .par_iter()
            .map(|group| reorient_group(group, targets, config))
            .collect::<Result<Vec<_>, EngineError>>()?
    } else {
        groups
            .iter()
            .map(|group| reorient_group(group, targets, config))
            .collect::<Result<Vec<_>, EngineError>>()?
    };

    // Diagnostics are emitted here, in fragment order, regardless of how the work ran.
    let mut result = ReorientResult {
        atoms: Vec::with_capacity(atoms.len()),
        fragments: Vec::with_capacity(outcomes.len()),
    };
    for outcome in outcomes {
        if let Some(report) = outcome.report {
            log_fragment(&report, reporter);
            reporter.report(Progress::FragmentReoriented(report.clone()));
            result.fragments.push(report);
        }
        result.atoms.extend(outcome.atoms);
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let defaulted = result.defaulted_fragments().count();
    if defaulted > 0 {
        reporter.report(Progress::Message(format!(
            "{} fragment(s) used the default direction",
            defaulted
        )));
    }
    info!(
        "Reoriented {} fragment(s) ({} with default target).",
        result.fragments.len(),
        defaulted
    );
    Ok(result)
}

/// Reports the root and estimated direction of every fragment without moving anything.
#[instrument(skip_all, name = "inspect_workflow")]
pub fn inspect(atoms: &[Atom], config: &ReorientConfig) -> Vec<FragmentReport> {
    let groups = partition(atoms, config.grouping);

    let reports: Vec<FragmentReport> = if config.parallel {
        groups
            .par_iter()
            .filter_map(|group| inspect_group(group, &config.orientation))
            .collect()
    } else {
        groups
            .iter()
            .filter_map(|group| inspect_group(group, &config.orientation))
            .collect()
    };

    for report in &reports {
        debug!(
            fragment = report.fragment_id,
            atoms = report.atom_count,
            root = %report.root_name,
            "Estimated direction {:?}",
            report.original_direction
        );
    }
    info!("Inspected {} fragment(s).", reports.len());
    reports
}

fn partition(atoms: &[Atom], grouping: GroupingMode) -> Vec<FragmentGroup> {
    match grouping {
        GroupingMode::ByFragment => group_by_fragment(atoms),
        GroupingMode::WholeStructure => single_group(atoms),
    }
}

fn log_fragment(report: &FragmentReport, reporter: &ProgressReporter) {
    let Some(target) = report.target else {
        return;
    };
    if target.defaulted {
        warn!(
            "Fragment {} has no target direction; using default {:?}.",
            report.fragment_id, target.direction
        );
        reporter.report(Progress::TargetDefaulted {
            fragment_id: report.fragment_id,
        });
    }
    debug!(
        fragment = report.fragment_id,
        atoms = report.atom_count,
        root = %report.root_name,
        "Root at {:?}, direction {:?} -> {:?}",
        report.root_position,
        report.original_direction,
        target.direction
    );
}

use super::config::ReorientConfig;
use super::error::EngineError;
use crate::core::models::atom::Atom;
use crate::core::models::fragment::FragmentGroup;
use crate::core::orientation::{OrientationParams, estimate_direction, find_root};
use crate::core::targets::{TargetLookup, TargetTable};
use crate::core::transform::rigid::apply_to_group;
use crate::core::transform::rotation::build_rotation;
use crate::core::utils::geometry::Direction;
use nalgebra::Point3;

/// Root atom and estimated direction of one fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentOrientation {
    pub root: Atom,
    pub direction: Direction,
}

/// The target a fragment was rotated onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedTarget {
    pub direction: Direction,
    /// `true` when no target was supplied and the configured default was used.
    pub defaulted: bool,
}

/// Per-fragment summary of what the engine found and did.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentReport {
    pub fragment_id: isize,
    pub res_name: String,
    pub atom_count: usize,
    pub root_name: String,
    pub root_position: Point3<f64>,
    /// Estimated direction before rotation, not normalized.
    pub original_direction: Direction,
    /// `None` when the fragment was only inspected.
    pub target: Option<AppliedTarget>,
}

impl FragmentReport {
    fn new(group: &FragmentGroup, orientation: &FragmentOrientation) -> Self {
        Self {
            fragment_id: group.fragment_id,
            res_name: group.res_name().to_string(),
            atom_count: group.len(),
            root_name: orientation.root.name.clone(),
            root_position: orientation.root.position,
            original_direction: orientation.direction,
            target: None,
        }
    }

    pub fn target_defaulted(&self) -> bool {
        self.target.is_some_and(|t| t.defaulted)
    }
}

/// Result of reorienting one fragment group.
#[derive(Debug, Clone)]
pub struct FragmentOutcome {
    pub atoms: Vec<Atom>,
    /// `None` for an empty group.
    pub report: Option<FragmentReport>,
}

pub fn estimate_orientation(atoms: &[Atom], params: &OrientationParams) -> FragmentOrientation {
    let root = find_root(atoms, &params.root_markers);
    let direction = estimate_direction(atoms, &root, params);
    FragmentOrientation { root, direction }
}

/// Rigidly rotates a fragment about its root so its estimated direction points along `target`.
///
/// An empty group yields an empty result.
pub fn reorient_fragment(
    atoms: &[Atom],
    target: &Direction,
    params: &OrientationParams,
) -> Vec<Atom> {
    if atoms.is_empty() {
        return Vec::new();
    }
    let orientation = estimate_orientation(atoms, params);
    rotate_onto(atoms, &orientation, target)
}

fn rotate_onto(atoms: &[Atom], orientation: &FragmentOrientation, target: &Direction) -> Vec<Atom> {
    let rotation = build_rotation(&orientation.direction, target);
    apply_to_group(atoms, &rotation, &orientation.root)
}

/// Looks up the target of one fragment, falling back to the configured default.
pub fn resolve_target(
    fragment_id: isize,
    targets: &TargetTable,
    config: &ReorientConfig,
) -> AppliedTarget {
    match targets.lookup(fragment_id) {
        TargetLookup::Explicit(direction) | TargetLookup::Uniform(direction) => AppliedTarget {
            direction,
            defaulted: false,
        },
        TargetLookup::Missing => AppliedTarget {
            direction: config.default_direction,
            defaulted: true,
        },
    }
}

/// Reorients one group and records what happened.
///
/// With `validate_coordinates` set, non-finite atom positions or target components
/// are rejected before any rotation is built. Otherwise they propagate through
/// the math unchanged.
pub fn reorient_group(
    group: &FragmentGroup,
    targets: &TargetTable,
    config: &ReorientConfig,
) -> Result<FragmentOutcome, EngineError> {
    if group.is_empty() {
        return Ok(FragmentOutcome {
            atoms: Vec::new(),
            report: None,
        });
    }

    let target = resolve_target(group.fragment_id, targets, config);

    if config.validate_coordinates {
        validate_group(group, &target.direction)?;
    }

    let orientation = estimate_orientation(&group.atoms, &config.orientation);
    let atoms = rotate_onto(&group.atoms, &orientation, &target.direction);

    let mut report = FragmentReport::new(group, &orientation);
    report.target = Some(target);

    Ok(FragmentOutcome {
        atoms,
        report: Some(report),
    })
}

/// Estimates root and direction of a group without moving it.
pub fn inspect_group(group: &FragmentGroup, params: &OrientationParams) -> Option<FragmentReport> {
    if group.is_empty() {
        return None;
    }
    let orientation = estimate_orientation(&group.atoms, params);
    Some(FragmentReport::new(group, &orientation))
}

fn validate_group(group: &FragmentGroup, target: &Direction) -> Result<(), EngineError> {
    if let Some(atom) = group.atoms.iter().find(|a| !a.has_finite_position()) {
        return Err(EngineError::NonFiniteCoordinates {
            fragment_id: group.fragment_id,
            serial: atom.serial,
        });
    }
    if !target.iter().all(|c| c.is_finite()) {
        return Err(EngineError::NonFiniteTarget {
            fragment_id: group.fragment_id,
            direction: *target,
        });
    }
    Ok(())
}

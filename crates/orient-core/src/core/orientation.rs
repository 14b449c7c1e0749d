use crate::core::models::atom::Atom;
use crate::core::utils::geometry::{Direction, canonical_up, direction, distance};
use crate::core::utils::identifiers::RootPreset;
use std::cmp::Ordering;

/// Number of tail atoms averaged when estimating a fragment's orientation.
pub const DEFAULT_TAIL_COUNT: usize = 2;

/// Parameters controlling how a fragment's current orientation is estimated.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationParams {
    /// Marker substrings tried in priority order when picking the root atom.
    pub root_markers: Vec<String>,
    /// How many of the atoms farthest from the root are averaged.
    pub tail_count: usize,
    /// Returned when no tail atom can be selected (empty fragment). This is a
    /// placeholder for "orientation undetermined", not a measurement.
    pub undetermined_direction: Direction,
}

impl Default for OrientationParams {
    fn default() -> Self {
        Self {
            root_markers: RootPreset::default().marker_list(),
            tail_count: DEFAULT_TAIL_COUNT,
            undetermined_direction: canonical_up(),
        }
    }
}

/// Selects the root atom of a fragment.
///
/// Each marker is tried in turn over the whole fragment; the first atom whose name
/// contains the marker is returned. Without a match the first atom is used, and an
/// empty fragment yields the zero-valued [`Atom::default`] sentinel.
pub fn find_root<S: AsRef<str>>(atoms: &[Atom], markers: &[S]) -> Atom {
    markers
        .iter()
        .find_map(|marker| atoms.iter().find(|a| a.name.contains(marker.as_ref())))
        .or_else(|| atoms.first())
        .cloned()
        .unwrap_or_default()
}

/// Returns the `count` atoms farthest from `root`, farthest first.
///
/// Equal distances keep their input order.
pub fn find_tail_atoms<'a>(atoms: &'a [Atom], root: &Atom, count: usize) -> Vec<&'a Atom> {
    let mut by_distance: Vec<(f64, &Atom)> =
        atoms.iter().map(|a| (distance(a, root), a)).collect();

    // `sort_by` is stable, which gives the tie-break.
    by_distance.sort_by(|(d1, _), (d2, _)| d2.partial_cmp(d1).unwrap_or(Ordering::Equal));

    by_distance
        .into_iter()
        .take(count)
        .map(|(_, atom)| atom)
        .collect()
}

/// Estimates a fragment's orientation as the mean of the root-to-tail vectors.
///
/// The result is not normalized. When no tail atom is selected the configured
/// undetermined direction is returned instead.
pub fn estimate_direction(atoms: &[Atom], root: &Atom, params: &OrientationParams) -> Direction {
    let tails = find_tail_atoms(atoms, root, params.tail_count);
    if tails.is_empty() {
        return params.undetermined_direction;
    }

    let sum: Direction = tails.iter().map(|tail| direction(root, tail)).sum();
    sum / tails.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    const TOLERANCE: f64 = 1e-12;

    fn atom(serial: usize, name: &str, x: f64, y: f64, z: f64) -> Atom {
        Atom::new(serial, name, "POPC", 1, Point3::new(x, y, z))
    }

    fn lipid() -> Vec<Atom> {
        vec![
            atom(1, "N", 0.0, 0.0, 2.0),
            atom(2, "C12", 0.0, 0.5, 1.0),
            atom(3, "P", 0.0, 0.0, 0.0),
            atom(4, "C218", 1.0, 0.0, -5.0),
            atom(5, "C316", -1.0, 0.0, -5.0),
            atom(6, "C21", 0.5, 0.0, -1.0),
        ]
    }

    #[test]
    fn find_root_uses_first_matching_marker() {
        let root = find_root(&lipid(), &["P"]);
        assert_eq!(root.serial, 3);
    }

    #[test]
    fn find_root_tries_markers_in_priority_order() {
        let root = find_root(&lipid(), &["N", "P"]);
        assert_eq!(root.serial, 1);

        let root = find_root(&lipid(), &["X", "P"]);
        assert_eq!(root.serial, 3);
    }

    #[test]
    fn find_root_matches_substrings() {
        let atoms = vec![atom(1, "C1", 0.0, 0.0, 0.0), atom(2, "O13P", 0.0, 0.0, 0.0)];
        assert_eq!(find_root(&atoms, &["P"]).serial, 2);
    }

    #[test]
    fn find_root_falls_back_to_first_atom() {
        let atoms = vec![atom(8, "C1", 0.0, 0.0, 0.0), atom(9, "C2", 1.0, 0.0, 0.0)];
        assert_eq!(find_root(&atoms, &["P"]).serial, 8);
        assert_eq!(find_root::<&str>(&atoms, &[]).serial, 8);
    }

    #[test]
    fn find_root_of_empty_fragment_is_sentinel() {
        assert_eq!(find_root(&[], &["P"]), Atom::default());
    }

    #[test]
    fn tail_atoms_are_farthest_first() {
        let atoms = lipid();
        let root = atoms[2].clone();
        let tails = find_tail_atoms(&atoms, &root, 3);

        let serials: Vec<usize> = tails.iter().map(|a| a.serial).collect();
        assert_eq!(serials, vec![4, 5, 1]);
    }

    #[test]
    fn tail_ties_preserve_input_order() {
        let atoms = vec![
            atom(1, "P", 0.0, 0.0, 0.0),
            atom(2, "C1", 0.0, 0.0, 3.0),
            atom(3, "C2", 3.0, 0.0, 0.0),
            atom(4, "C3", 0.0, 3.0, 0.0),
        ];
        let tails = find_tail_atoms(&atoms, &atoms[0], 2);
        let serials: Vec<usize> = tails.iter().map(|a| a.serial).collect();
        assert_eq!(serials, vec![2, 3]);
    }

    #[test]
    fn tail_count_larger_than_fragment_selects_all() {
        let atoms = lipid();
        assert_eq!(find_tail_atoms(&atoms, &atoms[2], 50).len(), atoms.len());
    }

    #[test]
    fn direction_is_mean_of_tail_vectors() {
        let atoms = lipid();
        let root = find_root(&atoms, &["P"]);
        let dir = estimate_direction(&atoms, &root, &OrientationParams::default());

        assert!((dir - Vector3::new(0.0, 0.0, -5.0)).norm() < TOLERANCE);
    }

    #[test]
    fn custom_tail_count_changes_estimate() {
        let atoms = lipid();
        let root = find_root(&atoms, &["P"]);
        let params = OrientationParams {
            tail_count: 1,
            ..Default::default()
        };
        let dir = estimate_direction(&atoms, &root, &params);

        assert!((dir - Vector3::new(1.0, 0.0, -5.0)).norm() < TOLERANCE);
    }

    #[test]
    fn empty_fragment_yields_undetermined_direction() {
        let params = OrientationParams {
            undetermined_direction: Vector3::new(0.0, 1.0, 0.0),
            ..Default::default()
        };
        let dir = estimate_direction(&[], &Atom::default(), &params);
        assert_eq!(dir, Vector3::new(0.0, 1.0, 0.0));

        let dir = estimate_direction(&[], &Atom::default(), &OrientationParams::default());
        assert_eq!(dir, Vector3::z());
    }

    #[test]
    fn estimate_is_deterministic() {
        let atoms = lipid();
        let root = find_root(&atoms, &["P"]);
        let params = OrientationParams::default();

        let first = estimate_direction(&atoms, &root, &params);
        let second = estimate_direction(&atoms, &root, &params);
        assert_eq!(first, second);
    }
}

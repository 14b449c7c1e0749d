use crate::core::models::atom::Atom;
use nalgebra::Rotation3;

/// Rotates a single atom about `pivot`: `p' = pivot + R (p - pivot)`.
///
/// All non-positional fields are copied unchanged. The pivot itself never moves.
pub fn rotate_atom(atom: &Atom, rotation: &Rotation3<f64>, pivot: &Atom) -> Atom {
    let relative = atom.position - pivot.position;
    atom.with_position(pivot.position + rotation * relative)
}

/// Applies [`rotate_atom`] to every atom of a group, preserving order.
pub fn apply_to_group(atoms: &[Atom], rotation: &Rotation3<f64>, pivot: &Atom) -> Vec<Atom> {
    atoms
        .iter()
        .map(|atom| rotate_atom(atom, rotation, pivot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};
    use std::f64::consts::FRAC_PI_2;

    const TOLERANCE: f64 = 1e-9;

    fn atom_at(serial: usize, x: f64, y: f64, z: f64) -> Atom {
        let mut atom = Atom::new(serial, "C2", "DPPC", 4, Point3::new(x, y, z));
        atom.occupancy = 1.0;
        atom.temp_factor = 0.5;
        atom.chain_label = "L1".to_string();
        atom
    }

    #[test]
    fn pivot_atom_never_moves() {
        let pivot = atom_at(1, 3.0, -2.0, 7.5);
        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), 1.234);

        let rotated = rotate_atom(&pivot, &rotation, &pivot);
        assert_eq!(rotated, pivot);
    }

    #[test]
    fn atom_rotates_about_pivot_not_origin() {
        let pivot = atom_at(1, 1.0, 1.0, 0.0);
        let atom = atom_at(2, 2.0, 1.0, 0.0);
        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2);

        let rotated = rotate_atom(&atom, &rotation, &pivot);
        assert!((rotated.position - Point3::new(1.0, 2.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn rotation_preserves_non_positional_fields() {
        let pivot = atom_at(1, 0.0, 0.0, 0.0);
        let atom = atom_at(9, 0.0, 0.0, 4.0);
        let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), 0.3);

        let rotated = rotate_atom(&atom, &rotation, &pivot);
        assert_eq!(rotated.serial, 9);
        assert_eq!(rotated.name, "C2");
        assert_eq!(rotated.res_name, "DPPC");
        assert_eq!(rotated.fragment_id, 4);
        assert_eq!(rotated.occupancy, 1.0);
        assert_eq!(rotated.temp_factor, 0.5);
        assert_eq!(rotated.chain_label, "L1");
    }

    #[test]
    fn group_application_preserves_order_and_distances() {
        let pivot = atom_at(1, 0.5, 0.5, 0.5);
        let atoms = vec![
            pivot.clone(),
            atom_at(2, 1.5, 0.5, 0.5),
            atom_at(3, 0.5, 3.5, 0.5),
            atom_at(4, -1.0, 2.0, 6.0),
        ];
        let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), 2.0);

        let rotated = apply_to_group(&atoms, &rotation, &pivot);

        let serials: Vec<usize> = rotated.iter().map(|a| a.serial).collect();
        assert_eq!(serials, vec![1, 2, 3, 4]);
        for (before, after) in atoms.iter().zip(&rotated) {
            let d_before = (before.position - pivot.position).norm();
            let d_after = (after.position - pivot.position).norm();
            assert!((d_before - d_after).abs() < TOLERANCE);
        }
    }

    #[test]
    fn empty_group_yields_empty_output() {
        let rotation = Rotation3::identity();
        assert!(apply_to_group(&[], &rotation, &Atom::default()).is_empty());
    }
}

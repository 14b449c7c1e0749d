use crate::core::models::atom::Atom;
use nalgebra::Vector3;

/// A 3D orientation vector. Not required to be unit length.
pub type Direction = Vector3<f64>;

/// The canonical up-direction `[0, 0, 1]`.
pub fn canonical_up() -> Direction {
    Vector3::z()
}

pub fn distance(a: &Atom, b: &Atom) -> f64 {
    (a.position - b.position).norm()
}

/// Vector from `root` to `child` (`child - root`), not normalized.
pub fn direction(root: &Atom, child: &Atom) -> Direction {
    child.position - root.position
}

/// Scales `v` to unit length.
///
/// A vector whose magnitude is exactly zero is returned unchanged, so the result
/// is not guaranteed to be a unit vector.
pub fn normalize(v: &Direction) -> Direction {
    let magnitude = v.norm();
    if magnitude == 0.0 { *v } else { v / magnitude }
}

pub fn dot(a: &Direction, b: &Direction) -> f64 {
    a.dot(b)
}

pub fn cross(a: &Direction, b: &Direction) -> Direction {
    a.cross(b)
}

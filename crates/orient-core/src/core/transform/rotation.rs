use crate::core::utils::geometry::{Direction, cross, dot, normalize};
use nalgebra::{Matrix3, Rotation3, Vector3};

/// Two unit directions whose dot product lies within this distance of `+1` (or `-1`)
/// are treated as parallel (or antiparallel).
pub const ALIGNMENT_TOLERANCE: f64 = 1e-6;

/// Above this magnitude of the x component, the world x axis is considered too close
/// to the source direction to derive a half-turn axis from, and the y axis is used.
const HELPER_AXIS_SWITCH: f64 = 0.9;

/// Builds the minimal rotation that maps `from` onto `to`.
///
/// Both inputs are normalized first. Three cases are distinguished:
///
/// - already aligned: the identity is returned;
/// - antiparallel: a half turn about an axis perpendicular to `from`;
/// - otherwise: Rodrigues' formula about `from x to` with the angle taken in `[0, pi]`.
///
/// The result is always a proper rotation. If either input has zero magnitude the
/// orientation is undetermined and the identity is returned, leaving atoms in place.
///
/// # Arguments
///
/// * `from` - The current orientation.
/// * `to` - The desired orientation.
pub fn build_rotation(from: &Direction, to: &Direction) -> Rotation3<f64> {
    let from = normalize(from);
    let to = normalize(to);

    if from.norm() == 0.0 || to.norm() == 0.0 {
        return Rotation3::identity();
    }

    let cos_theta = dot(&from, &to);

    if (cos_theta - 1.0).abs() < ALIGNMENT_TOLERANCE {
        return Rotation3::identity();
    }

    if (cos_theta + 1.0).abs() < ALIGNMENT_TOLERANCE {
        return half_turn_perpendicular_to(&from);
    }

    let axis = normalize(&cross(&from, &to));
    // Never negative: keeps the rotation angle in [0, pi].
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    rodrigues(&axis, cos_theta, sin_theta)
}

/// `R = 2 a a^T - I` for an axis `a` perpendicular to the unit vector `from`.
fn half_turn_perpendicular_to(from: &Direction) -> Rotation3<f64> {
    let helper = if from.x.abs() < HELPER_AXIS_SWITCH {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let axis = normalize(&cross(from, &helper));

    let matrix = 2.0 * axis * axis.transpose() - Matrix3::identity();
    Rotation3::from_matrix_unchecked(matrix)
}

/// `R = cos I + sin [a]x + (1 - cos) a a^T` for a unit axis `a`.
fn rodrigues(axis: &Direction, cos_theta: f64, sin_theta: f64) -> Rotation3<f64> {
    let matrix = Matrix3::identity() * cos_theta
        + axis.cross_matrix() * sin_theta
        + axis * axis.transpose() * (1.0 - cos_theta);
    Rotation3::from_matrix_unchecked(matrix)
}

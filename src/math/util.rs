use super::Vector2d;
use cgmath::prelude::*;

/// Rotates a vector 90 degrees counter-clockwise.
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}

/// Divides a vector by its magnitude.
///
/// # Returns
/// A tuple containing the unit vector and the original magnitude.
/// A zero vector yields NaN components and a magnitude of zero.
#[inline(always)]
pub fn normalize_with_magnitude(v: Vector2d) -> (Vector2d, f64) {
    let mag = v.magnitude();
    (v / mag, mag)
}

/// Computes the signed curvature of a planar curve.
///
/// # Parameters
/// * `vel` - The first derivative of the curve
/// * `acc` - The second derivative of the curve
///
/// # Returns
/// The curvature, positive when the curve turns counter-clockwise.
#[inline(always)]
pub fn signed_curvature(vel: Vector2d, acc: Vector2d) -> f64 {
    rot90(vel).dot(acc) / vel.magnitude2().powf(1.5)
}

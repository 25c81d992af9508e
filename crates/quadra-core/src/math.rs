//! Vector-math aliases and floating-point comparison helpers.
//!
//! All geometry code works in `f64` 3-space. The aliases pin cgmath's
//! generic types to `f64` once so the rest of the workspace never spells
//! out the scalar parameter.

use cgmath::InnerSpace;

/// A position in 3-space, scalar = f64.
pub type Point3 = cgmath::Point3<f64>;

/// A direction or displacement in 3-space, scalar = f64.
pub type Vector3 = cgmath::Vector3<f64>;

/// Default relative tolerance for [`soft_equiv`].
pub const SOFT_EPSILON: f64 = 1.0e-15;

/// One over the square root of two.
pub const SQRT_HALF: f64 = 0.707106781186548;

/// One over the square root of three.
pub const SQRT_THIRD: f64 = 0.577350269189626;

/// Soft equivalence of two floats under a relative tolerance.
///
/// Checks `|target - reference| <= |reference| * eps`, falling back to an
/// absolute check when the reference is exactly zero.
pub fn soft_equiv_eps(target: f64, reference: f64, eps: f64) -> bool {
    if (target - reference).abs() <= reference.abs() * eps {
        return true;
    }
    if reference == 0.0 {
        return target.abs() <= eps;
    }
    false
}

/// [`soft_equiv_eps`] with the default [`SOFT_EPSILON`] tolerance.
pub fn soft_equiv(target: f64, reference: f64) -> bool {
    soft_equiv_eps(target, reference, SOFT_EPSILON)
}

/// Whether a vector is a valid particle direction, i.e. has unit norm
/// within a loose tolerance.
///
/// Direction vectors are a caller contract throughout the engine; this
/// check backs the debug assertions at the transport entry points. The
/// tolerance is deliberately wider than [`SOFT_EPSILON`] so directions
/// that have been through a few rotations still pass.
pub fn is_direction(v: Vector3) -> bool {
    soft_equiv_eps(v.magnitude2(), 1.0, 1.0e-9)
}

//! Coordinate-axis selector for axis-aligned shapes.

use quadra_core::Vector3;
use std::fmt;

/// One of the three coordinate axes.
///
/// Axis-aligned planes and cylinders are parameterized on this instead of
/// storing a full normal or axis vector; the specialized dot products
/// below let their hot-path math skip the dropped component entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis (component 0).
    X,
    /// The y axis (component 1).
    Y,
    /// The z axis (component 2).
    Z,
}

impl Axis {
    /// Component index of this axis in a vector or point.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Unit vector along this axis.
    pub fn unit(self) -> Vector3 {
        match self {
            Self::X => Vector3::new(1.0, 0.0, 0.0),
            Self::Y => Vector3::new(0.0, 1.0, 0.0),
            Self::Z => Vector3::new(0.0, 0.0, 1.0),
        }
    }

    /// Dot product of the two components perpendicular to this axis.
    ///
    /// For an axis-aligned cylinder this is the whole projection math:
    /// dropping the axis component is equivalent to subtracting the
    /// projection onto the cylinder axis.
    pub fn planar_dot(self, a: Vector3, b: Vector3) -> f64 {
        match self {
            Self::X => a.y * b.y + a.z * b.z,
            Self::Y => a.x * b.x + a.z * b.z,
            Self::Z => a.x * b.x + a.y * b.y,
        }
    }

    /// Copy of `v` with the component along this axis zeroed.
    pub fn reject(self, v: Vector3) -> Vector3 {
        let mut out = v;
        out[self.index()] = 0.0;
        out
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

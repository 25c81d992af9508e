//! Shape construction errors.

use std::error::Error;
use std::fmt;

/// Rejected parameters for a [`Shape`](crate::Shape) constructor.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeError {
    /// A vector that must have unit norm does not.
    NotUnit {
        /// Which parameter failed the check (`"normal"` or `"axis"`).
        what: &'static str,
        /// The offending vector's squared norm.
        magnitude2: f64,
    },
    /// A radius that must be strictly positive is zero or negative.
    NonPositiveRadius {
        /// The offending radius.
        radius: f64,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotUnit { what, magnitude2 } => {
                write!(f, "{what} must be a unit vector (|v|^2 = {magnitude2})")
            }
            Self::NonPositiveRadius { radius } => {
                write!(f, "radius must be positive (got {radius})")
            }
        }
    }
}

impl Error for ShapeError {}

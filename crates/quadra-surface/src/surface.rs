//! A registered surface: shape plus identity and flags.

use quadra_core::{Point3, Sense, SurfaceId, Vector3};
use std::fmt;

use crate::shape::Shape;

/// A quadric surface registered with a geometry.
///
/// Couples a [`Shape`] with the user-visible identifier stamped on it at
/// registration and the reflecting flag. Registered surfaces are
/// immutable: the tracking loop reads them concurrently with nothing.
#[derive(Clone, Debug)]
pub struct Surface {
    id: SurfaceId,
    reflecting: bool,
    shape: Shape,
}

impl Surface {
    /// Register `shape` under `id`.
    ///
    /// Reflecting surfaces return particles across their normal instead
    /// of passing them into a neighboring cell.
    pub fn new(id: SurfaceId, shape: Shape, reflecting: bool) -> Self {
        Self {
            id,
            reflecting,
            shape,
        }
    }

    /// The user-visible identifier.
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Whether particles reflect off this surface instead of crossing it.
    pub fn is_reflecting(&self) -> bool {
        self.reflecting
    }

    /// The geometric definition.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Which side of the surface `position` is on. See [`Shape::sense_of`].
    pub fn sense_of(&self, position: Point3) -> Sense {
        self.shape.sense_of(position)
    }

    /// Ray intersection. See [`Shape::intersect`].
    pub fn intersect(&self, position: Point3, direction: Vector3, sense: Sense) -> Option<f64> {
        self.shape.intersect(position, direction, sense)
    }

    /// Outward unit normal at a point on the surface. See [`Shape::normal_at`].
    pub fn normal_at(&self, position: Point3) -> Vector3 {
        self.shape.normal_at(position)
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface {}: {}", self.id, self.shape)?;
        if self.reflecting {
            write!(f, " <reflecting>")?;
        }
        Ok(())
    }
}

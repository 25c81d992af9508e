//! A cell: a region bounded by surface/sense constraints.

use quadra_core::{CellFlags, CellId, CellIndex, Point3, Sense, SurfaceIndex, Vector3};
use quadra_surface::Surface;
use smallvec::SmallVec;

/// Bounding constraints of a cell, in input order.
///
/// Small-vector backed: cells rarely have more than eight faces.
pub type Bounds = SmallVec<[(SurfaceIndex, Sense); 8]>;

const NO_NEIGHBORS: &[CellIndex] = &[];

/// A region of space defined by its bounding surfaces.
///
/// A non-negated cell is the set of points that agree with every
/// `(surface, sense)` constraint in its bound list. A negated cell is
/// the complement: any point that *disagrees* with at least one
/// constraint. Negation is how a single "outside world" cell wraps a
/// complicated interior without enumerating dead regions face by face.
///
/// Cells do not hold surface data; they reference surfaces by index into
/// the geometry's surface vector, which is passed into the query
/// methods. The only mutable state is the neighborhood cache, which
/// records the cells discovered so far on the far side of each surface.
#[derive(Clone, Debug)]
pub struct Cell {
    bounds: Bounds,
    user_id: CellId,
    index: CellIndex,
    flags: CellFlags,
    /// Neighborhood cache: known cells on the other side of each surface.
    ///
    /// Linear-probed rather than hashed: the key set is small and the
    /// probe sits on the per-crossing fast path. Keys are usually this
    /// cell's bounding surfaces, but a global search may link through a
    /// surface that is not among the bounds, so entries are materialized
    /// on first write rather than fixed at construction.
    hood: Vec<(SurfaceIndex, Vec<CellIndex>)>,
}

impl Cell {
    pub(crate) fn new(bounds: Bounds, user_id: CellId, index: CellIndex, flags: CellFlags) -> Self {
        debug_assert!(!bounds.is_empty());
        let hood = bounds.iter().map(|&(s, _)| (s, Vec::new())).collect();
        Self {
            bounds,
            user_id,
            index,
            flags,
            hood,
        }
    }

    /// The user-visible identifier.
    pub fn user_id(&self) -> CellId {
        self.user_id
    }

    /// This cell's index in the geometry's cell vector.
    pub fn index(&self) -> CellIndex {
        self.index
    }

    /// The bounding `(surface, sense)` constraints, in input order.
    pub fn bounds(&self) -> &[(SurfaceIndex, Sense)] {
        &self.bounds
    }

    /// Whether particles entering this cell are terminated.
    pub fn is_dead(&self) -> bool {
        self.flags.contains(CellFlags::DEAD)
    }

    /// Whether membership is inverted.
    pub fn is_negated(&self) -> bool {
        self.flags.contains(CellFlags::NEGATED)
    }

    /// Whether `position` is inside this cell.
    ///
    /// `skip` names a surface the caller knows the particle just
    /// crossed: its constraint is not evaluated, because a finite-step
    /// float round trip can land the advanced point marginally on the
    /// wrong side of the crossed surface. For a negated cell the skipped
    /// surface counts as a disagreement, since having just crossed it the
    /// particle is on the negated side of it by construction.
    pub fn contains(
        &self,
        surfaces: &[Surface],
        position: Point3,
        skip: Option<SurfaceIndex>,
    ) -> bool {
        if self.is_negated() {
            for &(surface, sense) in &self.bounds {
                if skip == Some(surface) {
                    return true;
                }
                if surfaces[surface.0].sense_of(position) != sense {
                    return true;
                }
            }
            false
        } else {
            self.bounds.iter().all(|&(surface, sense)| {
                skip == Some(surface) || surfaces[surface.0].sense_of(position) == sense
            })
        }
    }

    /// Nearest bounding surface hit by the ray `position + t*direction`.
    ///
    /// Returns the surface, the sense this cell holds it at, and the
    /// distance `t >= 0`. Ties are broken by input order (first wins);
    /// the tracking layer's opposite-side and global searches make
    /// either choice workable. `None` means no bound intersects the ray,
    /// which for a well-formed closed cell cannot happen.
    pub fn intersect(
        &self,
        surfaces: &[Surface],
        position: Point3,
        direction: Vector3,
    ) -> Option<(SurfaceIndex, Sense, f64)> {
        let mut nearest: Option<(SurfaceIndex, Sense, f64)> = None;

        for &(surface, sense) in &self.bounds {
            if let Some(distance) = surfaces[surface.0].intersect(position, direction, sense) {
                if nearest.is_none_or(|(_, _, best)| distance < best) {
                    nearest = Some((surface, sense, distance));
                }
            }
        }

        nearest
    }

    /// Cells known so far to border this cell across `surface`.
    ///
    /// Empty until transport discovers a crossing of that surface.
    pub fn neighbors(&self, surface: SurfaceIndex) -> &[CellIndex] {
        self.hood
            .iter()
            .find(|&&(s, _)| s == surface)
            .map_or(NO_NEIGHBORS, |(_, cells)| cells)
    }

    /// Writable neighbor list for `surface`, materialized on first use.
    pub(crate) fn neighbors_mut(&mut self, surface: SurfaceIndex) -> &mut Vec<CellIndex> {
        if let Some(i) = self.hood.iter().position(|&(s, _)| s == surface) {
            return &mut self.hood[i].1;
        }
        self.hood.push((surface, Vec::new()));
        &mut self.hood.last_mut().expect("just pushed").1
    }
}

//! Error types for geometry construction and particle tracking.

use quadra_core::{CellId, CellIndex, Point3, Sense, SurfaceId, Vector3};
use std::error::Error;
use std::fmt;

/// Formats a point as `[x, y, z]` for error messages and warnings.
pub(crate) struct Triple(pub f64, pub f64, pub f64);

impl From<Point3> for Triple {
    fn from(p: Point3) -> Self {
        Self(p.x, p.y, p.z)
    }
}

impl From<Vector3> for Triple {
    fn from(v: Vector3) -> Self {
        Self(v.x, v.y, v.z)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.16e}, {:.16e}, {:.16e}]", self.0, self.1, self.2)
    }
}

/// Rejected geometry construction input.
///
/// Construction errors leave no partial state behind: the offending
/// surface or cell is validated in full before anything is inserted.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildError {
    /// A surface with this user id already exists.
    DuplicateSurfaceId {
        /// The id given twice.
        id: SurfaceId,
    },
    /// A cell with this user id already exists.
    DuplicateCellId {
        /// The id given twice.
        id: CellId,
    },
    /// A cell references a surface id that was never added.
    UnknownSurface {
        /// The cell being added.
        cell: CellId,
        /// The unresolvable surface reference.
        surface: SurfaceId,
    },
    /// A cell was given an empty bounding-surface list.
    EmptyCell {
        /// The cell being added.
        cell: CellId,
    },
    /// A cell's signed surface list contains a zero.
    ///
    /// Zero cannot carry a sense sign, so it is reserved as illegal.
    ZeroSurfaceReference {
        /// The cell being added.
        cell: CellId,
    },
    /// The geometry was frozen by `complete_input` before this call.
    Frozen,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSurfaceId { id } => {
                write!(f, "surface user id {id} is already in use")
            }
            Self::DuplicateCellId { id } => write!(f, "cell user id {id} is already in use"),
            Self::UnknownSurface { cell, surface } => {
                write!(f, "cell {cell} references unknown surface {surface}")
            }
            Self::EmptyCell { cell } => write!(f, "cell {cell} has no bounding surfaces"),
            Self::ZeroSurfaceReference { cell } => {
                write!(f, "cell {cell} contains a zero surface reference")
            }
            Self::Frozen => write!(f, "geometry input was already completed"),
        }
    }
}

impl Error for BuildError {}

/// State of a lost or stuck particle, dumped with fatal tracking errors.
///
/// Carries everything the original failure printout showed: where the
/// particle was, where it was going, which cell it was in, and the
/// connectivity the engine had discovered for that cell's faces.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackDiagnostic {
    /// User id of the cell the particle was tracked in.
    pub cell: CellId,
    /// Internal index of that cell.
    pub cell_index: CellIndex,
    /// Particle position at the failure.
    pub position: Point3,
    /// Particle direction at the failure.
    pub direction: Vector3,
    /// Per-face connectivity known so far: each bounding surface with
    /// its sense and the user ids of the neighbor cells discovered
    /// across it.
    pub connectivity: Vec<(SurfaceId, Sense, Vec<CellId>)>,
}

impl fmt::Display for TrackDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell index {} (user id {}) at position {} direction {}; known connectivity:",
            self.cell_index,
            self.cell,
            Triple::from(self.position),
            Triple::from(self.direction)
        )?;
        for (surface, sense, neighbors) in &self.connectivity {
            write!(f, " {sense}{surface}:[")?;
            for (i, neighbor) in neighbors.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{neighbor}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Fatal failure during particle tracking.
///
/// All of these indicate an ill-formed geometry (gaps, overlaps, or an
/// unclosed cell), not a recoverable runtime condition. The host should
/// treat the current transport call as unrecoverable; the engine's
/// neighborhood caches may be left partially updated.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackError {
    /// A cell's bounding surfaces did not intersect the ray at all.
    /// A closed cell always has a surface ahead of the particle.
    NoIntersection {
        /// User id of the cell being tracked.
        cell: CellId,
        /// Particle position.
        position: Point3,
        /// Particle direction.
        direction: Vector3,
    },
    /// The registry has no cell on the far side of a crossed surface.
    MissingConnectivity {
        /// User id of the crossed surface.
        surface: SurfaceId,
        /// Particle state and discovered connectivity.
        diagnostic: TrackDiagnostic,
    },
    /// No cell claims the particle's advanced position.
    Lost {
        /// Particle state and discovered connectivity.
        diagnostic: TrackDiagnostic,
    },
    /// A global point location found no containing cell.
    CellNotFound {
        /// The unlocated point.
        position: Point3,
    },
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoIntersection {
                cell,
                position,
                direction,
            } => write!(
                f,
                "no bounding surface of cell {cell} intersects the ray from {} along {}",
                Triple::from(*position),
                Triple::from(*direction)
            ),
            Self::MissingConnectivity {
                surface,
                diagnostic,
            } => write!(
                f,
                "surface connectivity not found for surface {surface}: {diagnostic}"
            ),
            Self::Lost { diagnostic } => write!(f, "particle lost: {diagnostic}"),
            Self::CellNotFound { position } => {
                write!(f, "no cell contains point {}", Triple::from(*position))
            }
        }
    }
}

impl Error for TrackError {}

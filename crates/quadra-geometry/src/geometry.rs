//! The geometry registry: surface and cell ownership, id translation,
//! and the lazily-discovered connectivity index.

use indexmap::IndexMap;
use quadra_core::{CellFlags, CellId, CellIndex, Sense, SurfaceId, SurfaceIndex};
use quadra_surface::{Shape, Surface};
use std::fmt;

use crate::cell::{Bounds, Cell};
use crate::error::BuildError;
use crate::track::StepCache;

// Compile-time assertion: Geometry is Send. Hosts parallelize over
// particles by moving one engine instance to each thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Geometry>();
    }
};

/// A complete problem geometry and its tracking state.
///
/// `Geometry` is built once by a sequence of
/// [`add_surface`](Geometry::add_surface) /
/// [`add_cell`](Geometry::add_cell) calls, sealed with
/// [`complete_input`](Geometry::complete_input), and then queried for
/// the lifetime of the transport run. It has two points of interface:
/// user ids (arbitrary integers, used only when geometry is put in or
/// reported out) and dense internal indices (`0..N-1`, used by the
/// transport loop and by hosts to attach per-cell data such as cross
/// sections).
///
/// After construction the registry itself is immutable; the only state
/// that changes during tracking is the per-cell neighborhood caches, the
/// unmatched-face counter, and the one-step cache connecting
/// [`find_distance`](Geometry::find_distance) to
/// [`find_new_cell`](Geometry::find_new_cell).
#[derive(Debug, Default)]
pub struct Geometry {
    pub(crate) surfaces: Vec<Surface>,
    pub(crate) cells: Vec<Cell>,

    /// User id → internal index, in insertion order.
    surface_ids: IndexMap<SurfaceId, SurfaceIndex>,
    cell_ids: IndexMap<CellId, CellIndex>,

    /// `(surface, sense)` → cells whose definition holds that surface at
    /// that sense, as seen from *outside* the cell: a negated cell is
    /// registered under the opposite of each written sense, because its
    /// natural boundary faces the other way. This is what the tracking
    /// layer consults to find candidate cells on the far side of a
    /// crossed surface.
    pub(crate) connectivity: IndexMap<(SurfaceIndex, Sense), Vec<CellIndex>>,

    /// Count of cell faces not yet linked to a neighbor. Starts at the
    /// total number of (cell, bounding-surface) pairs and decrements as
    /// tracking discovers shared faces; zero means the connectivity
    /// graph is fully discovered.
    pub(crate) unmatched_faces: usize,

    frozen: bool,

    pub(crate) cache: Option<StepCache>,
}

impl Geometry {
    /// An empty geometry, ready for input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `shape` under the user id `id`.
    ///
    /// The shape is copied; the caller keeps its prototype. Returns the
    /// internal index assigned to the new surface.
    pub fn add_surface(&mut self, id: SurfaceId, shape: Shape) -> Result<SurfaceIndex, BuildError> {
        self.insert_surface(id, shape, false)
    }

    /// Register a reflecting surface. See [`add_surface`](Geometry::add_surface).
    ///
    /// Particles hitting a reflecting surface stay in their cell with
    /// their direction mirrored across the surface normal.
    pub fn add_reflecting_surface(
        &mut self,
        id: SurfaceId,
        shape: Shape,
    ) -> Result<SurfaceIndex, BuildError> {
        self.insert_surface(id, shape, true)
    }

    fn insert_surface(
        &mut self,
        id: SurfaceId,
        shape: Shape,
        reflecting: bool,
    ) -> Result<SurfaceIndex, BuildError> {
        if self.frozen {
            return Err(BuildError::Frozen);
        }
        if self.surface_ids.contains_key(&id) {
            return Err(BuildError::DuplicateSurfaceId { id });
        }

        let index = SurfaceIndex(self.surfaces.len());
        self.surfaces.push(Surface::new(id, shape, reflecting));
        self.surface_ids.insert(id, index);

        debug_assert_eq!(self.surface_ids.len(), self.surfaces.len());
        Ok(index)
    }

    /// Add a cell bounded by the given signed surface references.
    ///
    /// Each non-zero entry `s` references the surface with user id
    /// `|s|`; a positive `s` places the cell on the surface's
    /// positive-sense side, a negative `s` on the negative side. Zero is
    /// illegal. `flags` may mark the cell [`DEAD`](CellFlags::DEAD)
    /// and/or [`NEGATED`](CellFlags::NEGATED).
    ///
    /// Returns the internal index assigned to the new cell. On error,
    /// nothing was inserted.
    pub fn add_cell(
        &mut self,
        id: CellId,
        surfaces: &[i32],
        flags: CellFlags,
    ) -> Result<CellIndex, BuildError> {
        if self.frozen {
            return Err(BuildError::Frozen);
        }
        if self.cell_ids.contains_key(&id) {
            return Err(BuildError::DuplicateCellId { id });
        }
        if surfaces.is_empty() {
            return Err(BuildError::EmptyCell { cell: id });
        }

        // Resolve the whole reference list before touching any state so
        // a failed add leaves the registry untouched.
        let mut bounds = Bounds::with_capacity(surfaces.len());
        for &signed in surfaces {
            if signed == 0 {
                return Err(BuildError::ZeroSurfaceReference { cell: id });
            }
            let surface_id = SurfaceId(signed.unsigned_abs());
            let sense = Sense::from(signed > 0);
            let index = self
                .surface_ids
                .get(&surface_id)
                .copied()
                .ok_or(BuildError::UnknownSurface {
                    cell: id,
                    surface: surface_id,
                })?;
            bounds.push((index, sense));
        }

        let index = CellIndex(self.cells.len());

        // Every face starts unmatched; tracking pairs them up later.
        self.unmatched_faces += bounds.len();

        // Register under the sense a neighbor would see: a negated
        // cell's boundary faces outward, so each written sense flips.
        for &(surface, sense) in &bounds {
            let key = if flags.contains(CellFlags::NEGATED) {
                (surface, !sense)
            } else {
                (surface, sense)
            };
            self.connectivity.entry(key).or_default().push(index);
        }

        self.cells.push(Cell::new(bounds, id, index, flags));
        self.cell_ids.insert(id, index);

        debug_assert_eq!(self.cell_ids.len(), self.cells.len());
        Ok(index)
    }

    /// Seal the geometry: compact internal storage and reject any
    /// further `add_surface` / `add_cell` calls.
    pub fn complete_input(&mut self) {
        self.surfaces.shrink_to_fit();
        self.cells.shrink_to_fit();
        self.frozen = true;
        log::debug!(
            "geometry input completed: {} surfaces, {} cells, {} unmatched faces",
            self.surfaces.len(),
            self.cells.len(),
            self.unmatched_faces
        );
    }

    /// All surfaces, indexed by [`SurfaceIndex`].
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// All cells, indexed by [`CellIndex`].
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells in the geometry.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of surfaces in the geometry (registered, not necessarily
    /// all referenced by cells).
    pub fn num_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    /// The cell at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index.0]
    }

    /// The surface at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn surface(&self, index: SurfaceIndex) -> &Surface {
        &self.surfaces[index.0]
    }

    /// Whether the cell at `index` terminates particles.
    pub fn is_dead(&self, index: CellIndex) -> bool {
        self.cells[index.0].is_dead()
    }

    /// User id of the cell at `index`.
    pub fn cell_user_id(&self, index: CellIndex) -> CellId {
        self.cells[index.0].user_id()
    }

    /// User id of the surface at `index`.
    pub fn surface_user_id(&self, index: SurfaceIndex) -> SurfaceId {
        self.surfaces[index.0].id()
    }

    /// Internal index of the cell with user id `id`, if it exists.
    pub fn cell_index_of(&self, id: CellId) -> Option<CellIndex> {
        self.cell_ids.get(&id).copied()
    }

    /// Internal index of the surface with user id `id`, if it exists.
    pub fn surface_index_of(&self, id: SurfaceId) -> Option<SurfaceIndex> {
        self.surface_ids.get(&id).copied()
    }

    /// Count of cell faces whose far side has not been discovered yet.
    pub fn unmatched_faces(&self) -> usize {
        self.unmatched_faces
    }

    /// Whether every cell face has been linked to a neighbor.
    pub fn is_connectivity_complete(&self) -> bool {
        self.unmatched_faces == 0
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "surfaces:")?;
        for surface in &self.surfaces {
            writeln!(f, "  {surface}")?;
        }

        writeln!(f, "cells:")?;
        for cell in &self.cells {
            write!(f, "  cell {}:", cell.user_id())?;
            for &(surface, sense) in cell.bounds() {
                write!(f, " {sense}{}", self.surfaces[surface.0].id())?;
            }
            if cell.is_dead() {
                write!(f, " <dead>")?;
            }
            if cell.is_negated() {
                write!(f, " <negated>")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "discovered connectivity:")?;
        for (&(surface, sense), cells) in &self.connectivity {
            write!(f, "  {sense}{}:", self.surfaces[surface.0].id())?;
            for &cell in cells {
                write!(f, " {}", self.cells[cell.0].user_id())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

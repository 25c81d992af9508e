//! Quadra: a combinatorial solid geometry engine for Monte Carlo
//! particle transport.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Quadra sub-crates. For most hosts, adding `quadra` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use quadra::prelude::*;
//!
//! // A unit cube bounded by axis planes, with a negated dead cell
//! // covering everything outside.
//! let mut geometry = Geometry::new();
//! geometry.add_surface(SurfaceId(1), Shape::plane_x(0.0)).unwrap();
//! geometry.add_surface(SurfaceId(2), Shape::plane_x(1.0)).unwrap();
//! geometry.add_surface(SurfaceId(3), Shape::plane_y(0.0)).unwrap();
//! geometry.add_surface(SurfaceId(4), Shape::plane_y(1.0)).unwrap();
//! geometry.add_surface(SurfaceId(5), Shape::plane_z(0.0)).unwrap();
//! geometry.add_surface(SurfaceId(6), Shape::plane_z(1.0)).unwrap();
//! geometry
//!     .add_cell(CellId(1), &[1, -2, 3, -4, 5, -6], CellFlags::empty())
//!     .unwrap();
//! geometry
//!     .add_cell(
//!         CellId(2),
//!         &[1, -2, 3, -4, 5, -6],
//!         CellFlags::DEAD | CellFlags::NEGATED,
//!     )
//!     .unwrap();
//! geometry.complete_input();
//!
//! // One transport step from the middle of the cube.
//! let position = Point3::new(0.5, 0.5, 0.5);
//! let direction = Vector3::new(1.0, 0.0, 0.0);
//! let cell = geometry.find_cell(position).unwrap();
//! let distance = geometry.find_distance(position, direction, cell).unwrap();
//! assert!((distance - 0.5).abs() < 1.0e-12);
//!
//! let crossing = geometry.find_new_cell(position, direction).unwrap();
//! assert_eq!(crossing.status, Status::DeadCell);
//! ```
//!
//! # Crates
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `quadra-core` | Vector aliases, ids, senses, flags |
//! | [`surface`] | `quadra-surface` | Shape family and ray intersection |
//! | [`geometry`] | `quadra-geometry` | Cell registry and tracking kernel |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Vector aliases, identifiers, senses, and flags (`quadra-core`).
pub use quadra_core as types;

/// The shape family and ray intersection (`quadra-surface`).
pub use quadra_surface as surface;

/// Cell registry and the tracking kernel (`quadra-geometry`).
pub use quadra_geometry as geometry;

/// The types most hosts need, importable in one line.
pub mod prelude {
    pub use quadra_core::{
        CellFlags, CellId, CellIndex, Point3, Sense, SurfaceId, SurfaceIndex, Vector3,
    };
    pub use quadra_geometry::{BuildError, Crossing, Geometry, Status, TrackError};
    pub use quadra_surface::{Shape, ShapeError, Surface};
}

//! Core types for the Quadra particle-tracking geometry engine.
//!
//! This is the leaf crate with no internal Quadra dependencies. It defines
//! the vector-math aliases and tolerances, the typed identifiers used to
//! address surfaces and cells, the surface [`Sense`] enum, and the
//! [`CellFlags`] bitfield.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod flags;
pub mod id;
pub mod math;
pub mod sense;

// Re-export core types at crate root for convenience.
pub use flags::CellFlags;
pub use id::{CellId, CellIndex, SurfaceId, SurfaceIndex};
pub use math::{is_direction, soft_equiv, soft_equiv_eps, Point3, Vector3, SOFT_EPSILON};
pub use sense::Sense;

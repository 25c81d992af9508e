//! Geometry fixtures shared by Quadra integration tests and benchmarks.
//!
//! Each builder returns a sealed [`Geometry`] with a documented id
//! scheme, so tests can address cells and surfaces without rebuilding
//! the arithmetic.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{amr_like_geometry, mesh_geometry, tangent_spheres_geometry};

//! Cell registry and particle-tracking kernel for Quadra.
//!
//! A [`Geometry`] owns every surface and cell in a problem and answers
//! the three queries at the center of a Monte Carlo transport loop:
//!
//! 1. [`find_distance`](Geometry::find_distance): how far along the
//!    current direction is the nearest bounding surface of the current
//!    cell?
//! 2. [`find_new_cell`](Geometry::find_new_cell): which cell is on the
//!    other side of that surface?
//! 3. [`find_cell`](Geometry::find_cell): which cell contains an
//!    arbitrary point?
//!
//! Surface-to-cell connectivity is not declared up front. It is
//! discovered as particles cross surfaces and memoized in per-cell
//! neighborhood lists, so steady-state transport answers query 2 with a
//! short list probe instead of a registry sweep. A counter of unmatched
//! cell faces tracks discovery; when it reaches zero the connectivity
//! graph is complete (an informational event, not a correctness
//! requirement).
//!
//! # Ownership model
//!
//! Cells reference surfaces and each other by dense index into the
//! vectors the `Geometry` owns; there are no shared pointers and no
//! cycles. The transport entry points take `&mut self` because they
//! update the neighborhood caches and the per-step cache. A `Geometry`
//! is a single-threaded engine, and hosts that want parallel particles
//! run one instance per thread.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod geometry;
pub mod track;

pub use cell::Cell;
pub use error::{BuildError, TrackDiagnostic, TrackError};
pub use geometry::Geometry;
pub use track::{Crossing, Status};

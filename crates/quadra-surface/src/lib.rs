//! Quadric surface family and ray intersection for Quadra.
//!
//! A surface is the zero-set of a quadratic polynomial in three
//! coordinates. This crate provides the concrete family used by the
//! tracking engine (planes, axis-aligned planes, spheres, and cylinders
//! in general and axis-aligned form) behind the [`Shape`] value type,
//! plus the shared quadratic root policy every curved intersection
//! funnels through.
//!
//! Every shape answers three questions:
//!
//! - [`sense_of`](Shape::sense_of): which side of the surface is a point on?
//! - [`intersect`](Shape::intersect): how far along a ray is the surface,
//!   given which side the particle believes it is on?
//! - [`normal_at`](Shape::normal_at): the outward unit normal at a point
//!   on the surface, for reflection and surface-current tallies.
//!
//! [`Surface`] couples a shape with the user-visible identifier and the
//! reflecting flag stamped on it when it is registered with a geometry.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod axis;
pub mod error;
pub mod shape;
pub mod solve;
pub mod surface;

pub use axis::Axis;
pub use error::ShapeError;
pub use shape::Shape;
pub use solve::solve_quadratic;
pub use surface::Surface;

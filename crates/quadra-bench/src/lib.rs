//! Benchmark profiles and particle-history drivers for Quadra.
//!
//! The drivers mirror what a host transport code does with the engine:
//! sample a position and direction, locate the particle, then alternate
//! distance and new-cell queries until the history ends in a dead cell.
//! Sampling is deterministic (ChaCha8 from a caller seed) so benchmark
//! runs are reproducible.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cgmath::point3;
use quadra_core::{Point3, Vector3};
use quadra_geometry::{Geometry, Status};
use rand::prelude::*;

/// Sample an isotropic unit direction.
pub fn random_direction<R: Rng>(rng: &mut R) -> Vector3 {
    let phi = std::f64::consts::TAU * rng.random::<f64>();
    let u = 2.0 * rng.random::<f64>() - 1.0;
    let mu = (1.0 - u * u).sqrt();
    Vector3::new(u, mu * phi.cos(), mu * phi.sin())
}

/// Sample a position uniformly inside the cube `(0, side)^3`.
pub fn random_position<R: Rng>(rng: &mut R, side: f64) -> Point3 {
    point3(
        side * rng.random::<f64>(),
        side * rng.random::<f64>(),
        side * rng.random::<f64>(),
    )
}

/// Transport one particle until it dies (or `max_steps` elapse).
///
/// Returns the number of surface crossings performed.
pub fn run_history(
    geometry: &mut Geometry,
    position: Point3,
    direction: Vector3,
    max_steps: usize,
) -> usize {
    let mut position = position;
    let mut cell = geometry.find_cell(position).expect("source outside geometry");
    for step in 1..=max_steps {
        let (crossing, _) = geometry
            .find_new_cell_from(position, direction, cell)
            .expect("tracking failed");
        if crossing.status == Status::DeadCell {
            return step;
        }
        position = crossing.position;
        cell = crossing.cell;
    }
    max_steps
}

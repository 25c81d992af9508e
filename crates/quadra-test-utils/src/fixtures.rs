//! Canned geometries with documented id schemes.

use cgmath::{point3, vec3};
use quadra_core::{CellFlags, CellId, SurfaceId};
use quadra_geometry::Geometry;
use quadra_surface::Shape;

/// An `n` x `n` x `n` mesh of unit cubes bounded by axis planes, with a
/// single negated dead cell covering everything outside.
///
/// Id scheme (`c` is an integer plane coordinate in `0..=n`):
///
/// - x plane at `c`: surface id `1 + c`
/// - y plane at `c`: surface id `n + 2 + c`
/// - z plane at `c`: surface id `2n + 3 + c`
/// - cube `(i, j, k)`: cell id `i + n*j + n^2*k` (x fastest)
/// - outside cell: id `n^3`, DEAD | NEGATED
///
/// # Panics
///
/// Panics if `n == 0`.
pub fn mesh_geometry(n: u32) -> Geometry {
    assert!(n > 0, "mesh must have at least one cube per side");

    let x_id = |c: u32| 1 + c;
    let y_id = |c: u32| n + 2 + c;
    let z_id = |c: u32| 2 * n + 3 + c;

    let mut geometry = Geometry::new();
    for c in 0..=n {
        let coord = f64::from(c);
        geometry
            .add_surface(SurfaceId(x_id(c)), Shape::plane_x(coord))
            .unwrap();
        geometry
            .add_surface(SurfaceId(y_id(c)), Shape::plane_y(coord))
            .unwrap();
        geometry
            .add_surface(SurfaceId(z_id(c)), Shape::plane_z(coord))
            .unwrap();
    }

    let signed = |id: u32| i32::try_from(id).unwrap();
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                let id = i + n * j + n * n * k;
                let bounds = [
                    signed(x_id(i)),
                    -signed(x_id(i + 1)),
                    signed(y_id(j)),
                    -signed(y_id(j + 1)),
                    signed(z_id(k)),
                    -signed(z_id(k + 1)),
                ];
                geometry
                    .add_cell(CellId(id), &bounds, CellFlags::empty())
                    .unwrap();
            }
        }
    }

    geometry
        .add_cell(
            CellId(n * n * n),
            &[
                signed(x_id(0)),
                -signed(x_id(n)),
                signed(y_id(0)),
                -signed(y_id(n)),
                signed(z_id(0)),
                -signed(z_id(n)),
            ],
            CellFlags::DEAD | CellFlags::NEGATED,
        )
        .unwrap();

    geometry.complete_input();
    geometry
}

/// A plane-bounded geometry with mixed refinement, the kind of cell
/// layout adaptive meshing produces: one wide cell at the bottom, two
/// above it, four at the top, all sharing faces at different scales.
///
/// Useful for exercising corner streaming: several cell corners meet on
/// shared planes, so particles aimed at them land on two surfaces at
/// once.
///
/// Surface ids: y planes 1-4 (at 0, 2, 3, 4), x planes 11-15 (at -2,
/// -1, 0, 1, 2), z planes 21-22 (at -2, 2). Cell ids 1-7 inside, 100
/// for the dead negated outside.
pub fn amr_like_geometry() -> Geometry {
    let mut geometry = Geometry::new();

    for (id, coord) in [(1, 0.0), (2, 2.0), (3, 3.0), (4, 4.0)] {
        geometry
            .add_surface(SurfaceId(id), Shape::plane_y(coord))
            .unwrap();
    }
    for (id, coord) in [(11, -2.0), (12, -1.0), (13, 0.0), (14, 1.0), (15, 2.0)] {
        geometry
            .add_surface(SurfaceId(id), Shape::plane_x(coord))
            .unwrap();
    }
    for (id, coord) in [(21, -2.0), (22, 2.0)] {
        geometry
            .add_surface(SurfaceId(id), Shape::plane_z(coord))
            .unwrap();
    }

    let none = CellFlags::empty();
    // Bottom row: one wide cell.
    geometry
        .add_cell(CellId(1), &[21, -22, 1, -2, 11, -15], none)
        .unwrap();
    // Second row: two cells.
    geometry
        .add_cell(CellId(2), &[21, -22, 2, -3, 11, -13], none)
        .unwrap();
    geometry
        .add_cell(CellId(3), &[21, -22, 2, -3, 13, -15], none)
        .unwrap();
    // Third row: four cells.
    geometry
        .add_cell(CellId(4), &[21, -22, 3, -4, 11, -12], none)
        .unwrap();
    geometry
        .add_cell(CellId(5), &[21, -22, 3, -4, 12, -13], none)
        .unwrap();
    geometry
        .add_cell(CellId(6), &[21, -22, 3, -4, 13, -14], none)
        .unwrap();
    geometry
        .add_cell(CellId(7), &[21, -22, 3, -4, 14, -15], none)
        .unwrap();
    // Outside.
    geometry
        .add_cell(
            CellId(100),
            &[21, -22, 1, -4, 11, -15],
            CellFlags::DEAD | CellFlags::NEGATED,
        )
        .unwrap();

    geometry.complete_input();
    geometry
}

/// Two unit spheres tangent at the origin inside a unit-radius cylinder
/// along x, with planes through the tangency circles. Every surface
/// pair in the middle region is mutually tangent, which makes the
/// in-between cell a worst case for grazing intersections.
///
/// Surface ids: spheres 1 (center x = -1) and 2 (center x = +1),
/// cylinder 3, planes 4 (x = -1) and 5 (x = +1). Cells: 10 and 20
/// inside the spheres, 30 between them, 110/120/130 dead caps and
/// shell.
pub fn tangent_spheres_geometry() -> Geometry {
    let mut geometry = Geometry::new();

    geometry
        .add_surface(
            SurfaceId(1),
            Shape::sphere(point3(-1.0, 0.0, 0.0), 1.0).unwrap(),
        )
        .unwrap();
    geometry
        .add_surface(
            SurfaceId(2),
            Shape::sphere(point3(1.0, 0.0, 0.0), 1.0).unwrap(),
        )
        .unwrap();
    geometry
        .add_surface(
            SurfaceId(3),
            Shape::cylinder(point3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), 1.0).unwrap(),
        )
        .unwrap();
    geometry
        .add_surface(SurfaceId(4), Shape::plane_x(-1.0))
        .unwrap();
    geometry
        .add_surface(SurfaceId(5), Shape::plane_x(1.0))
        .unwrap();

    let none = CellFlags::empty();
    let dead = CellFlags::DEAD;
    geometry.add_cell(CellId(10), &[-1], none).unwrap();
    geometry.add_cell(CellId(20), &[-2], none).unwrap();
    // Between the spheres, inside the cylinder.
    geometry
        .add_cell(CellId(30), &[4, -5, 1, 2, -3], none)
        .unwrap();
    // Dead caps beyond the planes and the shell outside the cylinder.
    geometry.add_cell(CellId(110), &[-4, 1], dead).unwrap();
    geometry.add_cell(CellId(120), &[5, 2], dead).unwrap();
    geometry.add_cell(CellId(130), &[4, -5, 3], dead).unwrap();

    geometry.complete_input();
    geometry
}

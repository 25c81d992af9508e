//! The concrete quadric shapes.

use cgmath::InnerSpace;
use quadra_core::{is_direction, soft_equiv_eps, Point3, Sense, Vector3};
use std::fmt;

use crate::axis::Axis;
use crate::error::ShapeError;
use crate::solve::solve_quadratic;

/// Tolerance for the unit-vector checks on constructor inputs.
const UNIT_EPSILON: f64 = 1.0e-9;

/// Geometric definition of a quadric surface.
///
/// `Shape` is a pure value: it has no identifier and no flags. Callers
/// build one with the constructors below and hand it to the geometry,
/// which clones it into a registered [`Surface`](crate::Surface).
///
/// The variant set is closed. Tracking spends most of its time matching
/// on it inside [`sense_of`](Shape::sense_of) and
/// [`intersect`](Shape::intersect), and a tagged variant keeps those
/// loops free of virtual dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    kind: Kind,
}

#[derive(Clone, Debug, PartialEq)]
enum Kind {
    /// General plane: unit normal and a point on the plane.
    Plane { normal: Vector3, point: Point3 },
    /// Plane perpendicular to a coordinate axis at `coord`.
    AxisPlane { axis: Axis, coord: f64 },
    /// Sphere with center and radius.
    Sphere { center: Point3, radius: f64 },
    /// Cylinder around an arbitrary unit axis through `point`.
    Cylinder {
        point: Point3,
        axis: Vector3,
        radius: f64,
    },
    /// Cylinder around a line parallel to a coordinate axis.
    AxisCylinder {
        axis: Axis,
        point: Point3,
        radius: f64,
    },
}

fn check_unit(what: &'static str, v: Vector3) -> Result<(), ShapeError> {
    let magnitude2 = v.magnitude2();
    if soft_equiv_eps(magnitude2, 1.0, UNIT_EPSILON) {
        Ok(())
    } else {
        Err(ShapeError::NotUnit { what, magnitude2 })
    }
}

fn check_radius(radius: f64) -> Result<(), ShapeError> {
    if radius > 0.0 {
        Ok(())
    } else {
        Err(ShapeError::NonPositiveRadius { radius })
    }
}

impl Shape {
    /// General plane through `point` with unit `normal`.
    ///
    /// The positive-sense half-space is the one the normal points into.
    pub fn plane(normal: Vector3, point: Point3) -> Result<Self, ShapeError> {
        check_unit("normal", normal)?;
        Ok(Self {
            kind: Kind::Plane { normal, point },
        })
    }

    /// Plane `x = coord`. Positive sense is `x >= coord`.
    pub fn plane_x(coord: f64) -> Self {
        Self {
            kind: Kind::AxisPlane {
                axis: Axis::X,
                coord,
            },
        }
    }

    /// Plane `y = coord`. Positive sense is `y >= coord`.
    pub fn plane_y(coord: f64) -> Self {
        Self {
            kind: Kind::AxisPlane {
                axis: Axis::Y,
                coord,
            },
        }
    }

    /// Plane `z = coord`. Positive sense is `z >= coord`.
    pub fn plane_z(coord: f64) -> Self {
        Self {
            kind: Kind::AxisPlane {
                axis: Axis::Z,
                coord,
            },
        }
    }

    /// Sphere centered at `center` with `radius > 0`.
    pub fn sphere(center: Point3, radius: f64) -> Result<Self, ShapeError> {
        check_radius(radius)?;
        Ok(Self {
            kind: Kind::Sphere { center, radius },
        })
    }

    /// Cylinder of `radius > 0` around the unit `axis` through `point`.
    pub fn cylinder(point: Point3, axis: Vector3, radius: f64) -> Result<Self, ShapeError> {
        check_unit("axis", axis)?;
        check_radius(radius)?;
        Ok(Self {
            kind: Kind::Cylinder {
                point,
                axis,
                radius,
            },
        })
    }

    /// Cylinder of `radius > 0` around the line parallel to the x axis
    /// through `point` (the point's x component is irrelevant).
    pub fn cylinder_x(point: Point3, radius: f64) -> Result<Self, ShapeError> {
        Self::axis_cylinder(Axis::X, point, radius)
    }

    /// Cylinder around a line parallel to the y axis. See [`Shape::cylinder_x`].
    pub fn cylinder_y(point: Point3, radius: f64) -> Result<Self, ShapeError> {
        Self::axis_cylinder(Axis::Y, point, radius)
    }

    /// Cylinder around a line parallel to the z axis. See [`Shape::cylinder_x`].
    pub fn cylinder_z(point: Point3, radius: f64) -> Result<Self, ShapeError> {
        Self::axis_cylinder(Axis::Z, point, radius)
    }

    fn axis_cylinder(axis: Axis, point: Point3, radius: f64) -> Result<Self, ShapeError> {
        check_radius(radius)?;
        Ok(Self {
            kind: Kind::AxisCylinder {
                axis,
                point,
                radius,
            },
        })
    }

    /// Which side of the surface `position` is on.
    ///
    /// Points exactly on the surface report [`Sense::Positive`].
    pub fn sense_of(&self, position: Point3) -> Sense {
        match &self.kind {
            Kind::Plane { normal, point } => Sense::of(normal.dot(position - point)),
            Kind::AxisPlane { axis, coord } => Sense::of(position[axis.index()] - coord),
            Kind::Sphere { center, radius } => {
                Sense::of((position - center).magnitude2() - radius * radius)
            }
            Kind::Cylinder {
                point,
                axis,
                radius,
            } => {
                let d = position - point;
                let along = d.dot(*axis);
                Sense::of(d.magnitude2() - along * along - radius * radius)
            }
            Kind::AxisCylinder {
                axis,
                point,
                radius,
            } => {
                let d = position - point;
                Sense::of(axis.planar_dot(d, d) - radius * radius)
            }
        }
    }

    /// Distance along `direction` from `position` to this surface.
    ///
    /// `sense` is the side the particle believes it is on; crossings are
    /// only reported in the heading-toward direction for that side.
    /// Returns `Some(d)` with `d >= 0` on a hit, `None` on a miss.
    ///
    /// `direction` must have unit norm (debug assertion).
    pub fn intersect(&self, position: Point3, direction: Vector3, sense: Sense) -> Option<f64> {
        debug_assert!(is_direction(direction));

        match &self.kind {
            Kind::Plane { normal, point } => {
                plane_intersect(normal.dot(direction), normal.dot(*point - position), sense)
            }
            Kind::AxisPlane { axis, coord } => {
                let i = axis.index();
                plane_intersect(direction[i], coord - position[i], sense)
            }
            Kind::Sphere { center, radius } => {
                let d = position - center;
                solve_quadratic(
                    1.0,
                    d.dot(direction),
                    d.magnitude2() - radius * radius,
                    sense,
                )
            }
            Kind::Cylinder {
                point,
                axis,
                radius,
            } => {
                let along_dir = direction.dot(*axis);
                let d = position - point;
                let along_pos = d.dot(*axis);
                // Reject the axis component so B and C live in the plane
                // perpendicular to the cylinder.
                let rejected = d - axis * along_pos;
                solve_quadratic(
                    1.0 - along_dir * along_dir,
                    rejected.dot(direction),
                    d.magnitude2() - along_pos * along_pos - radius * radius,
                    sense,
                )
            }
            Kind::AxisCylinder {
                axis,
                point,
                radius,
            } => {
                let along_dir = direction[axis.index()];
                let d = position - point;
                solve_quadratic(
                    1.0 - along_dir * along_dir,
                    axis.planar_dot(direction, d),
                    axis.planar_dot(d, d) - radius * radius,
                    sense,
                )
            }
        }
    }

    /// Outward unit normal at `position`, which is assumed to lie on the
    /// surface. "Outward" means toward the positive-sense half-space.
    pub fn normal_at(&self, position: Point3) -> Vector3 {
        let normal = match &self.kind {
            Kind::Plane { normal, .. } => *normal,
            Kind::AxisPlane { axis, .. } => axis.unit(),
            Kind::Sphere { center, radius } => (position - center) / *radius,
            Kind::Cylinder {
                point,
                axis,
                radius,
            } => {
                let d = position - point;
                (d - axis * d.dot(*axis)) / *radius
            }
            Kind::AxisCylinder {
                axis,
                point,
                radius,
            } => axis.reject(position - point) / *radius,
        };
        debug_assert!(is_direction(normal));
        normal
    }
}

/// Shared plane intersection: a plane is the `A = 0` degenerate quadric,
/// handled directly instead of through the root solver. `cosine` is the
/// direction's projection onto the plane normal and `offset` is
/// `n̂·(p₀ − x)`, the signed normal distance to the plane scaled so that
/// `offset / cosine` is the travel distance.
fn plane_intersect(cosine: f64, offset: f64, sense: Sense) -> Option<f64> {
    let toward = match sense {
        Sense::Negative => cosine > 0.0,
        Sense::Positive => cosine < 0.0,
    };
    if toward {
        Some((offset / cosine).max(0.0))
    } else {
        None
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Plane { normal, point } => write!(
                f,
                "plane {{ normal: [{}, {}, {}], point: [{}, {}, {}] }}",
                normal.x, normal.y, normal.z, point.x, point.y, point.z
            ),
            Kind::AxisPlane { axis, coord } => write!(f, "plane {{ {axis} = {coord} }}"),
            Kind::Sphere { center, radius } => write!(
                f,
                "sphere {{ center: [{}, {}, {}], radius: {radius} }}",
                center.x, center.y, center.z
            ),
            Kind::Cylinder {
                point,
                axis,
                radius,
            } => write!(
                f,
                "cylinder {{ point: [{}, {}, {}], axis: [{}, {}, {}], radius: {radius} }}",
                point.x, point.y, point.z, axis.x, axis.y, axis.z
            ),
            Kind::AxisCylinder {
                axis,
                point,
                radius,
            } => write!(
                f,
                "cylinder {{ axis: {axis}, point: [{}, {}, {}], radius: {radius} }}",
                point.x, point.y, point.z
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{point3, vec3};
    use proptest::prelude::*;
    use quadra_core::math::SQRT_HALF;
    use quadra_core::{soft_equiv, soft_equiv_eps};

    #[test]
    fn constructors_reject_bad_parameters() {
        assert!(matches!(
            Shape::plane(vec3(1.0, 1.0, 0.0), point3(0.0, 0.0, 0.0)),
            Err(ShapeError::NotUnit { .. })
        ));
        assert!(matches!(
            Shape::sphere(point3(0.0, 0.0, 0.0), 0.0),
            Err(ShapeError::NonPositiveRadius { .. })
        ));
        assert!(matches!(
            Shape::cylinder(point3(0.0, 0.0, 0.0), vec3(0.0, 2.0, 0.0), 1.0),
            Err(ShapeError::NotUnit { .. })
        ));
        assert!(matches!(
            Shape::cylinder_z(point3(0.0, 0.0, 0.0), -3.0),
            Err(ShapeError::NonPositiveRadius { .. })
        ));
    }

    // ── Sense tests ─────────────────────────────────────────────

    #[test]
    fn sphere_sense_includes_surface_points() {
        let s = Shape::sphere(point3(1.0, 0.0, 0.0), 2.0).unwrap();
        assert_eq!(s.sense_of(point3(1.5, 0.0, 0.0)), Sense::Negative);
        assert_eq!(s.sense_of(point3(5.0, 0.0, 0.0)), Sense::Positive);
        assert_eq!(s.sense_of(point3(3.0, 0.0, 0.0)), Sense::Positive);
    }

    #[test]
    fn axis_plane_sense() {
        let p = Shape::plane_x(1.0);
        assert_eq!(p.sense_of(point3(0.5, 9.0, -9.0)), Sense::Negative);
        assert_eq!(p.sense_of(point3(1.0, 0.0, 0.0)), Sense::Positive);
        assert_eq!(p.sense_of(point3(1.5, 0.0, 0.0)), Sense::Positive);
    }

    #[test]
    fn general_and_axis_cylinder_senses_agree() {
        let general = Shape::cylinder(point3(1.0, 2.0, 0.0), vec3(0.0, 0.0, 1.0), 3.0).unwrap();
        let aligned = Shape::cylinder_z(point3(1.0, 2.0, 0.0), 3.0).unwrap();
        for p in [
            point3(1.0, 2.0, -7.0),
            point3(4.0, 2.0, 1.0),
            point3(5.0, 6.0, 0.0),
        ] {
            assert_eq!(general.sense_of(p), aligned.sense_of(p));
        }
    }

    // ── Intersection tests ──────────────────────────────────────

    #[test]
    fn sphere_hit_from_inside() {
        let s = Shape::sphere(point3(1.0, 0.0, 0.0), 2.0).unwrap();
        let d = s
            .intersect(point3(1.5, 0.0, 0.0), vec3(0.0, 1.0, 0.0), Sense::Negative)
            .unwrap();
        assert!(soft_equiv(d, 1.936491673103709));
    }

    #[test]
    fn sphere_miss_on_tangent_departure() {
        let s = Shape::sphere(point3(1.0, 0.0, 0.0), 2.0).unwrap();
        let hit = s.intersect(
            point3(-1.0, -1.0, 0.5),
            vec3(SQRT_HALF, -SQRT_HALF, 0.0),
            Sense::Positive,
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn plane_distance_from_negative_side() {
        let p = Shape::plane(vec3(SQRT_HALF, SQRT_HALF, 0.0), point3(1.0, 1.0, 0.0)).unwrap();
        let d = p
            .intersect(
                point3(-1.0, -1.0, 0.5),
                vec3(SQRT_HALF, SQRT_HALF, 0.0),
                Sense::Negative,
            )
            .unwrap();
        // Loose tolerance: SQRT_HALF is only accurate to 15 digits.
        assert!(soft_equiv_eps(d, 2.828427124746190, 1.0e-12));
    }

    #[test]
    fn plane_ignores_ray_heading_away() {
        let p = Shape::plane(vec3(SQRT_HALF, SQRT_HALF, 0.0), point3(1.0, 1.0, 0.0)).unwrap();
        let hit = p.intersect(
            point3(-1.0, -1.0, 0.5),
            vec3(-SQRT_HALF, -SQRT_HALF, 0.0),
            Sense::Negative,
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn axis_plane_intersection() {
        let p = Shape::plane_x(1.0);
        let d = p
            .intersect(point3(0.25, 3.0, -2.0), vec3(1.0, 0.0, 0.0), Sense::Negative)
            .unwrap();
        assert!(soft_equiv(d, 0.75));
        // Parallel travel never crosses.
        assert_eq!(
            p.intersect(point3(0.25, 3.0, -2.0), vec3(0.0, 1.0, 0.0), Sense::Negative),
            None
        );
    }

    #[test]
    fn axis_cylinder_chord_from_inside() {
        let c = Shape::cylinder_z(point3(0.0, 0.0, 0.0), 3.0).unwrap();
        let d = c
            .intersect(point3(1.5, 0.0, 0.0), vec3(0.0, 1.0, 0.0), Sense::Negative)
            .unwrap();
        assert!(soft_equiv(d, 2.598076211353316));
    }

    #[test]
    fn cylinder_immune_to_along_axis_travel() {
        let c = Shape::cylinder_z(point3(0.0, 0.0, 0.0), 3.0).unwrap();
        let hit = c.intersect(point3(-1.0, -2.0, 0.5), vec3(0.0, 0.0, 1.0), Sense::Negative);
        assert_eq!(hit, None);
    }

    #[test]
    fn grazing_arrival_touches_at_tangent_point() {
        let s = Shape::sphere(point3(0.0, 0.0, 0.0), 2.0).unwrap();
        // Arriving tangent ray: Q = 0, hit at the tangent point.
        let d = s
            .intersect(point3(-2.0, 2.0, 0.0), vec3(1.0, 0.0, 0.0), Sense::Positive)
            .unwrap();
        assert!(soft_equiv(d, 2.0));
        // Departing from the tangent point: no hit.
        let hit = s.intersect(point3(0.0, 2.0, 0.0), vec3(1.0, 0.0, 0.0), Sense::Positive);
        assert_eq!(hit, None);
    }

    #[test]
    fn general_cylinder_matches_axis_cylinder() {
        let general = Shape::cylinder(point3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0), 3.0).unwrap();
        let d = general
            .intersect(point3(1.5, 0.0, 0.0), vec3(0.0, 1.0, 0.0), Sense::Negative)
            .unwrap();
        assert!(soft_equiv(d, 2.598076211353316));
    }

    // ── Normal tests ────────────────────────────────────────────

    #[test]
    fn sphere_normal_is_radial() {
        let s = Shape::sphere(point3(1.0, 0.0, 0.0), 2.0).unwrap();
        let n = s.normal_at(point3(3.0, 0.0, 0.0));
        assert!(soft_equiv(n.x, 1.0));
        assert!(soft_equiv(n.y, 0.0));
        assert!(soft_equiv(n.z, 0.0));
    }

    #[test]
    fn cylinder_normal_has_no_axis_component() {
        let c = Shape::cylinder_z(point3(1.0, 1.0, 0.0), 2.0).unwrap();
        let n = c.normal_at(point3(3.0, 1.0, 5.0));
        assert!(soft_equiv(n.x, 1.0));
        assert!(soft_equiv(n.y, 0.0));
        assert_eq!(n.z, 0.0);
    }

    #[test]
    fn plane_normal_is_stored_normal() {
        let normal = vec3(SQRT_HALF, SQRT_HALF, 0.0);
        let p = Shape::plane(normal, point3(1.0, 1.0, 0.0)).unwrap();
        assert_eq!(p.normal_at(point3(1.0, 1.0, 7.0)), normal);
        assert_eq!(Shape::plane_y(2.0).normal_at(point3(0.0, 2.0, 0.0)), vec3(0.0, 1.0, 0.0));
    }

    // ── Property tests ──────────────────────────────────────────

    fn arb_point() -> impl Strategy<Value = Point3> {
        (-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0).prop_map(|(x, y, z)| point3(x, y, z))
    }

    fn arb_direction() -> impl Strategy<Value = Vector3> {
        (-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0)
            .prop_map(|(x, y, z)| vec3(x, y, z))
            .prop_filter("degenerate direction", |v| v.magnitude2() > 1.0e-3)
            .prop_map(|v| v.normalize())
    }

    proptest! {
        #[test]
        fn intersection_distance_is_nonnegative(
            position in arb_point(),
            direction in arb_direction(),
            radius in 0.1f64..5.0,
        ) {
            let s = Shape::sphere(point3(0.0, 0.0, 0.0), radius).unwrap();
            let sense = s.sense_of(position);
            if let Some(d) = s.intersect(position, direction, sense) {
                prop_assert!(d >= 0.0);
            }
        }

        #[test]
        fn inside_a_sphere_always_hits(
            direction in arb_direction(),
            radius in 1.0f64..5.0,
        ) {
            let s = Shape::sphere(point3(0.0, 0.0, 0.0), radius).unwrap();
            let position = point3(0.1, -0.2, 0.3);
            prop_assume!(s.sense_of(position) == Sense::Negative);
            let d = s.intersect(position, direction, Sense::Negative);
            prop_assert!(d.is_some());
        }

        #[test]
        fn sphere_normal_is_unit_on_surface(
            direction in arb_direction(),
            radius in 0.5f64..5.0,
        ) {
            let center = point3(1.0, -2.0, 0.5);
            let s = Shape::sphere(center, radius).unwrap();
            // Walk from the center to the surface along `direction`.
            let on_surface = center + direction * radius;
            let n = s.normal_at(on_surface);
            prop_assert!(soft_equiv_eps(n.magnitude2(), 1.0, 1.0e-9));
        }
    }
}

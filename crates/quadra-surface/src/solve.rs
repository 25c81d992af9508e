//! Shared root policy for ray-quadric intersection.

use quadra_core::Sense;

/// Choose the intersection root for a ray-local quadric equation.
///
/// The equation along the ray is `A·t² + 2B·t + C = 0` with `t` the
/// distance from the particle. `sense` is which side of the surface the
/// caller believes the particle is on; together with the signs of `A` and
/// `B` it selects which root (if any) is the next crossing.
///
/// Returns `Some(distance)` with `distance >= 0` when the ray hits the
/// surface, `None` when it does not. The two algebraically equivalent
/// root forms are chosen for numerical stability depending on whether the
/// particle is heading into or away from the surface, and the
/// `max(0.0, ..)` clamps absorb roundoff on grazing rays.
pub fn solve_quadratic(a: f64, b: f64, c: f64, sense: Sense) -> Option<f64> {
    let q = b * b - a * c;

    if q < 0.0 {
        // No real root: the ray misses the surface entirely.
        return None;
    }

    let distance = match sense {
        Sense::Negative => {
            // Inside the surface.
            if b <= 0.0 {
                if a > 0.0 {
                    (q.sqrt() - b) / a
                } else {
                    // Surface curves away from the heading; never reached.
                    return None;
                }
            } else {
                (-c / (q.sqrt() + b)).max(0.0)
            }
        }
        Sense::Positive => {
            // Outside the surface.
            if b >= 0.0 {
                if a >= 0.0 {
                    // Headed away.
                    return None;
                } else {
                    -(q.sqrt() + b) / a
                }
            } else {
                (c / (q.sqrt() - b)).max(0.0)
            }
        }
    };

    debug_assert!(distance >= 0.0);
    Some(distance)
}

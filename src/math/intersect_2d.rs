use super::{PlanPoint, Tolerances};

/// Euclidean length of the segment from `a` to `b`.
///
/// NaN coordinates propagate to a NaN length; callers validate upstream.
#[must_use]
pub fn segment_length(a: &PlanPoint, b: &PlanPoint) -> f64 {
    a.distance_to(b)
}

/// Bounded segment-segment intersection on the plan.
///
/// Intersects the infinite lines through `a0 → a1` and `b0 → b1` with the
/// 2x2 determinant method, then keeps the point only if it lies inside the
/// inclusive `[min, max]` X and Z ranges of both segments.
///
/// Returns `None` when the determinant magnitude is below
/// `tol.parallel`. Collinear overlaps are therefore reported as no
/// intersection. A touch at a shared endpoint is reported.
///
/// The result does not depend on argument order:
/// `segment_intersection(a0, a1, b0, b1) == segment_intersection(b0, b1, a0, a1)`.
#[must_use]
pub fn segment_intersection(
    a0: &PlanPoint,
    a1: &PlanPoint,
    b0: &PlanPoint,
    b1: &PlanPoint,
    tol: &Tolerances,
) -> Option<PlanPoint> {
    let dx_a = a0.x - a1.x;
    let dz_a = a0.z - a1.z;
    let dx_b = b0.x - b1.x;
    let dz_b = b0.z - b1.z;

    let den = dx_a * dz_b - dz_a * dx_b;
    if den.abs() < tol.parallel || den.is_nan() {
        return None;
    }

    let det_a = a0.x * a1.z - a0.z * a1.x;
    let det_b = b0.x * b1.z - b0.z * b1.x;

    // Swapping the segments negates both numerator and denominator exactly.
    let x = (det_a * dx_b - dx_a * det_b) / den;
    let z = (det_a * dz_b - dz_a * det_b) / den;
    let point = PlanPoint::new(x, z);

    if within_range(&point, a0, a1, tol.range) && within_range(&point, b0, b1, tol.range) {
        Some(point)
    } else {
        None
    }
}

/// Inclusive bounding-range test with `slack` on each side.
fn within_range(p: &PlanPoint, s0: &PlanPoint, s1: &PlanPoint, slack: f64) -> bool {
    let (min_x, max_x) = (s0.x.min(s1.x), s0.x.max(s1.x));
    let (min_z, max_z) = (s0.z.min(s1.z), s0.z.max(s1.z));
    p.x >= min_x - slack && p.x <= max_x + slack && p.z >= min_z - slack && p.z <= max_z + slack
}

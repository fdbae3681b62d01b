use serde::{Deserialize, Serialize};

use super::Vector2;

/// A point on the floor plan in real-world meters.
///
/// The plan lies in the horizontal `x`/`z` plane of the 3D scene, so the
/// second coordinate is called `z` rather than `y`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanPoint {
    pub x: f64,
    pub z: f64,
}

impl PlanPoint {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }

    /// Returns the point as a position vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2 {
        Vector2::new(self.x, self.z)
    }

    /// Returns `true` if `other` lies within `tolerance` of this point (inclusive).
    #[must_use]
    pub fn coincides_with(&self, other: &Self, tolerance: f64) -> bool {
        self.distance_to(other) <= tolerance
    }
}

impl From<Vector2> for PlanPoint {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl std::fmt::Display for PlanPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

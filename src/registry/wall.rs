use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::math::{segment_intersection, segment_length, PlanPoint, Tolerances};

/// Stable identifier of a wall.
///
/// Walls created by the registry get `w<n>` ids. Walls produced by
/// splitting a parent get `<parentId>-<index>`, so the parent can always
/// be recovered from a child's id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallId(String);

impl WallId {
    /// Wraps an arbitrary identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id of the `n`-th automatically numbered wall.
    #[must_use]
    pub fn auto(n: u64) -> Self {
        Self(format!("w{n}"))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the `index`-th piece produced by splitting this wall.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        Self(format!("{}-{index}", self.0))
    }

    /// Id of the wall this one was split from, if it is a split product.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (parent, index) = self.0.rsplit_once('-')?;
        if parent.is_empty() || index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(parent.to_owned()))
    }

    /// Returns `true` if this id descends from `ancestor` through one or more splits.
    #[must_use]
    pub fn is_descendant_of(&self, ancestor: &WallId) -> bool {
        let mut current = self.parent();
        while let Some(id) = current {
            if &id == ancestor {
                return true;
            }
            current = id.parent();
        }
        false
    }

    /// The `n` of an automatic `w<n>` id.
    pub(crate) fn auto_number(&self) -> Option<u64> {
        let digits = self.0.strip_prefix('w')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

impl std::fmt::Display for WallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WallId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Geometry and attributes of a wall that does not have an id yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    pub start: PlanPoint,
    pub end: PlanPoint,
    pub thickness: f64,
    pub height: f64,
    pub is_default_wall: bool,
}

impl WallSpec {
    /// Creates a user wall between `start` and `end`.
    #[must_use]
    pub fn new(start: PlanPoint, end: PlanPoint, thickness: f64, height: f64) -> Self {
        Self {
            start,
            end,
            thickness,
            height,
            is_default_wall: false,
        }
    }

    /// Marks the wall as a building perimeter wall.
    #[must_use]
    pub fn default_wall(mut self) -> Self {
        self.is_default_wall = true;
        self
    }

    /// Same attributes, different endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, start: PlanPoint, end: PlanPoint) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Length of the centerline.
    #[must_use]
    pub fn length(&self) -> f64 {
        segment_length(&self.start, &self.end)
    }

    /// Rejects non-finite coordinates, zero-length centerlines and
    /// non-positive thickness or height.
    ///
    /// # Errors
    ///
    /// Returns the matching [`GeometryError`].
    pub fn validate(&self, tol: &Tolerances) -> Result<(), GeometryError> {
        if !self.start.is_finite() {
            return Err(GeometryError::NonFinite("start"));
        }
        if !self.end.is_finite() {
            return Err(GeometryError::NonFinite("end"));
        }
        let length = self.length();
        if length <= tol.degenerate {
            return Err(GeometryError::ZeroLength {
                length,
                tolerance: tol.degenerate,
            });
        }
        for (name, value) in [("thickness", self.thickness), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeometryError::InvalidDimension { name, value });
            }
        }
        Ok(())
    }
}

/// A straight wall on the floor plan.
///
/// Only the registry creates walls, so every `Wall` has passed
/// [`WallSpec::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    id: WallId,
    spec: WallSpec,
}

impl Wall {
    pub(crate) fn new(id: WallId, spec: WallSpec) -> Self {
        Self { id, spec }
    }

    #[must_use]
    pub fn id(&self) -> &WallId {
        &self.id
    }

    #[must_use]
    pub fn start(&self) -> &PlanPoint {
        &self.spec.start
    }

    #[must_use]
    pub fn end(&self) -> &PlanPoint {
        &self.spec.end
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.spec.thickness
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.spec.height
    }

    #[must_use]
    pub fn is_default_wall(&self) -> bool {
        self.spec.is_default_wall
    }

    /// Geometry and attributes without the id.
    #[must_use]
    pub fn spec(&self) -> &WallSpec {
        &self.spec
    }

    /// Length of the centerline.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.spec.length()
    }

    /// Crossing point of the two centerlines, see [`segment_intersection`].
    #[must_use]
    pub fn intersection(&self, other: &Wall, tol: &Tolerances) -> Option<PlanPoint> {
        segment_intersection(self.start(), self.end(), other.start(), other.end(), tol)
    }

    /// Returns `true` if `spec` has the same endpoints, in either direction.
    #[must_use]
    pub fn has_endpoints_of(&self, spec: &WallSpec, tolerance: f64) -> bool {
        let (a, b) = (self.start(), self.end());
        (a.coincides_with(&spec.start, tolerance) && b.coincides_with(&spec.end, tolerance))
            || (a.coincides_with(&spec.end, tolerance) && b.coincides_with(&spec.start, tolerance))
    }
}

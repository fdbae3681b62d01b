use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::math::PlanPoint;
use crate::registry::WallSpec;

/// Overall dimensions of a generated building, in meters.
///
/// The building is centred on the origin: `length` runs along x and
/// `width` along z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
}

/// Axis-aligned rectangle in plan units, anchored at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BuildingDimensions {
    /// Creates validated building dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimensions`] if a value is not finite
    /// and positive, or the walls would not fit inside the footprint.
    pub fn new(length: f64, width: f64, height: f64, thickness: f64) -> Result<Self, GeometryError> {
        let dims = Self {
            length,
            width,
            height,
            thickness,
        };
        dims.validate()?;
        Ok(dims)
    }

    /// Checks the dimensions.
    ///
    /// # Errors
    ///
    /// See [`BuildingDimensions::new`].
    pub fn validate(&self) -> Result<(), GeometryError> {
        for (name, value) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
            ("thickness", self.thickness),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeometryError::InvalidDimensions(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if self.thickness >= self.length.min(self.width) {
            return Err(GeometryError::InvalidDimensions(format!(
                "thickness {} must be smaller than length and width",
                self.thickness
            )));
        }
        Ok(())
    }

    /// The four perimeter walls: front, right, back, left.
    ///
    /// Centerlines are inset by half a thickness so the outer faces sit on
    /// the footprint, and consecutive walls share their corner points.
    #[must_use]
    pub fn default_walls(&self) -> [WallSpec; 4] {
        let hx = self.length * 0.5 - self.thickness * 0.5;
        let hz = self.width * 0.5 - self.thickness * 0.5;
        let corners = [
            PlanPoint::new(-hx, hz),
            PlanPoint::new(hx, hz),
            PlanPoint::new(hx, -hz),
            PlanPoint::new(-hx, -hz),
        ];
        std::array::from_fn(|i| {
            WallSpec::new(corners[i], corners[(i + 1) % 4], self.thickness, self.height).default_wall()
        })
    }

    /// Floor outline used by the floor plan view.
    #[must_use]
    pub fn floor_boundary(&self) -> Boundary {
        Boundary {
            x: 0.0,
            y: 0.0,
            width: self.length,
            height: self.width,
        }
    }

    /// Ceiling outline; identical to the floor.
    #[must_use]
    pub fn ceiling_boundary(&self) -> Boundary {
        self.floor_boundary()
    }
}

use crate::error::ConfigError;
use crate::math::{Matrix3, PlanPoint};

type ScreenPoint = nalgebra::Point2<f64>;

/// Maps plan-view pixel coordinates to world meters and back.
///
/// The plan view shows a `plan_width` x `plan_height` meter area in a
/// `view_width` x `view_height` pixel viewport. World coordinates are
/// centred on the middle of the view and the screen's downward y axis
/// maps to negative z.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTransform {
    to_world: Matrix3,
    to_screen: Matrix3,
}

impl PlanTransform {
    /// Creates a transform for the given plan extent and viewport size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTransform`] unless all four values are
    /// finite and positive.
    pub fn new(
        plan_width: f64,
        plan_height: f64,
        view_width: f64,
        view_height: f64,
    ) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("plan_width", plan_width),
            ("plan_height", plan_height),
            ("view_width", view_width),
            ("view_height", view_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTransform(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }

        let sx = plan_width / view_width;
        let sz = plan_height / view_height;
        let (cx, cz) = (plan_width * 0.5, plan_height * 0.5);

        #[rustfmt::skip]
        let to_world = Matrix3::new(
            sx,  0.0, -cx,
            0.0, -sz,  cz,
            0.0, 0.0, 1.0,
        );
        #[rustfmt::skip]
        let to_screen = Matrix3::new(
            1.0 / sx, 0.0,       cx / sx,
            0.0,      -1.0 / sz, cz / sz,
            0.0,      0.0,       1.0,
        );
        Ok(Self {
            to_world,
            to_screen,
        })
    }

    /// World position of the pixel `(px, py)`.
    #[must_use]
    pub fn to_world(&self, px: f64, py: f64) -> PlanPoint {
        let p = self.to_world.transform_point(&ScreenPoint::new(px, py));
        PlanPoint::new(p.x, p.y)
    }

    /// Pixel position of a world point.
    #[must_use]
    pub fn to_screen(&self, point: &PlanPoint) -> (f64, f64) {
        let p = self.to_screen.transform_point(&ScreenPoint::new(point.x, point.z));
        (p.x, p.y)
    }
}

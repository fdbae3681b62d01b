use crate::math::{PlanPoint, Point3, Vector2, Vector3};
use crate::registry::Wall;

/// Box parameters for extruding a wall into the 3D scene.
///
/// The scene is y-up with the plan on the `x`/`z` ground plane. The box
/// is centred on the wall's midpoint at half its height, is `length`
/// long along its local x axis and is turned about y by `yaw`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallPlacement {
    /// Box centre in scene coordinates.
    pub center: Point3,
    /// Box extents: (length, height, thickness).
    pub size: Vector3,
    /// Rotation about the vertical axis, in radians.
    pub yaw: f64,
}

impl WallPlacement {
    /// Computes the placement of `wall`.
    #[must_use]
    pub fn of(wall: &Wall) -> Self {
        let (start, end) = (wall.start().to_vector(), wall.end().to_vector());
        let dir = end - start;
        let mid = (start + end) * 0.5;
        Self {
            center: Point3::new(mid.x, wall.height() * 0.5, mid.y),
            size: Vector3::new(dir.norm(), wall.height(), wall.thickness()),
            yaw: -dir.y.atan2(dir.x),
        }
    }

    /// Wall length along its centerline.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.size.x
    }
}

/// Plan outline of a wall: its centerline offset by half the thickness
/// on each side, as four corners in order around the rectangle.
#[must_use]
pub fn footprint(wall: &Wall) -> [PlanPoint; 4] {
    let (start, end) = (wall.start().to_vector(), wall.end().to_vector());
    let dir = (end - start).normalize();
    let offset = Vector2::new(-dir.y, dir.x) * (wall.thickness() * 0.5);
    [
        PlanPoint::from(start + offset),
        PlanPoint::from(end + offset),
        PlanPoint::from(end - offset),
        PlanPoint::from(start - offset),
    ]
}

pub mod intersect_2d;
pub mod point;
pub mod tolerance;

pub use intersect_2d::{segment_intersection, segment_length};
pub use point::PlanPoint;
pub use tolerance::Tolerances;

/// 2D vector type used for plan-space arithmetic.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D point type (x, elevation, z) used by the scene placement.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x3 homogeneous matrix for 2D affine maps.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Magnitude below which the intersection determinant counts as parallel.
pub const PARALLEL_TOLERANCE: f64 = 1e-10;

/// Slack on the inclusive bounding-range check of a crossing point.
pub const RANGE_TOLERANCE: f64 = 1e-9;

/// Distance (meters) at which a crossing is considered to sit on a wall endpoint.
pub const ENDPOINT_TOLERANCE: f64 = 0.1;

/// Wall length (meters) below which a wall is degenerate.
pub const DEGENERATE_TOLERANCE: f64 = 1e-9;

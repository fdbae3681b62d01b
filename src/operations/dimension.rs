use crate::math::segment_length;
use crate::registry::Wall;

/// Unit suffix appended to every dimension label.
pub const LENGTH_UNIT: &str = "m";

/// Dimension label of a wall: its centerline length with two decimals.
#[must_use]
pub fn label_for(wall: &Wall) -> String {
    label_for_length(segment_length(wall.start(), wall.end()))
}

/// Formats a length in meters the way plan dimensions are shown.
#[must_use]
pub fn label_for_length(length: f64) -> String {
    format!("{length:.2} {LENGTH_UNIT}")
}

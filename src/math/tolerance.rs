use serde::{Deserialize, Serialize};

use super::{DEGENERATE_TOLERANCE, ENDPOINT_TOLERANCE, PARALLEL_TOLERANCE, RANGE_TOLERANCE};
use crate::error::ConfigError;

/// Numeric tolerances used by intersection and splitting.
///
/// All distances are in the plan's real-world units (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Determinant magnitude below which two walls count as parallel.
    pub parallel: f64,
    /// Slack on the inclusive bounding-range check of a crossing.
    pub range: f64,
    /// A crossing within this distance of a wall endpoint does not split that wall.
    pub endpoint: f64,
    /// Walls shorter than this are rejected as zero-length.
    pub degenerate: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            parallel: PARALLEL_TOLERANCE,
            range: RANGE_TOLERANCE,
            endpoint: ENDPOINT_TOLERANCE,
            degenerate: DEGENERATE_TOLERANCE,
        }
    }
}

impl Tolerances {
    /// Returns a copy with a different endpoint tolerance.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: f64) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Checks that every tolerance is finite and strictly positive, and that
    /// `endpoint` is at least `degenerate`.
    ///
    /// Split pieces are only guaranteed to be longer than `endpoint`, so a
    /// smaller endpoint tolerance could produce zero-length walls.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTolerance`] naming the first bad field,
    /// or [`ConfigError::EndpointBelowDegenerate`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("parallel", self.parallel),
            ("range", self.range),
            ("endpoint", self.endpoint),
            ("degenerate", self.degenerate),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTolerance { name, value });
            }
        }
        if self.endpoint < self.degenerate {
            return Err(ConfigError::EndpointBelowDegenerate {
                endpoint: self.endpoint,
                degenerate: self.degenerate,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Tolerances::default().validate().unwrap();
    }

    #[test]
    fn negative_endpoint_rejected() {
        let err = Tolerances::default().with_endpoint(-1.0).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTolerance { name: "endpoint", .. }
        ));
    }

    #[test]
    fn endpoint_below_degenerate_rejected() {
        let tol = Tolerances {
            endpoint: 1e-12,
            degenerate: 1e-3,
            ..Tolerances::default()
        };
        let err = tol.validate().unwrap_err();
        assert!(matches!(err, ConfigError::EndpointBelowDegenerate { .. }));

        let equal = Tolerances {
            endpoint: 1e-3,
            degenerate: 1e-3,
            ..Tolerances::default()
        };
        equal.validate().unwrap();
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let t: Tolerances = serde_json::from_str(r#"{"endpoint": 0.25}"#).unwrap();
        assert!((t.endpoint - 0.25).abs() < f64::EPSILON);
        assert!((t.parallel - PARALLEL_TOLERANCE).abs() < f64::EPSILON);
    }
}

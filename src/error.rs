use thiserror::Error;

use crate::registry::WallId;

/// Top-level error type for the floor-plan core.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Invalid wall or building geometry.
///
/// Raised before anything is committed; the registry is left untouched.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),

    #[error("zero-length wall (length {length} is below {tolerance})")]
    ZeroLength { length: f64, tolerance: f64 },

    #[error("{name} must be finite and > 0, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("wall duplicates existing wall {0}")]
    DuplicateWall(WallId),

    #[error("invalid building dimensions: {0}")]
    InvalidDimensions(String),
}

/// Errors raised by the wall registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("wall id already in use: {0}")]
    DuplicateId(WallId),
}

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tolerance {name} must be finite and > 0, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },

    #[error("endpoint tolerance {endpoint} is below the degenerate length {degenerate}")]
    EndpointBelowDegenerate { endpoint: f64, degenerate: f64 },

    #[error("invalid plan transform: {0}")]
    InvalidTransform(String),
}

/// Errors while reading or writing persisted plans.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("malformed plan json: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Persistence(PersistenceError::Json(err))
    }
}

/// Convenience type alias for results using [`PlanError`].
pub type Result<T> = std::result::Result<T, PlanError>;

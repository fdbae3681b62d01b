pub mod building;
pub mod draw;
pub mod editor;
pub mod error;
pub mod math;
pub mod operations;
pub mod persistence;
pub mod registry;
pub mod transform;

pub use error::{PlanError, Result};

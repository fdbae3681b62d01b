//! Plain wall records for saving and reloading a plan.
//!
//! The core does not pick a storage backend; it produces and consumes a
//! JSON array of [`WallRecord`]s.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::math::{PlanPoint, Tolerances};
use crate::registry::{Wall, WallId, WallRegistry, WallSpec};

/// Serializable form of a [`Wall`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallRecord {
    pub id: WallId,
    pub start: PlanPoint,
    pub end: PlanPoint,
    pub thickness: f64,
    pub height: f64,
    #[serde(default)]
    pub is_default_wall: bool,
}

impl From<&Wall> for WallRecord {
    fn from(wall: &Wall) -> Self {
        Self {
            id: wall.id().clone(),
            start: *wall.start(),
            end: *wall.end(),
            thickness: wall.thickness(),
            height: wall.height(),
            is_default_wall: wall.is_default_wall(),
        }
    }
}

impl WallRecord {
    fn spec(&self) -> WallSpec {
        WallSpec {
            start: self.start,
            end: self.end,
            thickness: self.thickness,
            height: self.height,
            is_default_wall: self.is_default_wall,
        }
    }
}

/// Records of every wall in plan order.
#[must_use]
pub fn records(registry: &WallRegistry) -> Vec<WallRecord> {
    registry.iter().map(WallRecord::from).collect()
}

/// Rebuilds a registry from records, keeping their ids.
///
/// # Errors
///
/// Returns an error if a record has invalid geometry, two records share an
/// id, or the tolerances are invalid.
pub fn restore(records: &[WallRecord], tolerances: Tolerances) -> Result<WallRegistry> {
    let mut registry = WallRegistry::with_tolerances(tolerances)?;
    for record in records {
        registry.add_with_id(record.id.clone(), record.spec())?;
    }
    Ok(registry)
}

/// Serializes the registry as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(registry: &WallRegistry) -> Result<String> {
    let json = serde_json::to_string_pretty(&records(registry))?;
    debug!(walls = registry.len(), "plan serialized");
    Ok(json)
}

/// Parses a JSON array of records and rebuilds the registry.
///
/// # Errors
///
/// Returns a persistence error for malformed JSON, otherwise see [`restore`].
pub fn from_json(json: &str, tolerances: Tolerances) -> Result<WallRegistry> {
    let records: Vec<WallRecord> = serde_json::from_str(json)?;
    let registry = restore(&records, tolerances)?;
    debug!(walls = registry.len(), "plan restored");
    Ok(registry)
}

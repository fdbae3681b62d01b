mod crossing;

use tracing::{debug, warn};

use crate::error::{GeometryError, Result};
use crate::registry::{Wall, WallId, WallRegistry, WallSpec};

/// Walls created and removed by one [`AddWallWithSplitting`] call.
///
/// Presentation layers patch their state with this instead of diffing
/// the whole registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitOutcome {
    /// New walls: pieces of split existing walls first, then the new wall or its pieces.
    pub created: Vec<Wall>,
    /// Ids of existing walls replaced by their pieces.
    pub removed: Vec<WallId>,
}

impl SplitOutcome {
    /// Returns `true` if any wall, existing or new, was cut.
    #[must_use]
    pub fn was_split(&self) -> bool {
        !self.removed.is_empty() || self.created.len() > 1
    }
}

/// Adds a wall to the plan, splitting it and every wall it crosses at
/// the crossing points.
///
/// The operation is all-or-nothing: every crossing and piece is computed
/// first, and the registry is only modified once nothing can fail.
///
/// An exact duplicate of an existing wall (same endpoints in either
/// direction, within the endpoint tolerance) is rejected. Collinear walls
/// that only partially overlap are added without splitting.
#[derive(Debug)]
pub struct AddWallWithSplitting {
    spec: WallSpec,
}

impl AddWallWithSplitting {
    /// Creates a new `AddWallWithSplitting` operation for `spec`.
    #[must_use]
    pub fn new(spec: WallSpec) -> Self {
        Self { spec }
    }

    /// Executes the operation against `registry`.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if the wall is invalid or duplicates an
    /// existing wall, or a registry error if a lineage id is already
    /// taken. The registry is unchanged on error.
    pub fn execute(&self, registry: &mut WallRegistry) -> Result<SplitOutcome> {
        let tol = *registry.tolerances();
        self.spec.validate(&tol)?;

        if let Some(existing) = registry
            .iter()
            .find(|w| w.has_endpoints_of(&self.spec, tol.endpoint))
        {
            warn!(existing = %existing.id(), "rejected duplicate wall");
            return Err(GeometryError::DuplicateWall(existing.id().clone()).into());
        }

        let plan = crossing::plan(registry, &self.spec, &tol)?;
        debug!(
            new = %plan.new_id,
            hosts = plan.hosts.len(),
            pieces = plan.new_pieces.len(),
            "split planned"
        );

        let mut outcome = SplitOutcome::default();
        for host in plan.hosts {
            let parent = host.parent.id().clone();
            outcome
                .created
                .extend(registry.replace_unchecked(&parent, host.pieces));
            outcome.removed.push(parent);
        }

        let unsplit = plan.new_pieces.len() == 1 && plan.new_pieces[0].0 == plan.new_id;
        if !unsplit {
            registry.retire(plan.new_id);
        }
        for (id, spec) in plan.new_pieces {
            outcome.created.push(registry.insert_unchecked(id, spec));
        }
        Ok(outcome)
    }
}

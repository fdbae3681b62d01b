pub mod wall;

pub use wall::{Wall, WallId, WallSpec};

use std::collections::{HashMap, HashSet};

use slotmap::SlotMap;
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::math::Tolerances;

slotmap::new_key_type! {
    /// Arena key of a wall inside the registry.
    struct WallKey;
}

/// Outcome of [`WallRegistry::remove`].
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    /// The wall was present and has been removed.
    Removed(Wall),
    /// No wall with that id exists. Nothing changed.
    NotFound,
}

impl RemoveOutcome {
    #[must_use]
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_))
    }

    /// The removed wall, if any.
    #[must_use]
    pub fn into_wall(self) -> Option<Wall> {
        match self {
            Self::Removed(wall) => Some(wall),
            Self::NotFound => None,
        }
    }
}

/// Central arena that owns every wall on the plan.
///
/// Walls are looked up by [`WallId`] and enumerated in insertion order,
/// except that split products take the place of the wall they replace.
/// Ids are never handed out twice: removed ids stay retired for the
/// lifetime of the registry.
#[derive(Debug, Clone, Default)]
pub struct WallRegistry {
    walls: SlotMap<WallKey, Wall>,
    index: HashMap<WallId, WallKey>,
    order: Vec<WallKey>,
    retired: HashSet<WallId>,
    last_auto: u64,
    tolerances: Tolerances,
}

impl WallRegistry {
    /// Creates an empty registry with default tolerances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry using `tolerances` for validation and splitting.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is not finite and positive.
    pub fn with_tolerances(tolerances: Tolerances) -> Result<Self> {
        tolerances.validate()?;
        Ok(Self {
            tolerances,
            ..Self::default()
        })
    }

    /// Tolerances applied to walls in this registry.
    #[must_use]
    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Validates `spec` and stores it under a fresh automatic id.
    ///
    /// Does not look for intersections with existing walls; see
    /// [`AddWallWithSplitting`](crate::operations::AddWallWithSplitting).
    ///
    /// # Errors
    ///
    /// Returns a geometry error if the wall is zero-length or otherwise invalid.
    pub fn add(&mut self, spec: WallSpec) -> Result<Wall> {
        spec.validate(&self.tolerances)?;
        let id = self.next_auto_id();
        Ok(self.insert_unchecked(id, spec))
    }

    /// Validates `spec` and stores it under `id`.
    ///
    /// Used for lineage-derived ids and for reloading persisted plans.
    ///
    /// # Errors
    ///
    /// Returns a geometry error for invalid walls, or
    /// [`RegistryError::DuplicateId`] if `id` is live or was used before.
    pub fn add_with_id(&mut self, id: WallId, spec: WallSpec) -> Result<Wall> {
        spec.validate(&self.tolerances)?;
        if !self.is_available(&id) {
            return Err(RegistryError::DuplicateId(id).into());
        }
        Ok(self.insert_unchecked(id, spec))
    }

    /// Removes the wall with `id`. Calling it again for the same id is a no-op.
    pub fn remove(&mut self, id: &WallId) -> RemoveOutcome {
        let Some(key) = self.index.remove(id) else {
            debug!(%id, "remove: wall not found");
            return RemoveOutcome::NotFound;
        };
        self.order.retain(|k| *k != key);
        self.retired.insert(id.clone());
        match self.walls.remove(key) {
            Some(wall) => {
                debug!(%id, "wall removed");
                RemoveOutcome::Removed(wall)
            }
            None => RemoveOutcome::NotFound,
        }
    }

    /// Returns the wall with `id`, if present.
    #[must_use]
    pub fn get(&self, id: &WallId) -> Option<&Wall> {
        self.index.get(id).and_then(|key| self.walls.get(*key))
    }

    #[must_use]
    pub fn contains(&self, id: &WallId) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over the walls in plan order.
    pub fn iter(&self) -> impl Iterator<Item = &Wall> + '_ {
        self.order.iter().filter_map(|key| self.walls.get(*key))
    }

    /// Snapshot of all walls in plan order.
    ///
    /// Later mutations of the registry do not affect the returned vector.
    #[must_use]
    pub fn all(&self) -> Vec<Wall> {
        self.iter().cloned().collect()
    }

    /// Removes every wall. The removed ids stay retired.
    pub fn clear(&mut self) {
        self.retired.extend(self.index.drain().map(|(id, _)| id));
        self.walls.clear();
        self.order.clear();
        debug!("registry cleared");
    }

    /// Returns `true` if `id` is neither live nor retired.
    #[must_use]
    pub fn is_available(&self, id: &WallId) -> bool {
        !self.index.contains_key(id) && !self.retired.contains(id)
    }

    /// The id the next call to [`add`](Self::add) would assign.
    ///
    /// Counts up from the highest automatic id seen so far and wraps to
    /// `w1` past `u64::MAX`, skipping every live or retired id.
    #[must_use]
    pub fn next_auto_id(&self) -> WallId {
        let mut n = self.last_auto;
        loop {
            n = n.checked_add(1).unwrap_or(1);
            let id = WallId::auto(n);
            if self.is_available(&id) {
                return id;
            }
        }
    }

    /// Carries the id history of `previous` into this registry.
    ///
    /// Ids used by `previous` that are not live here become retired, and
    /// the automatic id counter never moves backwards. Used when a session
    /// swaps in a freshly restored plan.
    pub fn inherit_ids(&mut self, previous: &WallRegistry) {
        let used = previous.retired.iter().chain(previous.index.keys());
        for id in used {
            if !self.index.contains_key(id) {
                self.retired.insert(id.clone());
            }
        }
        self.last_auto = self.last_auto.max(previous.last_auto);
    }

    /// Marks `id` as used without storing a wall under it.
    pub(crate) fn retire(&mut self, id: WallId) {
        self.note_auto(&id);
        self.retired.insert(id);
    }

    /// Replaces the wall `parent` by `pieces`, placed where the parent was in plan order.
    ///
    /// The caller has validated every piece and checked that every id is available.
    pub(crate) fn replace_unchecked(
        &mut self,
        parent: &WallId,
        pieces: Vec<(WallId, WallSpec)>,
    ) -> Vec<Wall> {
        let position = self
            .index
            .get(parent)
            .and_then(|key| self.order.iter().position(|k| k == key))
            .unwrap_or(self.order.len());
        let removed = self.remove(parent);
        debug_assert!(removed.is_removed(), "split parent {parent} is not in the registry");

        let mut created = Vec::with_capacity(pieces.len());
        for (offset, (id, spec)) in pieces.into_iter().enumerate() {
            let wall = Wall::new(id.clone(), spec);
            let key = self.walls.insert(wall.clone());
            self.index.insert(id, key);
            self.order.insert(position + offset, key);
            created.push(wall);
        }
        created
    }

    /// Stores an already validated wall under an available id.
    pub(crate) fn insert_unchecked(&mut self, id: WallId, spec: WallSpec) -> Wall {
        self.note_auto(&id);
        let wall = Wall::new(id.clone(), spec);
        let key = self.walls.insert(wall.clone());
        self.index.insert(id, key);
        self.order.push(key);
        debug!(id = %wall.id(), start = %wall.start(), end = %wall.end(), "wall added");
        wall
    }

    fn note_auto(&mut self, id: &WallId) {
        if let Some(n) = id.auto_number() {
            self.last_auto = self.last_auto.max(n);
        }
    }
}

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::building::BuildingDimensions;
use crate::draw::{DrawState, DrawTool};
use crate::error::Result;
use crate::math::{PlanPoint, Tolerances};
use crate::operations::{label_for, AddWallWithSplitting, SplitOutcome, WallPlacement};
use crate::persistence;
use crate::registry::{RemoveOutcome, Wall, WallId, WallRegistry, WallSpec};

/// Thickness and height given to walls drawn by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallDefaults {
    pub thickness: f64,
    pub height: f64,
}

impl Default for WallDefaults {
    fn default() -> Self {
        Self {
            thickness: 0.2,
            height: 3.0,
        }
    }
}

/// Editor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub tolerances: Tolerances,
    pub wall_defaults: WallDefaults,
}

/// Result of [`FloorPlanEditor::delete_wall`].
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Removed(Wall),
    NotFound,
    /// Perimeter walls of the generated building cannot be deleted.
    Protected,
}

/// Owns the plan state for one editing session.
///
/// Interaction code holds the editor and calls into it; nothing in the
/// crate reaches for shared global state.
///
/// Perimeter walls take part in splitting like any other wall (their
/// pieces stay perimeter walls) but are refused by
/// [`delete_wall`](Self::delete_wall).
#[derive(Debug)]
pub struct FloorPlanEditor {
    registry: WallRegistry,
    config: EditorConfig,
    draw: DrawTool,
    building: Option<BuildingDimensions>,
}

impl FloorPlanEditor {
    /// Creates an editor with an empty plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured tolerances are invalid.
    pub fn new(config: EditorConfig) -> Result<Self> {
        Ok(Self {
            registry: WallRegistry::with_tolerances(config.tolerances)?,
            config,
            draw: DrawTool::new(),
            building: None,
        })
    }

    #[must_use]
    pub fn registry(&self) -> &WallRegistry {
        &self.registry
    }

    #[must_use]
    pub fn building(&self) -> Option<&BuildingDimensions> {
        self.building.as_ref()
    }

    #[must_use]
    pub fn wall_defaults(&self) -> &WallDefaults {
        &self.config.wall_defaults
    }

    #[must_use]
    pub fn draw_state(&self) -> DrawState {
        self.draw.state()
    }

    /// Replaces the plan with the perimeter walls of a new building.
    ///
    /// Walls drawn afterwards use the building's height and thickness.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid; the plan is unchanged.
    pub fn generate_building(&mut self, dims: BuildingDimensions) -> Result<Vec<Wall>> {
        dims.validate()?;
        let mut registry = self.registry.clone();
        registry.clear();
        let mut created = Vec::with_capacity(4);
        for spec in dims.default_walls() {
            created.extend(AddWallWithSplitting::new(spec).execute(&mut registry)?.created);
        }

        self.registry = registry;
        self.building = Some(dims);
        self.config.wall_defaults = WallDefaults {
            thickness: dims.thickness,
            height: dims.height,
        };
        self.draw.cancel();
        info!(
            length = dims.length,
            width = dims.width,
            height = dims.height,
            "building generated"
        );
        Ok(created)
    }

    /// Adds a user wall from `start` to `end`, splitting at crossings.
    ///
    /// # Errors
    ///
    /// See [`AddWallWithSplitting::execute`].
    pub fn add_wall(&mut self, start: PlanPoint, end: PlanPoint) -> Result<SplitOutcome> {
        let defaults = self.config.wall_defaults;
        let spec = WallSpec::new(start, end, defaults.thickness, defaults.height);
        match AddWallWithSplitting::new(spec).execute(&mut self.registry) {
            Ok(outcome) => {
                info!(
                    %start,
                    %end,
                    created = outcome.created.len(),
                    removed = outcome.removed.len(),
                    "wall drawn"
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(%start, %end, error = %err, "wall rejected");
                Err(err)
            }
        }
    }

    /// Feeds a plan click to the draw tool; the second click adds the wall.
    ///
    /// A rejected wall still ends the gesture.
    ///
    /// # Errors
    ///
    /// See [`add_wall`](Self::add_wall).
    pub fn click(&mut self, point: PlanPoint) -> Result<Option<SplitOutcome>> {
        match self.draw.click(point) {
            Some((start, end)) => self.add_wall(start, end).map(Some),
            None => Ok(None),
        }
    }

    /// Abandons a half-drawn wall.
    pub fn cancel_draw(&mut self) {
        self.draw.cancel();
    }

    /// Rubber-band preview of the wall being drawn.
    #[must_use]
    pub fn preview(&self, cursor: PlanPoint) -> Option<(PlanPoint, PlanPoint)> {
        self.draw.preview(cursor)
    }

    /// Deletes a user wall.
    pub fn delete_wall(&mut self, id: &WallId) -> DeleteOutcome {
        let Some(wall) = self.registry.get(id) else {
            return DeleteOutcome::NotFound;
        };
        if wall.is_default_wall() {
            warn!(%id, "refusing to delete perimeter wall");
            return DeleteOutcome::Protected;
        }
        match self.registry.remove(id) {
            RemoveOutcome::Removed(wall) => {
                info!(%id, "wall deleted");
                DeleteOutcome::Removed(wall)
            }
            RemoveOutcome::NotFound => DeleteOutcome::NotFound,
        }
    }

    /// Snapshot of every wall in plan order.
    #[must_use]
    pub fn walls(&self) -> Vec<Wall> {
        self.registry.all()
    }

    /// Dimension label of every wall.
    #[must_use]
    pub fn labels(&self) -> Vec<(WallId, String)> {
        self.registry
            .iter()
            .map(|w| (w.id().clone(), label_for(w)))
            .collect()
    }

    /// 3D box placement of every wall.
    #[must_use]
    pub fn placements(&self) -> Vec<(WallId, WallPlacement)> {
        self.registry
            .iter()
            .map(|w| (w.id().clone(), WallPlacement::of(w)))
            .collect()
    }

    /// Serializes the walls as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn save(&self) -> Result<String> {
        let json = persistence::to_json(&self.registry)?;
        info!(walls = self.registry.len(), "plan saved");
        Ok(json)
    }

    /// Replaces the walls with a saved plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or describes invalid
    /// walls; the current plan is kept in that case.
    ///
    /// Ids used earlier in the session and absent from the saved plan stay
    /// retired.
    pub fn load(&mut self, json: &str) -> Result<()> {
        let mut registry = persistence::from_json(json, self.config.tolerances)?;
        registry.inherit_ids(&self.registry);
        self.registry = registry;
        self.draw.cancel();
        info!(walls = self.registry.len(), "plan loaded");
        Ok(())
    }

    /// Clears the plan and forgets the building. Cleared ids are not reused.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.building = None;
        self.draw.cancel();
        info!("editor reset");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, PlanError};

    fn p(x: f64, z: f64) -> PlanPoint {
        PlanPoint::new(x, z)
    }

    fn editor_with_building() -> FloorPlanEditor {
        let mut editor = FloorPlanEditor::new(EditorConfig::default()).unwrap();
        let dims = BuildingDimensions::new(10.0, 8.0, 2.7, 0.2).unwrap();
        editor.generate_building(dims).unwrap();
        editor
    }

    #[test]
    fn building_creates_four_protected_walls() {
        let mut editor = editor_with_building();
        let walls = editor.walls();
        assert_eq!(walls.len(), 4);
        assert!(walls.iter().all(Wall::is_default_wall));
        assert_eq!(editor.delete_wall(walls[0].id()), DeleteOutcome::Protected);
        assert_eq!(editor.walls().len(), 4);
    }

    #[test]
    fn drawn_walls_use_building_dimensions() {
        let mut editor = editor_with_building();
        let out = editor.add_wall(p(-2.0, -1.0), p(2.0, 1.0)).unwrap();
        assert!((out.created[0].height() - 2.7).abs() < f64::EPSILON);
        assert!((out.created[0].thickness() - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn interior_wall_splits_perimeter() {
        let mut editor = editor_with_building();
        // Crosses the front (z = 3.9) and back (z = -3.9) walls.
        let out = editor.add_wall(p(0.0, 5.0), p(0.0, -5.0)).unwrap();
        assert_eq!(out.removed.len(), 2);
        assert_eq!(editor.walls().len(), 4 - 2 + 4 + 3);
        let perimeter = editor.walls().iter().filter(|w| w.is_default_wall()).count();
        assert_eq!(perimeter, 6);
    }

    #[test]
    fn two_clicks_add_a_wall() {
        let mut editor = FloorPlanEditor::new(EditorConfig::default()).unwrap();
        assert!(editor.click(p(0.0, 0.0)).unwrap().is_none());
        assert_eq!(editor.draw_state(), DrawState::AwaitingEndpoint(p(0.0, 0.0)));
        let out = editor.click(p(3.0, 0.0)).unwrap().unwrap();
        assert_eq!(out.created.len(), 1);
        assert_eq!(editor.draw_state(), DrawState::Idle);
    }

    #[test]
    fn rejected_click_ends_gesture() {
        let mut editor = FloorPlanEditor::new(EditorConfig::default()).unwrap();
        editor.click(p(1.0, 1.0)).unwrap();
        let err = editor.click(p(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, PlanError::Geometry(GeometryError::ZeroLength { .. })));
        assert_eq!(editor.draw_state(), DrawState::Idle);
        assert!(editor.walls().is_empty());
    }

    #[test]
    fn delete_user_wall_then_missing() {
        let mut editor = FloorPlanEditor::new(EditorConfig::default()).unwrap();
        let out = editor.add_wall(p(0.0, 0.0), p(4.0, 0.0)).unwrap();
        let id = out.created[0].id().clone();
        assert!(matches!(editor.delete_wall(&id), DeleteOutcome::Removed(_)));
        assert_eq!(editor.delete_wall(&id), DeleteOutcome::NotFound);
    }

    #[test]
    fn labels_and_placements_cover_every_wall() {
        let editor = editor_with_building();
        let labels = editor.labels();
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[0].1, "9.80 m");
        assert_eq!(editor.placements().len(), 4);
    }

    #[test]
    fn save_and_load_round_trip() {
        let mut editor = editor_with_building();
        editor.add_wall(p(0.0, 5.0), p(0.0, -5.0)).unwrap();
        let json = editor.save().unwrap();

        let mut other = FloorPlanEditor::new(EditorConfig::default()).unwrap();
        other.load(&json).unwrap();
        assert_eq!(other.walls(), editor.walls());
    }

    #[test]
    fn failed_load_keeps_plan() {
        let mut editor = editor_with_building();
        assert!(editor.load("not json").is_err());
        assert_eq!(editor.walls().len(), 4);
    }

    #[test]
    fn invalid_building_keeps_plan() {
        let mut editor = editor_with_building();
        let bad = BuildingDimensions {
            length: -1.0,
            width: 8.0,
            height: 3.0,
            thickness: 0.2,
        };
        assert!(editor.generate_building(bad).is_err());
        assert_eq!(editor.walls().len(), 4);
    }

    #[test]
    fn reset_clears_everything() {
        let mut editor = editor_with_building();
        editor.click(p(0.0, 0.0)).unwrap();
        editor.reset();
        assert!(editor.walls().is_empty());
        assert!(editor.building().is_none());
        assert_eq!(editor.draw_state(), DrawState::Idle);
    }

    fn ids(walls: &[Wall]) -> Vec<WallId> {
        walls.iter().map(|w| w.id().clone()).collect()
    }

    #[test]
    fn regenerating_never_reuses_ids() {
        let mut editor = editor_with_building();
        let first = ids(&editor.walls());
        let out = editor.add_wall(p(-2.0, -1.0), p(2.0, 1.0)).unwrap();
        let deleted = out.created[0].id().clone();
        assert!(matches!(editor.delete_wall(&deleted), DeleteOutcome::Removed(_)));

        let dims = BuildingDimensions::new(12.0, 9.0, 3.0, 0.25).unwrap();
        let second = ids(&editor.generate_building(dims).unwrap());
        assert_eq!(second.len(), 4);
        assert!(second.iter().all(|id| !first.contains(id) && *id != deleted));

        let redrawn = editor.add_wall(p(-2.0, -1.0), p(2.0, 1.0)).unwrap();
        let redrawn = redrawn.created[0].id();
        assert!(!first.contains(redrawn) && !second.contains(redrawn));
        assert_ne!(*redrawn, deleted);
    }

    #[test]
    fn reset_never_reuses_ids() {
        let mut editor = editor_with_building();
        let before = ids(&editor.walls());
        editor.reset();
        let out = editor.add_wall(p(0.0, 0.0), p(3.0, 0.0)).unwrap();
        assert!(!before.contains(out.created[0].id()));
    }

    #[test]
    fn load_keeps_session_ids_retired() {
        let mut source = FloorPlanEditor::new(EditorConfig::default()).unwrap();
        source.add_wall(p(0.0, 0.0), p(3.0, 0.0)).unwrap();
        let json = source.save().unwrap();

        let mut editor = editor_with_building();
        let before = ids(&editor.walls());
        editor.load(&json).unwrap();
        assert_eq!(ids(&editor.walls()), vec![WallId::auto(1)]);

        let out = editor.add_wall(p(0.0, 2.0), p(3.0, 2.0)).unwrap();
        let id = out.created[0].id();
        assert!(!before.contains(id));
        assert_ne!(*id, WallId::auto(1));
    }
}

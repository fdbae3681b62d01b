use tracing::trace;

use crate::error::{RegistryError, Result};
use crate::math::{PlanPoint, Tolerances};
use crate::registry::{Wall, WallId, WallRegistry, WallSpec};

/// An existing wall that the new wall crosses in its interior.
#[derive(Debug)]
pub(super) struct HostSplit {
    pub parent: Wall,
    pub pieces: Vec<(WallId, WallSpec)>,
}

/// Everything [`AddWallWithSplitting`](super::AddWallWithSplitting) will
/// change, computed without touching the registry.
#[derive(Debug)]
pub(super) struct SplitPlan {
    pub new_id: WallId,
    pub new_pieces: Vec<(WallId, WallSpec)>,
    pub hosts: Vec<HostSplit>,
}

impl SplitPlan {
    /// Every piece the commit will insert.
    fn pieces(&self) -> impl Iterator<Item = &(WallId, WallSpec)> {
        self.hosts
            .iter()
            .flat_map(|h| h.pieces.iter())
            .chain(self.new_pieces.iter())
    }

    /// Every id the commit will insert.
    fn target_ids(&self) -> impl Iterator<Item = &WallId> {
        self.pieces().map(|(id, _)| id)
    }
}

/// Finds the crossings between `spec` and every registered wall and
/// derives the replacement pieces.
///
/// Each wall is judged against its own endpoints: a crossing splits a wall
/// only if it lies more than `tol.endpoint` away from both of that wall's
/// endpoints. A crossing near the end of one wall can therefore still
/// split the other, so a T junction cuts the wall it runs into instead of
/// dropping the pair.
///
/// The registry is only read here. Every wall is visited once, and pieces
/// produced by this call are never tested again because they do not exist
/// until the commit.
pub(super) fn plan(registry: &WallRegistry, spec: &WallSpec, tol: &Tolerances) -> Result<SplitPlan> {
    let new_id = registry.next_auto_id();
    let mut new_points: Vec<PlanPoint> = Vec::new();
    let mut hosts = Vec::new();

    for wall in registry.iter() {
        let Some(point) =
            crate::math::segment_intersection(&spec.start, &spec.end, wall.start(), wall.end(), tol)
        else {
            continue;
        };
        trace!(wall = %wall.id(), %point, "crossing");

        if is_interior(&point, wall.start(), wall.end(), tol.endpoint) {
            let pieces = split_segment(wall.spec(), &[point], tol.endpoint)
                .into_iter()
                .enumerate()
                .map(|(i, piece)| (wall.id().child(i), piece))
                .collect();
            hosts.push(HostSplit {
                parent: wall.clone(),
                pieces,
            });
        }
        if is_interior(&point, &spec.start, &spec.end, tol.endpoint) {
            new_points.push(point);
        }
    }

    let new_pieces = if new_points.is_empty() {
        vec![(new_id.clone(), *spec)]
    } else {
        split_segment(spec, &new_points, tol.endpoint)
            .into_iter()
            .enumerate()
            .map(|(i, piece)| (new_id.child(i), piece))
            .collect()
    };

    let plan = SplitPlan {
        new_id,
        new_pieces,
        hosts,
    };
    for (_, piece) in plan.pieces() {
        piece.validate(tol)?;
    }
    if let Some(taken) = plan.target_ids().find(|id| !registry.is_available(id)) {
        return Err(RegistryError::DuplicateId(taken.clone()).into());
    }
    Ok(plan)
}

/// Returns `true` if `point` is farther than `tolerance` from both `start` and `end`.
pub(super) fn is_interior(point: &PlanPoint, start: &PlanPoint, end: &PlanPoint, tolerance: f64) -> bool {
    !point.coincides_with(start, tolerance) && !point.coincides_with(end, tolerance)
}

/// Cuts `spec` at `points` into consecutive pieces from its start to its end.
///
/// Points are ordered by distance from `spec.start`. Points within
/// `tolerance` of an endpoint or of the previous kept point are dropped,
/// so every piece is longer than `tolerance`. With no usable point the
/// result is the unchanged segment.
pub(super) fn split_segment(spec: &WallSpec, points: &[PlanPoint], tolerance: f64) -> Vec<WallSpec> {
    let mut ordered: Vec<(f64, PlanPoint)> = points
        .iter()
        .filter(|p| is_interior(p, &spec.start, &spec.end, tolerance))
        .map(|p| (spec.start.distance_to(p), *p))
        .collect();
    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut pieces = Vec::with_capacity(ordered.len() + 1);
    let mut from = spec.start;
    for (_, point) in ordered {
        if point.coincides_with(&from, tolerance) {
            continue;
        }
        pieces.push(spec.with_endpoints(from, point));
        from = point;
    }
    pieces.push(spec.with_endpoints(from, spec.end));
    pieces
}

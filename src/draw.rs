use crate::math::PlanPoint;

/// Progress of a wall-drawing gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawState {
    /// No wall in progress.
    #[default]
    Idle,
    /// The start point has been placed; the next click finishes the wall.
    AwaitingEndpoint(PlanPoint),
}

/// Two-click wall drawing: the first click places the start point, the
/// second completes the wall and returns to [`DrawState::Idle`].
///
/// A pending gesture holds nothing but its start point and can be
/// abandoned at any time.
#[derive(Debug, Clone, Default)]
pub struct DrawTool {
    state: DrawState,
}

impl DrawTool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Feeds a click. Returns the finished `(start, end)` pair on the second click.
    pub fn click(&mut self, point: PlanPoint) -> Option<(PlanPoint, PlanPoint)> {
        match self.state {
            DrawState::Idle => {
                self.state = DrawState::AwaitingEndpoint(point);
                None
            }
            DrawState::AwaitingEndpoint(start) => {
                self.state = DrawState::Idle;
                Some((start, point))
            }
        }
    }

    /// Rubber-band segment from the pending start point to `cursor`.
    #[must_use]
    pub fn preview(&self, cursor: PlanPoint) -> Option<(PlanPoint, PlanPoint)> {
        match self.state {
            DrawState::Idle => None,
            DrawState::AwaitingEndpoint(start) => Some((start, cursor)),
        }
    }

    /// Abandons a pending gesture.
    pub fn cancel(&mut self) {
        self.state = DrawState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_clicks_complete_a_wall() {
        let mut tool = DrawTool::new();
        let (a, b) = (PlanPoint::new(0.0, 0.0), PlanPoint::new(4.0, 0.0));
        assert_eq!(tool.click(a), None);
        assert_eq!(tool.state(), DrawState::AwaitingEndpoint(a));
        assert_eq!(tool.click(b), Some((a, b)));
        assert_eq!(tool.state(), DrawState::Idle);
    }

    #[test]
    fn preview_only_while_awaiting() {
        let mut tool = DrawTool::new();
        let cursor = PlanPoint::new(1.0, 1.0);
        assert_eq!(tool.preview(cursor), None);
        tool.click(PlanPoint::new(0.0, 0.0));
        assert_eq!(tool.preview(cursor), Some((PlanPoint::new(0.0, 0.0), cursor)));
    }

    #[test]
    fn cancel_discards_start_point() {
        let mut tool = DrawTool::new();
        tool.click(PlanPoint::new(0.0, 0.0));
        tool.cancel();
        assert_eq!(tool.state(), DrawState::Idle);
        assert_eq!(tool.click(PlanPoint::new(2.0, 2.0)), None);
    }
}

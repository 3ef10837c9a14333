use crate::Viewport;
use glam::Vec2;

/// Last known pointer position relative to the viewport center.
///
/// Written by every pointer/touch event, read once per frame. Only the most
/// recent value matters, so there is no queue.
#[derive(Clone, Copy, Debug)]
pub struct InputTracker {
    offset: Vec2,
    half_extents: Vec2,
}

impl InputTracker {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            offset: Vec2::ZERO,
            half_extents: viewport.half_extents(),
        }
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Pointer moved to `client` (viewport coordinates, Y down).
    #[inline]
    pub fn pointer_move(&mut self, client: Vec2) {
        self.offset = client - self.half_extents;
    }

    /// Touch start/move with the page positions of all active touch points.
    ///
    /// Only single-finger gestures steer the camera; anything else is left to
    /// the host (pinch-zoom etc.). Returns `true` when the event was consumed
    /// and its default action (page scroll) should be suppressed.
    pub fn touch(&mut self, points: &[Vec2]) -> bool {
        match points {
            [only] => {
                self.offset = *only - self.half_extents;
                true
            }
            _ => false,
        }
    }

    /// Recompute the half extents from the live viewport size.
    #[inline]
    pub fn resize(&mut self, viewport: Viewport) {
        self.half_extents = viewport.half_extents();
    }
}

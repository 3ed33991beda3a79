// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-drag session state.

use kurbo::Point;

/// The state of one drag interaction on one identifier.
///
/// A session is created at the `start` phase from *live* element geometry,
/// never from a cached earlier baseline, so repeated drag cycles cannot
/// accumulate positional drift. It is read and updated during `move`, marked
/// inactive at `end`/`cancel`, and removed from its registry only after a
/// short grace delay so that callback logic running immediately after the
/// drop still observes valid data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Element position (left, top) at the moment the drag started.
    pub baseline: Point,
    /// Element stacking value at the moment the drag started.
    pub baseline_stack: f64,
    /// Pointer position at the moment the drag started.
    pub pointer_origin: Point,
    /// `true` between the `start` and `end`/`cancel` phases, `false` during
    /// the post-drop grace window.
    pub active: bool,
    /// Stamp distinguishing this session from earlier ones on the same
    /// identifier; deferred cleanup only removes a matching epoch.
    pub epoch: u64,
}

impl DragSession {
    /// Creates an active session from start-of-drag snapshots.
    #[must_use]
    pub const fn new(baseline: Point, baseline_stack: f64, pointer_origin: Point, epoch: u64) -> Self {
        Self {
            baseline,
            baseline_stack,
            pointer_origin,
            active: true,
            epoch,
        }
    }

    /// The position a pointer at `pointer` proposes for the element: the
    /// baseline plus the pointer's total delta since the drag started.
    #[must_use]
    pub fn proposed(&self, pointer: Point) -> Point {
        self.baseline + (pointer - self.pointer_origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_active() {
        let s = DragSession::new(Point::new(10.0, 20.0), 5.0, Point::new(12.0, 22.0), 1);
        assert!(s.active);
        assert_eq!(s.epoch, 1);
    }

    #[test]
    fn proposed_applies_total_pointer_delta() {
        let s = DragSession::new(Point::new(100.0, 100.0), 0.0, Point::new(110.0, 105.0), 1);

        // Pointer moved +30/-15 from its origin.
        let p = s.proposed(Point::new(140.0, 90.0));
        assert_eq!(p, Point::new(130.0, 85.0));

        // No movement proposes the baseline itself.
        assert_eq!(s.proposed(Point::new(110.0, 105.0)), Point::new(100.0, 100.0));
    }
}

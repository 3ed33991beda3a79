// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture phases and the event the engine consumes and forwards.

use kurbo::Point;

/// The stage of a continuous pointer interaction.
///
/// For one interaction the host delivers `Start`, then zero or more `Move`s,
/// then exactly one of `End` or `Cancel`, strictly in that order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// Pointer went down on a draggable element.
    Start,
    /// Pointer moved while down.
    Move,
    /// Pointer released normally.
    End,
    /// The interaction was aborted by the host (focus loss, system gesture).
    Cancel,
}

impl GesturePhase {
    /// Returns `true` for the phases that conclude an interaction.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::End | Self::Cancel)
    }
}

/// One phase-tagged pointer event.
///
/// The host constructs these and feeds them to the engine's `handle` entry
/// point. `drop_target` is always `None` on input; the engine fills it in on
/// the copy it forwards to the `on_drop` callback, so callbacks see which
/// target (if any) received the element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureEvent<E> {
    /// The gesture stage this event reports.
    pub phase: GesturePhase,
    /// Pointer position in the scene's coordinate space.
    pub pointer: Point,
    /// Host clock timestamp in milliseconds.
    pub time_ms: u64,
    /// The resolved drop target; populated by the engine before `on_drop`.
    pub drop_target: Option<E>,
}

impl<E> GestureEvent<E> {
    /// Creates an event with no drop target attached.
    #[must_use]
    pub const fn new(phase: GesturePhase, pointer: Point, time_ms: u64) -> Self {
        Self {
            phase,
            pointer,
            time_ms,
            drop_target: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_phases() {
        assert!(!GesturePhase::Start.is_terminal());
        assert!(!GesturePhase::Move.is_terminal());
        assert!(GesturePhase::End.is_terminal());
        assert!(GesturePhase::Cancel.is_terminal());
    }

    #[test]
    fn new_event_has_no_drop_target() {
        let ev: GestureEvent<u32> = GestureEvent::new(GesturePhase::Start, Point::ZERO, 0);
        assert_eq!(ev.drop_target, None);
    }
}

// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-identifier interaction callbacks and their dispatch.
//!
//! Users register a record of optional callbacks per drag identifier. The
//! engine looks the record up when a gesture phase fires and calls the
//! matching slot if one is present. Absence of a record, or of a particular
//! slot, is not an error; it is simply skipped.
//!
//! Each record can also carry an arbitrary user payload ([`HandlerContext`]).
//! The payload is passed by reference to every callback, playing the role of
//! the callback's invocation context: sibling data registered next to the
//! callbacks (say, which target counts as "correct") is reachable from inside
//! them without any captured state.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use liana_session::DocumentRegistry;

use crate::event::GestureEvent;

/// A type-erased user payload carried alongside a handler record.
///
/// # Example
///
/// ```
/// use liana_gesture::HandlerContext;
///
/// #[derive(PartialEq, Debug)]
/// struct Answer { correct_target: &'static str }
///
/// let cx = HandlerContext::new(Answer { correct_target: "tray-2" });
/// assert!(cx.is::<Answer>());
/// assert_eq!(
///     cx.downcast_ref::<Answer>().map(|a| a.correct_target),
///     Some("tray-2"),
/// );
/// ```
pub struct HandlerContext {
    inner: Box<dyn Any>,
    type_id: TypeId,
}

impl HandlerContext {
    /// Wraps a concrete payload.
    #[must_use]
    pub fn new<T: 'static>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            inner: Box::new(value),
        }
    }

    /// An empty payload.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(())
    }

    /// Returns `true` if the payload is of type `T`.
    #[must_use]
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Attempts to downcast the payload to a reference of type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }
}

impl Default for HandlerContext {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for HandlerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerContext")
            .field("type_id", &self.type_id)
            .finish_non_exhaustive()
    }
}

/// A drag interaction callback.
///
/// Receives the record's [`HandlerContext`], the element the gesture is on,
/// and the event for the phase being reported.
pub type GestureCallback<E> = Box<dyn FnMut(&HandlerContext, E, &GestureEvent<E>)>;

/// The callback slot a dispatch targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallbackSlot {
    /// `on_start`: the drag began.
    Start,
    /// `on_progress`: the element moved.
    Progress,
    /// `on_drop`: the drag ended or was cancelled; the event carries the
    /// resolved drop target.
    Drop,
}

/// The callbacks registered for one drag identifier.
///
/// All slots are optional; construction is chainable:
///
/// ```
/// use liana_gesture::{HandlerContext, InteractionHandlers};
///
/// let handlers: InteractionHandlers<u32> = InteractionHandlers::new()
///     .on_drop(|cx, _element, event| {
///         let correct = cx.downcast_ref::<&str>().copied();
///         let _ = (correct, event.drop_target);
///     })
///     .context(HandlerContext::new("tray-2"));
/// assert!(handlers.has_on_drop());
/// assert!(!handlers.has_on_start());
/// ```
pub struct InteractionHandlers<E> {
    on_start: Option<GestureCallback<E>>,
    on_progress: Option<GestureCallback<E>>,
    on_drop: Option<GestureCallback<E>>,
    context: HandlerContext,
}

impl<E> InteractionHandlers<E> {
    /// Creates a record with no callbacks and an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            on_start: None,
            on_progress: None,
            on_drop: None,
            context: HandlerContext::empty(),
        }
    }

    /// Sets the callback invoked when a drag starts.
    #[must_use]
    pub fn on_start<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&HandlerContext, E, &GestureEvent<E>) + 'static,
    {
        self.on_start = Some(Box::new(callback));
        self
    }

    /// Sets the callback invoked on every constrained move.
    #[must_use]
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&HandlerContext, E, &GestureEvent<E>) + 'static,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Sets the callback invoked when a drag ends or is cancelled.
    #[must_use]
    pub fn on_drop<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&HandlerContext, E, &GestureEvent<E>) + 'static,
    {
        self.on_drop = Some(Box::new(callback));
        self
    }

    /// Attaches a user payload reachable from every callback.
    #[must_use]
    pub fn context(mut self, context: HandlerContext) -> Self {
        self.context = context;
        self
    }

    /// Returns `true` if an `on_start` callback is set.
    #[must_use]
    pub fn has_on_start(&self) -> bool {
        self.on_start.is_some()
    }

    /// Returns `true` if an `on_progress` callback is set.
    #[must_use]
    pub fn has_on_progress(&self) -> bool {
        self.on_progress.is_some()
    }

    /// Returns `true` if an `on_drop` callback is set.
    #[must_use]
    pub fn has_on_drop(&self) -> bool {
        self.on_drop.is_some()
    }

    /// Invokes the callback in `slot`, if present.
    pub fn invoke(&mut self, slot: CallbackSlot, element: E, event: &GestureEvent<E>) {
        let callback = match slot {
            CallbackSlot::Start => self.on_start.as_mut(),
            CallbackSlot::Progress => self.on_progress.as_mut(),
            CallbackSlot::Drop => self.on_drop.as_mut(),
        };
        if let Some(callback) = callback {
            callback(&self.context, element, event);
        }
    }
}

impl<E> Default for InteractionHandlers<E> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual Debug since callbacks aren't Debug.
impl<E> fmt::Debug for InteractionHandlers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionHandlers")
            .field("has_on_start", &self.on_start.is_some())
            .field("has_on_progress", &self.on_progress.is_some())
            .field("has_on_drop", &self.on_drop.is_some())
            .field("context", &self.context)
            .finish()
    }
}

/// Looks up the handler record for `id` and invokes the callback in `slot`.
///
/// The record is taken out of the registry for the duration of the call and
/// restored afterwards, so a callback that re-entrantly mutates the handler
/// map never observes a half-borrowed record; if the callback installed a
/// replacement for `id`, the replacement wins and the taken record is
/// dropped.
pub fn dispatch<E: Copy>(
    registry: &mut DocumentRegistry<E, InteractionHandlers<E>>,
    id: &str,
    slot: CallbackSlot,
    element: E,
    event: &GestureEvent<E>,
) {
    if let Some(mut record) = registry.take_handler(id) {
        record.invoke(slot, element, event);
        registry.restore_handler(id, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::GesturePhase;
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use core::cell::RefCell;
    use kurbo::Point;

    fn event(phase: GesturePhase) -> GestureEvent<u32> {
        GestureEvent::new(phase, Point::ZERO, 0)
    }

    #[test]
    fn empty_record_reports_no_slots() {
        let record: InteractionHandlers<u32> = InteractionHandlers::new();
        assert!(!record.has_on_start());
        assert!(!record.has_on_progress());
        assert!(!record.has_on_drop());
    }

    #[test]
    fn invoke_calls_only_the_requested_slot() {
        let calls = Rc::new(RefCell::new(alloc::vec::Vec::new()));

        let start_calls = calls.clone();
        let drop_calls = calls.clone();
        let mut record: InteractionHandlers<u32> = InteractionHandlers::new()
            .on_start(move |_, _, _| start_calls.borrow_mut().push("start"))
            .on_drop(move |_, _, _| drop_calls.borrow_mut().push("drop"));

        record.invoke(CallbackSlot::Start, 1, &event(GesturePhase::Start));
        // No on_progress registered: skipped without error.
        record.invoke(CallbackSlot::Progress, 1, &event(GesturePhase::Move));
        record.invoke(CallbackSlot::Drop, 1, &event(GesturePhase::End));

        assert_eq!(*calls.borrow(), ["start", "drop"]);
    }

    #[test]
    fn context_is_reachable_from_callbacks() {
        let seen = Rc::new(RefCell::new(None));
        let seen_in = seen.clone();

        let mut record: InteractionHandlers<u32> = InteractionHandlers::new()
            .on_drop(move |cx, _, _| {
                *seen_in.borrow_mut() = cx.downcast_ref::<&str>().copied();
            })
            .context(HandlerContext::new("tray-2"));

        record.invoke(CallbackSlot::Drop, 1, &event(GesturePhase::End));
        assert_eq!(*seen.borrow(), Some("tray-2"));
    }

    #[test]
    fn dispatch_skips_missing_records() {
        let mut registry: DocumentRegistry<u32, InteractionHandlers<u32>> =
            DocumentRegistry::new();
        // Nothing registered; must be a silent no-op.
        dispatch(
            &mut registry,
            "card",
            CallbackSlot::Start,
            1,
            &event(GesturePhase::Start),
        );
    }

    #[test]
    fn dispatch_restores_the_record() {
        let mut registry: DocumentRegistry<u32, InteractionHandlers<u32>> =
            DocumentRegistry::new();
        let mut map = hashbrown::HashMap::new();
        map.insert(
            "card".to_string(),
            InteractionHandlers::new().on_start(|_, _, _| {}),
        );
        registry.set_handler_map(map);

        dispatch(
            &mut registry,
            "card",
            CallbackSlot::Start,
            1,
            &event(GesturePhase::Start),
        );
        assert_eq!(registry.handler_count(), 1);
        assert!(registry.handler("card").unwrap().has_on_start());
    }

    #[test]
    fn context_downcast_to_wrong_type_is_none() {
        let cx = HandlerContext::new(7_u32);
        assert!(cx.is::<u32>());
        assert!(!cx.is::<i64>());
        assert!(cx.downcast_ref::<i64>().is_none());
        assert_eq!(cx.downcast_ref::<u32>(), Some(&7));
    }
}

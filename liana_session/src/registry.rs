// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-document drag state and the registry of documents.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;
use kurbo::Point;
use liana_constraint::ConstraintSpec;

use crate::queue::{Task, TaskQueue};
use crate::session::DragSession;

/// Base value of the per-document stacking counter.
///
/// The counter starts here and advances by one for every drag start that
/// raises its element, so values assigned across successive starts are
/// strictly increasing within a document. A visibly large base keeps raised
/// elements above host-authored stacking values.
pub const STACK_BASE: f64 = 1000.0;

/// Everything one document owns: sessions, constraint specs, handler records,
/// the stacking counter, and pending deferred tasks.
///
/// `E` is the application's element key; `H` is the handler record type. This
/// crate never inspects `H` (callback shapes live upstream); it only stores,
/// hands out, and clears records.
///
/// The registry persists across scene transitions within its document; it is
/// cleared wholesale by [`DocumentRegistry::clear`] on explicit resets or
/// scene-unload hygiene.
pub struct DocumentRegistry<E, H> {
    sessions: HashMap<String, DragSession>,
    constraints: HashMap<String, ConstraintSpec>,
    handlers: HashMap<String, H>,
    stack_counter: f64,
    epoch: u64,
    tasks: TaskQueue<Task<E>>,
}

impl<E, H> DocumentRegistry<E, H> {
    /// Creates an empty registry with the stacking counter at [`STACK_BASE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            constraints: HashMap::new(),
            handlers: HashMap::new(),
            stack_counter: STACK_BASE,
            epoch: 0,
            tasks: TaskQueue::new(),
        }
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    /// Returns the session for `id`, if one exists (active or in its
    /// post-drop grace window).
    #[must_use]
    pub fn session(&self, id: &str) -> Option<&DragSession> {
        self.sessions.get(id)
    }

    /// Returns the session for `id` mutably.
    pub fn session_mut(&mut self, id: &str) -> Option<&mut DragSession> {
        self.sessions.get_mut(id)
    }

    /// Returns `true` if `id` has a session in its active phase.
    #[must_use]
    pub fn has_active_session(&self, id: &str) -> bool {
        self.sessions.get(id).is_some_and(|s| s.active)
    }

    /// Creates (or overwrites) the session for `id` from start-of-drag
    /// snapshots, returning the epoch stamped onto it.
    ///
    /// Overwriting is deliberate: a new start for an identifier whose old
    /// session is still awaiting deferred cleanup simply wins, and the stale
    /// cleanup later no-ops on the epoch mismatch.
    pub fn begin_session(
        &mut self,
        id: &str,
        baseline: Point,
        baseline_stack: f64,
        pointer_origin: Point,
    ) -> u64 {
        self.epoch += 1;
        let epoch = self.epoch;
        self.sessions.insert(
            id.to_string(),
            DragSession::new(baseline, baseline_stack, pointer_origin, epoch),
        );
        epoch
    }

    /// Removes the session for `id` if its epoch matches and it is inactive.
    ///
    /// Returns `true` if a session was removed. This is the deferred-cleanup
    /// entry point; a session restarted (new epoch) or re-activated since the
    /// cleanup was scheduled is left untouched.
    pub fn expire_session(&mut self, id: &str, epoch: u64) -> bool {
        match self.sessions.get(id) {
            Some(s) if s.epoch == epoch && !s.active => {
                self.sessions.remove(id);
                true
            }
            _ => false,
        }
    }

    /// Returns the number of sessions currently stored, in any phase.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    // =========================================================================
    // Constraint specs
    // =========================================================================

    /// Returns the constraint spec stored for `id`, if any.
    #[must_use]
    pub fn constraint(&self, id: &str) -> Option<&ConstraintSpec> {
        self.constraints.get(id)
    }

    /// Stores (replacing) the constraint spec for `id`.
    pub fn set_constraint(&mut self, id: &str, spec: ConstraintSpec) {
        self.constraints.insert(id.to_string(), spec);
    }

    /// Returns the number of constraint specs stored.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    // =========================================================================
    // Handler records
    // =========================================================================

    /// Returns the handler record for `id`, if any.
    #[must_use]
    pub fn handler(&self, id: &str) -> Option<&H> {
        self.handlers.get(id)
    }

    /// Replaces the entire handler map.
    pub fn set_handler_map(&mut self, handlers: HashMap<String, H>) {
        self.handlers = handlers;
    }

    /// Takes the handler record for `id` out of the map.
    ///
    /// Pairing this with [`DocumentRegistry::restore_handler`] lets a caller
    /// invoke callbacks on the record while the map stays free for re-entrant
    /// mutation from inside the callback.
    pub fn take_handler(&mut self, id: &str) -> Option<H> {
        self.handlers.remove(id)
    }

    /// Puts a taken handler record back, unless the slot has been refilled in
    /// the meantime (a re-entrant replacement wins). Returns `true` if the
    /// record was restored.
    pub fn restore_handler(&mut self, id: &str, record: H) -> bool {
        if self.handlers.contains_key(id) {
            return false;
        }
        self.handlers.insert(id.to_string(), record);
        true
    }

    /// Returns the number of handler records stored.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    // =========================================================================
    // Stacking counter
    // =========================================================================

    /// Advances the stacking counter and returns the new value.
    ///
    /// Values returned across successive calls are strictly increasing for
    /// the lifetime of the registry; [`DocumentRegistry::clear`] deliberately
    /// does not rewind the counter.
    pub fn next_stack_value(&mut self) -> f64 {
        self.stack_counter += 1.0;
        self.stack_counter
    }

    /// Returns the current stacking counter value.
    #[must_use]
    pub fn stack_counter(&self) -> f64 {
        self.stack_counter
    }

    // =========================================================================
    // Deferred tasks
    // =========================================================================

    /// Schedules a deferred task to become due at `due_ms`.
    pub fn schedule_task(&mut self, due_ms: u64, task: Task<E>) {
        self.tasks.schedule(due_ms, task);
    }

    /// Removes and returns every task due at `now_ms`.
    pub fn take_due_tasks(&mut self, now_ms: u64) -> Vec<Task<E>> {
        self.tasks.take_due(now_ms)
    }

    /// Returns the number of tasks still pending.
    #[must_use]
    pub fn pending_task_count(&self) -> usize {
        self.tasks.len()
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Clears sessions, constraint specs, handler records, and pending tasks.
    ///
    /// The stacking counter and epoch are preserved so that values assigned
    /// after a reset remain strictly above everything assigned before it.
    pub fn clear(&mut self) {
        self.sessions.clear();
        self.constraints.clear();
        self.handlers.clear();
        self.tasks.clear();
    }
}

impl<E, H> Default for DocumentRegistry<E, H> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual Debug since handler records are typically closures.
impl<E, H> fmt::Debug for DocumentRegistry<E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentRegistry")
            .field("sessions", &self.sessions.len())
            .field("constraints", &self.constraints.len())
            .field("handlers", &self.handlers.len())
            .field("stack_counter", &self.stack_counter)
            .field("pending_tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

/// Per-document isolation: a lazily-populated map from document identity to
/// [`DocumentRegistry`].
///
/// The registry is created at document-load time, owned by the embedder, and
/// threaded as an explicit parameter through every engine operation, so state
/// for one document is never reachable from another.
pub struct SessionRegistry<D, E, H> {
    docs: HashMap<D, DocumentRegistry<E, H>>,
}

impl<D, E, H> SessionRegistry<D, E, H>
where
    D: core::hash::Hash + Eq,
{
    /// Creates an empty registry of documents.
    #[must_use]
    pub fn new() -> Self {
        Self {
            docs: HashMap::new(),
        }
    }

    /// Returns the registry for `doc`, creating an empty one on first use.
    pub fn get_or_create(&mut self, doc: D) -> &mut DocumentRegistry<E, H> {
        self.docs.entry(doc).or_default()
    }

    /// Returns the registry for `doc`, if it exists.
    #[must_use]
    pub fn get(&self, doc: &D) -> Option<&DocumentRegistry<E, H>> {
        self.docs.get(doc)
    }

    /// Returns the registry for `doc` mutably, if it exists.
    pub fn get_mut(&mut self, doc: &D) -> Option<&mut DocumentRegistry<E, H>> {
        self.docs.get_mut(doc)
    }

    /// Drops the registry for `doc` outright (document teardown).
    pub fn remove(&mut self, doc: &D) -> bool {
        self.docs.remove(doc).is_some()
    }

    /// Returns the number of documents with registries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns `true` if no document has a registry yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl<D, E, H> Default for SessionRegistry<D, E, H>
where
    D: core::hash::Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D, E, H> fmt::Debug for SessionRegistry<D, E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("documents", &self.docs.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    type Reg = DocumentRegistry<u64, &'static str>;

    #[test]
    fn new_registry_is_empty() {
        let reg = Reg::new();
        assert_eq!(reg.session_count(), 0);
        assert_eq!(reg.constraint_count(), 0);
        assert_eq!(reg.handler_count(), 0);
        assert_eq!(reg.stack_counter(), STACK_BASE);
        assert_eq!(reg.pending_task_count(), 0);
    }

    #[test]
    fn begin_session_snapshots_and_activates() {
        let mut reg = Reg::new();
        let epoch = reg.begin_session("card", Point::new(10.0, 20.0), 3.0, Point::new(11.0, 21.0));

        let s = reg.session("card").unwrap();
        assert!(s.active);
        assert_eq!(s.epoch, epoch);
        assert_eq!(s.baseline, Point::new(10.0, 20.0));
        assert_eq!(s.baseline_stack, 3.0);
        assert_eq!(s.pointer_origin, Point::new(11.0, 21.0));
        assert!(reg.has_active_session("card"));
    }

    #[test]
    fn begin_session_overwrites_previous() {
        let mut reg = Reg::new();
        let first = reg.begin_session("card", Point::new(0.0, 0.0), 0.0, Point::ZERO);
        let second = reg.begin_session("card", Point::new(50.0, 60.0), 1.0, Point::ZERO);

        assert!(second > first, "epochs must advance");
        assert_eq!(reg.session_count(), 1);
        assert_eq!(reg.session("card").unwrap().baseline, Point::new(50.0, 60.0));
    }

    #[test]
    fn expire_removes_only_matching_inactive_sessions() {
        let mut reg = Reg::new();
        let epoch = reg.begin_session("card", Point::ZERO, 0.0, Point::ZERO);

        // Still active: expiry is refused.
        assert!(!reg.expire_session("card", epoch));
        assert!(reg.session("card").is_some());

        reg.session_mut("card").unwrap().active = false;
        assert!(reg.expire_session("card", epoch));
        assert!(reg.session("card").is_none());
    }

    #[test]
    fn stale_epoch_does_not_clobber_restarted_session() {
        let mut reg = Reg::new();
        let old = reg.begin_session("card", Point::ZERO, 0.0, Point::ZERO);
        reg.session_mut("card").unwrap().active = false;

        // The identifier restarts before the deferred cleanup fires.
        let _new = reg.begin_session("card", Point::new(5.0, 5.0), 0.0, Point::ZERO);

        // The stale cleanup must be a no-op.
        assert!(!reg.expire_session("card", old));
        assert!(reg.has_active_session("card"));
    }

    #[test]
    fn constraints_store_and_replace() {
        let mut reg = Reg::new();
        assert!(reg.constraint("card").is_none());

        reg.set_constraint(
            "card",
            ConstraintSpec {
                max_x: Some(100.0),
                ..ConstraintSpec::default()
            },
        );
        assert_eq!(reg.constraint("card").unwrap().max_x, Some(100.0));

        reg.set_constraint(
            "card",
            ConstraintSpec {
                min_y: Some(5.0),
                ..ConstraintSpec::default()
            },
        );
        let spec = reg.constraint("card").unwrap();
        assert_eq!(spec.max_x, None);
        assert_eq!(spec.min_y, Some(5.0));
        assert_eq!(reg.constraint_count(), 1);
    }

    #[test]
    fn take_and_restore_handler() {
        let mut reg = Reg::new();
        let mut map = HashMap::new();
        map.insert("card".to_string(), "record");
        reg.set_handler_map(map);

        let taken = reg.take_handler("card").unwrap();
        assert!(reg.handler("card").is_none());
        assert!(reg.restore_handler("card", taken));
        assert_eq!(reg.handler("card"), Some(&"record"));
    }

    #[test]
    fn restore_defers_to_reentrant_replacement() {
        let mut reg = Reg::new();
        let mut map = HashMap::new();
        map.insert("card".to_string(), "old");
        reg.set_handler_map(map);

        let taken = reg.take_handler("card").unwrap();

        // A callback re-entrantly installed a replacement map.
        let mut replacement = HashMap::new();
        replacement.insert("card".to_string(), "new");
        reg.set_handler_map(replacement);

        assert!(!reg.restore_handler("card", taken));
        assert_eq!(reg.handler("card"), Some(&"new"));
    }

    #[test]
    fn stack_values_are_strictly_increasing() {
        let mut reg = Reg::new();
        let a = reg.next_stack_value();
        let b = reg.next_stack_value();
        let c = reg.next_stack_value();
        assert!(STACK_BASE < a && a < b && b < c, "counter must advance");
    }

    #[test]
    fn clear_empties_state_but_keeps_counter() {
        let mut reg = Reg::new();
        reg.begin_session("card", Point::ZERO, 0.0, Point::ZERO);
        reg.set_constraint("card", ConstraintSpec::default());
        let mut map = HashMap::new();
        map.insert("card".to_string(), "record");
        reg.set_handler_map(map);
        reg.schedule_task(10, Task::AutoSnap { element: 1 });
        let counter = reg.next_stack_value();

        reg.clear();

        assert_eq!(reg.session_count(), 0);
        assert_eq!(reg.constraint_count(), 0);
        assert_eq!(reg.handler_count(), 0);
        assert_eq!(reg.pending_task_count(), 0);
        assert!(reg.next_stack_value() > counter, "counter survives reset");
    }

    #[test]
    fn documents_are_isolated() {
        let mut registry: SessionRegistry<u32, u64, ()> = SessionRegistry::new();

        registry
            .get_or_create(1)
            .begin_session("card", Point::ZERO, 0.0, Point::ZERO);

        assert!(registry.get_or_create(2).session("card").is_none());
        assert!(registry.get(&1).unwrap().has_active_session("card"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn remove_drops_a_document() {
        let mut registry: SessionRegistry<u32, u64, ()> = SessionRegistry::new();
        registry.get_or_create(1);
        assert!(registry.remove(&1));
        assert!(!registry.remove(&1));
        assert!(registry.is_empty());
    }
}

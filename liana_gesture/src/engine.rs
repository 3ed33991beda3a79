// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag controller: gesture state machine, transitions, and lifecycle.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use liana_constraint::{Containment, ConstraintSpec, containment_bounds, resolve};
use liana_overlap::best_target;
use liana_session::{DocumentRegistry, SessionRegistry, Task};

use crate::config::DragConfig;
use crate::event::{GestureEvent, GesturePhase};
use crate::handlers::{CallbackSlot, InteractionHandlers, dispatch};
use crate::port::{GeometryPort, GeometryProp, ScenePort};

/// Handler records keyed by drag identifier, as installed by
/// [`DragController::set_interaction_map`].
pub type InteractionMap<E> = HashMap<String, InteractionHandlers<E>>;

/// The element-or-identifier input accepted by
/// [`DragController::set_constraints`].
///
/// Mixed inputs are resolved once, at the API boundary, into canonical
/// (element, identifier) pairs before any state changes; unresolvable entries
/// warn and are skipped individually.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstraintTarget<E> {
    /// A direct element reference; its identifier is looked up in the scene.
    Element(E),
    /// A drag identifier; its element is looked up in the active scene.
    Id(String),
    /// Several targets, applied in order.
    Many(Vec<ConstraintTarget<E>>),
}

/// Where [`DragController::snap_to`] sends an element.
#[derive(Clone, Debug, PartialEq)]
pub enum SnapDestination<E> {
    /// A direct element reference.
    Element(E),
    /// A region selector resolved against the active scene.
    Selector(String),
}

/// The drag engine.
///
/// One controller serves any number of documents; state for each document
/// lives in its own registry, created lazily and addressed by the document
/// identity `D` the embedder passes to every operation. The controller owns
/// no elements and no clock; hosts reach it with explicit port references
/// and millisecond timestamps.
///
/// See the crate documentation for a worked example.
pub struct DragController<D, E> {
    registry: SessionRegistry<D, E, InteractionHandlers<E>>,
    config: DragConfig,
}

impl<D, E> DragController<D, E>
where
    D: Hash + Eq + Clone,
    E: Copy + PartialEq,
{
    /// Creates a controller with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DragConfig::default())
    }

    /// Creates a controller with the given configuration.
    #[must_use]
    pub fn with_config(config: DragConfig) -> Self {
        Self {
            registry: SessionRegistry::new(),
            config,
        }
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Returns the configuration mutably.
    pub fn config_mut(&mut self) -> &mut DragConfig {
        &mut self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: DragConfig) {
        self.config = config;
    }

    /// Read access to a document's registry, mainly for tests and
    /// host-side diagnostics.
    #[must_use]
    pub fn document(&self, doc: &D) -> Option<&DocumentRegistry<E, InteractionHandlers<E>>> {
        self.registry.get(doc)
    }

    // =========================================================================
    // Gesture handling
    // =========================================================================

    /// The single gesture entry point: feed every phase-tagged pointer event
    /// for a draggable element here.
    pub fn handle<H>(&mut self, host: &mut H, doc: D, element: E, event: &GestureEvent<E>)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        match event.phase {
            GesturePhase::Start => self.phase_start(host, doc, element, event),
            GesturePhase::Move => self.phase_move(host, doc, element, event),
            GesturePhase::End | GesturePhase::Cancel => {
                self.phase_terminal(host, doc, element, event);
            }
        }
    }

    fn phase_start<H>(&mut self, host: &mut H, doc: D, element: E, event: &GestureEvent<E>)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        let Some(id) = nonempty_drag_id(host, element) else {
            log::warn!("element has no drag identifier; ignoring start");
            return;
        };
        if host.is_locked(element) {
            return;
        }

        // Always snapshot live geometry. Repeated drag cycles measure their
        // deltas from wherever the element actually is now, so external
        // repositioning between drags never turns into drift.
        let baseline = Point::new(
            host.get(element, GeometryProp::Left),
            host.get(element, GeometryProp::Top),
        );
        let baseline_stack = host.get(element, GeometryProp::StackOrder);

        let reg = self.registry.get_or_create(doc);
        reg.begin_session(&id, baseline, baseline_stack, event.pointer);

        if self.config.bring_to_front {
            let raised = reg.next_stack_value();
            host.set(element, GeometryProp::StackOrder, raised);
        }

        dispatch(reg, &id, CallbackSlot::Start, element, event);
    }

    fn phase_move<H>(&mut self, host: &mut H, doc: D, element: E, event: &GestureEvent<E>)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        let Some(id) = nonempty_drag_id(host, element) else {
            return;
        };
        let reg = self.registry.get_or_create(doc);
        // A move without a prior start is ignored.
        let Some(session) = reg.session(&id).copied() else {
            return;
        };
        if !session.active {
            return;
        }

        let proposed = session.proposed(event.pointer);
        let resolved = match reg.constraint(&id).cloned() {
            Some(spec) => {
                let bounds = containment_rect(host, element, &spec);
                resolve(proposed, &spec, session.baseline, bounds)
            }
            None => proposed,
        };

        host.set(element, GeometryProp::Left, resolved.x);
        host.set(element, GeometryProp::Top, resolved.y);

        dispatch(reg, &id, CallbackSlot::Progress, element, event);
    }

    fn phase_terminal<H>(&mut self, host: &mut H, doc: D, element: E, event: &GestureEvent<E>)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        let Some(id) = nonempty_drag_id(host, element) else {
            return;
        };
        let reg = self.registry.get_or_create(doc);
        let Some(session) = reg.session_mut(&id) else {
            return;
        };
        // Mark inactive immediately; a second end/cancel before cleanup
        // lands in the `!active` arm and is a no-op.
        if !session.active {
            return;
        }
        session.active = false;
        let epoch = session.epoch;

        let dragged = element_rect(host, element);
        let mut candidates = Vec::new();
        for target in host.drop_targets() {
            if target == element {
                continue;
            }
            candidates.push((target, element_rect(host, target)));
        }

        let mut delivered = *event;
        delivered.drop_target = best_target(dragged, candidates);

        dispatch(reg, &id, CallbackSlot::Drop, element, &delivered);

        // Deferred so that logic chained off `on_drop` can still read the
        // session within the grace window.
        let due = event.time_ms + self.config.cleanup_delay_ms;
        reg.schedule_task(due, Task::CleanupSession { id, epoch });
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Animates `element` back to its session baseline position (and, when
    /// `bring_to_front` is enabled, its baseline stacking value).
    ///
    /// Works against an active session or one still in its post-drop grace
    /// window; with no session data at all this silently does nothing, since a
    /// call racing the cleanup debounce is normal, not a bug.
    pub fn snap_back<H>(&self, host: &mut H, doc: &D, element: E)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        let Some(id) = nonempty_drag_id(host, element) else {
            return;
        };
        let Some(session) = self
            .registry
            .get(doc)
            .and_then(|reg| reg.session(&id))
            .copied()
        else {
            return;
        };

        let duration = self.config.snap_back_duration;
        let timing = self.config.snap_back_timing;
        host.animate(
            element,
            GeometryProp::Left,
            session.baseline.x,
            duration,
            timing,
        );
        host.animate(
            element,
            GeometryProp::Top,
            session.baseline.y,
            duration,
            timing,
        );
        if self.config.bring_to_front {
            host.animate(
                element,
                GeometryProp::StackOrder,
                session.baseline_stack,
                duration,
                timing,
            );
        }
    }

    /// Animates `element` to the current position of `destination`.
    ///
    /// An unresolved selector warns and aborts the whole call. Stacking order
    /// is not touched.
    pub fn snap_to<H>(&self, host: &mut H, element: E, destination: SnapDestination<E>)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        let destination = match destination {
            SnapDestination::Element(e) => e,
            SnapDestination::Selector(selector) => match host.resolve_region(&selector) {
                Some(e) => e,
                None => {
                    log::warn!("snap_to destination {selector:?} did not resolve");
                    return;
                }
            },
        };

        let target = Point::new(
            host.get(destination, GeometryProp::Left),
            host.get(destination, GeometryProp::Top),
        );
        let duration = self.config.snap_to_duration;
        let timing = self.config.snap_to_timing;
        host.animate(element, GeometryProp::Left, target.x, duration, timing);
        host.animate(element, GeometryProp::Top, target.y, duration, timing);
    }

    /// Immediately repositions `element` into compliance with its stored
    /// constraint spec, using its current position as both the proposal and
    /// the axis-lock baseline.
    ///
    /// Writes only when the resolved position differs, with no animation.
    /// A session that still exists for the identifier has its baseline
    /// refreshed so a subsequent start measures deltas from the corrected
    /// position. No-op without an identifier or a stored spec. Idempotent.
    pub fn auto_snap<H>(&mut self, host: &mut H, doc: D, element: E)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        let Some(id) = nonempty_drag_id(host, element) else {
            return;
        };
        let Some(reg) = self.registry.get_mut(&doc) else {
            return;
        };
        let Some(spec) = reg.constraint(&id).cloned() else {
            return;
        };

        let current = Point::new(
            host.get(element, GeometryProp::Left),
            host.get(element, GeometryProp::Top),
        );
        let bounds = containment_rect(host, element, &spec);
        let resolved = resolve(current, &spec, current, bounds);

        if resolved != current {
            host.set(element, GeometryProp::Left, resolved.x);
            host.set(element, GeometryProp::Top, resolved.y);
            if let Some(session) = reg.session_mut(&id) {
                session.baseline = resolved;
            }
        }
    }

    /// Disables drag recognition on `element` (and, via the host's flag
    /// propagation, its descendants).
    pub fn lock<H>(&self, host: &mut H, element: E)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        Self::set_lock_state(host, element, true);
    }

    /// Re-enables drag recognition on `element`.
    pub fn unlock<H>(&self, host: &mut H, element: E)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        Self::set_lock_state(host, element, false);
    }

    fn set_lock_state<H>(host: &mut H, element: E, locked: bool)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        if nonempty_drag_id(host, element).is_none() {
            log::warn!("element has no drag identifier; ignoring lock change");
            return;
        }
        host.set_locked(element, locked);
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Replaces the interaction callbacks for `doc`, keyed by drag
    /// identifier.
    pub fn set_interaction_map(&mut self, doc: D, handlers: InteractionMap<E>) {
        self.registry.get_or_create(doc).set_handler_map(handlers);
    }

    /// Stores a constraint spec for every target that resolves.
    ///
    /// When auto-snap applies (the spec's own `auto_snap`, else the global
    /// default), compliance runs are deferred to the host's next tick
    /// (scheduled at `now_ms`, executed by the next
    /// [`DragController::run_due`]) so element geometry has settled before
    /// being read.
    pub fn set_constraints<H>(
        &mut self,
        host: &mut H,
        doc: D,
        target: ConstraintTarget<E>,
        spec: ConstraintSpec,
        now_ms: u64,
    ) where
        H: GeometryPort<E> + ScenePort<E>,
    {
        let mut targets = Vec::new();
        resolve_constraint_target(host, target, &mut targets);
        if targets.is_empty() {
            return;
        }

        let snap = spec.auto_snap.unwrap_or(self.config.auto_snap);
        let reg = self.registry.get_or_create(doc);
        for (element, id) in targets {
            reg.set_constraint(&id, spec.clone());
            if snap {
                reg.schedule_task(now_ms, Task::AutoSnap { element });
            }
        }
    }

    /// Clears all sessions, constraint specs, handler records, and pending
    /// deferred work for `doc`, and unlocks every element bearing a drag
    /// identifier within `scope` (the whole document when `None`).
    pub fn reset_state<H>(&mut self, host: &mut H, doc: D, scope: Option<E>)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        if let Some(reg) = self.registry.get_mut(&doc) {
            reg.clear();
        }
        for element in host.draggables(scope) {
            host.set_locked(element, false);
        }
    }

    // =========================================================================
    // Deferred work
    // =========================================================================

    /// Executes every deferred task due at `now_ms`: debounced session
    /// cleanup and deferred auto-snap. Hosts call this once per event-loop
    /// turn (or off a timer).
    pub fn run_due<H>(&mut self, host: &mut H, doc: D, now_ms: u64)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        let tasks = match self.registry.get_mut(&doc) {
            Some(reg) => reg.take_due_tasks(now_ms),
            None => return,
        };
        for task in tasks {
            match task {
                Task::CleanupSession { id, epoch } => {
                    if let Some(reg) = self.registry.get_mut(&doc) {
                        reg.expire_session(&id, epoch);
                    }
                }
                Task::AutoSnap { element } => self.auto_snap(host, doc.clone(), element),
            }
        }
    }

    // =========================================================================
    // Lifecycle hooks
    // =========================================================================

    /// Host hook for "document ready": creates the document's registry
    /// eagerly so the API is live before the first gesture.
    pub fn document_loaded(&mut self, doc: D) {
        self.registry.get_or_create(doc);
    }

    /// Host hook for "scene about to display": loads declarative constraint
    /// attributes for every draggable in the active scene and defers any
    /// configured auto-snap.
    pub fn scene_displayed<H>(&mut self, host: &mut H, doc: D, now_ms: u64)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        for element in host.draggables(None) {
            let Some(id) = nonempty_drag_id(host, element) else {
                continue;
            };
            let spec = crate::decl::spec_from_attributes(host, element);
            if spec.is_empty() {
                continue;
            }
            let snap = spec.auto_snap.unwrap_or(self.config.auto_snap);
            let reg = self.registry.get_or_create(doc.clone());
            reg.set_constraint(&id, spec);
            if snap {
                reg.schedule_task(now_ms, Task::AutoSnap { element });
            }
        }
    }

    /// Host hook for "scene unloaded": performs a full reset when the
    /// configuration asks for it.
    pub fn scene_unloaded<H>(&mut self, host: &mut H, doc: D)
    where
        H: GeometryPort<E> + ScenePort<E>,
    {
        if self.config.reset_on_scene_unload {
            self.reset_state(host, doc, None);
        }
    }
}

impl<D, E> Default for DragController<D, E>
where
    D: Hash + Eq + Clone,
    E: Copy + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D, E> fmt::Debug for DragController<D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragController")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish()
    }
}

/// Returns the element's drag identifier, treating an empty string as absent.
fn nonempty_drag_id<E, S>(scene: &S, element: E) -> Option<String>
where
    E: Copy,
    S: ScenePort<E> + ?Sized,
{
    scene.drag_id(element).filter(|id| !id.is_empty())
}

/// Reads an element's axis-aligned box.
fn element_rect<E, H>(host: &H, element: E) -> Rect
where
    E: Copy,
    H: GeometryPort<E> + ?Sized,
{
    let left = host.get(element, GeometryProp::Left);
    let top = host.get(element, GeometryProp::Top);
    let width = host.get(element, GeometryProp::Width);
    let height = host.get(element, GeometryProp::Height);
    Rect::new(left, top, left + width, top + height)
}

/// Resolves a spec's `within` constraint to a rectangle of valid top-left
/// positions, or `None` when the spec has no containment or its selector did
/// not resolve (the latter warns; the caller skips only that stage).
fn containment_rect<E, H>(host: &H, element: E, spec: &ConstraintSpec) -> Option<Rect>
where
    E: Copy,
    H: GeometryPort<E> + ScenePort<E> + ?Sized,
{
    let within = spec.within.as_ref()?;
    let element_size = Size::new(
        host.get(element, GeometryProp::Width),
        host.get(element, GeometryProp::Height),
    );

    match within {
        Containment::Parent => {
            // Parent bounds are relative to the container's own origin.
            let container = host
                .container_of(element)
                .unwrap_or_else(|| host.scene_root());
            let container_size = Size::new(
                host.get(container, GeometryProp::Width),
                host.get(container, GeometryProp::Height),
            );
            Some(containment_bounds(Point::ZERO, container_size, element_size))
        }
        Containment::Region(selector) => match host.resolve_region(selector) {
            Some(region) => {
                // Region bounds are absolute scene coordinates.
                let origin = Point::new(
                    host.get(region, GeometryProp::Left),
                    host.get(region, GeometryProp::Top),
                );
                let region_size = Size::new(
                    host.get(region, GeometryProp::Width),
                    host.get(region, GeometryProp::Height),
                );
                Some(containment_bounds(origin, region_size, element_size))
            }
            None => {
                log::warn!("containment region {selector:?} did not resolve; skipping containment");
                None
            }
        },
    }
}

fn resolve_constraint_target<E, H>(
    host: &H,
    target: ConstraintTarget<E>,
    out: &mut Vec<(E, String)>,
) where
    E: Copy,
    H: ScenePort<E> + ?Sized,
{
    match target {
        ConstraintTarget::Element(element) => match nonempty_drag_id(host, element) {
            Some(id) => out.push((element, id)),
            None => log::warn!("constraint target element has no drag identifier; skipping"),
        },
        ConstraintTarget::Id(id) => match host.element_for_id(&id) {
            Some(element) => out.push((element, id)),
            None => log::warn!("constraint target {id:?} not found in active scene; skipping"),
        },
        ConstraintTarget::Many(targets) => {
            for target in targets {
                resolve_constraint_target(host, target, out);
            }
        }
    }
}

// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=liana_gesture --heading-base-level=0

//! Liana Gesture: a constrained, callback-driven drag-and-drop engine for 2D
//! stages.
//!
//! The engine consumes phase-tagged pointer events for elements positioned on
//! a stage and drives everything a drag needs: per-element sessions, geometric
//! constraints (boundary, axis lock, containment), overlap-based drop-target
//! resolution, user callbacks, snap-back/snap-to transitions, and per-document
//! state isolation. It owns no elements, no scene graph, and no clock: the
//! host reaches it through two narrow traits ([`GeometryPort`], [`ScenePort`])
//! and millisecond timestamps, which keeps the whole engine deterministic and
//! testable without a UI.
//!
//! ## Event flow
//!
//! 1. The host delivers a [`GestureEvent`] to [`DragController::handle`].
//! 2. On `Start` the engine snapshots live geometry as the session baseline
//!    and optionally raises the element's stacking order.
//! 3. On `Move` it computes baseline + pointer delta, routes the proposal
//!    through the constraint resolver, writes the result, and reports
//!    progress.
//! 4. On `End`/`Cancel` it resolves the best-overlap drop target, invokes
//!    `on_drop` with the target attached, and debounces session cleanup so
//!    chained logic can still read the session for a short grace window.
//!
//! Deferred work (cleanup, auto-snap) becomes due on the host's clock and runs
//! when the host calls [`DragController::run_due`], typically once per event
//! loop turn.
//!
//! ## Minimal example
//!
//! ```
//! use std::collections::{HashMap, HashSet};
//! use kurbo::Point;
//! use liana_gesture::{
//!     ConstraintSpec, ConstraintTarget, DragController, Easing, GeometryPort, GeometryProp,
//!     GestureEvent, GesturePhase, ScenePort,
//! };
//!
//! // A toy host: elements are `u32` keys, geometry lives in a map.
//! #[derive(Default)]
//! struct Host {
//!     geometry: HashMap<(u32, GeometryProp), f64>,
//!     ids: HashMap<u32, String>,
//!     targets: Vec<u32>,
//!     locked: HashSet<u32>,
//! }
//!
//! impl GeometryPort<u32> for Host {
//!     fn get(&self, e: u32, p: GeometryProp) -> f64 {
//!         self.geometry.get(&(e, p)).copied().unwrap_or(0.0)
//!     }
//!     fn set(&mut self, e: u32, p: GeometryProp, v: f64) {
//!         self.geometry.insert((e, p), v);
//!     }
//!     fn animate(&mut self, e: u32, p: GeometryProp, v: f64, _dur: f64, _easing: Easing) {
//!         self.set(e, p, v); // a real host would tween
//!     }
//! }
//!
//! impl ScenePort<u32> for Host {
//!     fn drag_id(&self, e: u32) -> Option<String> {
//!         self.ids.get(&e).cloned()
//!     }
//!     fn element_for_id(&self, id: &str) -> Option<u32> {
//!         self.ids.iter().find(|(_, v)| v.as_str() == id).map(|(k, _)| *k)
//!     }
//!     fn draggables(&self, _scope: Option<u32>) -> Vec<u32> {
//!         self.ids.keys().copied().collect()
//!     }
//!     fn drop_targets(&self) -> Vec<u32> {
//!         self.targets.clone()
//!     }
//!     fn resolve_region(&self, _selector: &str) -> Option<u32> {
//!         None
//!     }
//!     fn container_of(&self, _e: u32) -> Option<u32> {
//!         None
//!     }
//!     fn scene_root(&self) -> u32 {
//!         0
//!     }
//!     fn attribute(&self, _e: u32, _name: &str) -> Option<String> {
//!         None
//!     }
//!     fn set_locked(&mut self, e: u32, locked: bool) {
//!         if locked {
//!             self.locked.insert(e);
//!         } else {
//!             self.locked.remove(&e);
//!         }
//!     }
//!     fn is_locked(&self, e: u32) -> bool {
//!         self.locked.contains(&e)
//!     }
//! }
//!
//! // Element 1 is a 50x50 "card" at (100, 100).
//! let mut host = Host::default();
//! host.ids.insert(1, "card".into());
//! host.set(1, GeometryProp::Left, 100.0);
//! host.set(1, GeometryProp::Top, 100.0);
//! host.set(1, GeometryProp::Width, 50.0);
//! host.set(1, GeometryProp::Height, 50.0);
//!
//! // One controller, documents keyed by u32; this host is document 0.
//! let mut drag: DragController<u32, u32> = DragController::new();
//! drag.set_constraints(
//!     &mut host,
//!     0,
//!     ConstraintTarget::Id("card".into()),
//!     ConstraintSpec { min_x: Some(50.0), max_x: Some(500.0), ..ConstraintSpec::default() },
//!     0,
//! );
//!
//! // Drag far to the right: the boundary clamp holds the element at 500.
//! drag.handle(&mut host, 0, 1,
//!     &GestureEvent::new(GesturePhase::Start, Point::new(110.0, 110.0), 1_000));
//! drag.handle(&mut host, 0, 1,
//!     &GestureEvent::new(GesturePhase::Move, Point::new(710.0, 110.0), 1_016));
//! assert_eq!(host.get(1, GeometryProp::Left), 500.0);
//!
//! drag.handle(&mut host, 0, 1,
//!     &GestureEvent::new(GesturePhase::End, Point::new(710.0, 110.0), 1_032));
//!
//! // The session survives briefly for post-drop readers, then expires.
//! assert!(drag.document(&0).unwrap().session("card").is_some());
//! drag.run_due(&mut host, 0, 1_100);
//! assert!(drag.document(&0).unwrap().session("card").is_none());
//! ```
//!
//! ## Callbacks
//!
//! Per-identifier callbacks are registered with
//! [`DragController::set_interaction_map`]; see [`InteractionHandlers`]. The
//! `on_drop` event carries the resolved drop target, and each record's
//! [`HandlerContext`] payload is passed to every callback so user data
//! registered next to the callbacks is reachable from inside them.
//!
//! ## Scope
//!
//! The engine deliberately excludes physics/inertia, multi-pointer gestures,
//! rendering, and persistence. Constraint math lives in `liana_constraint`,
//! drop-target scoring in `liana_overlap`, and session/registry state in
//! `liana_session`; this crate wires them to a host.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
pub mod decl;
mod engine;
mod event;
mod handlers;
mod port;

pub use config::DragConfig;
pub use engine::{ConstraintTarget, DragController, InteractionMap, SnapDestination};
pub use event::{GestureEvent, GesturePhase};
pub use handlers::{
    CallbackSlot, GestureCallback, HandlerContext, InteractionHandlers, dispatch,
};
pub use port::{Easing, GeometryPort, GeometryProp, ScenePort};

// Constraint vocabulary, re-exported so embedders rarely need the leaf crate.
pub use liana_constraint::{Axis, Containment, ConstraintSpec};

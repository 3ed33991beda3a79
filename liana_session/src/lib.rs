// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=liana_session --heading-base-level=0

//! Liana Session: drag session state, per-document registries, and deferred
//! tasks.
//!
//! A drag engine has to remember, per dragged element, where the element and
//! the pointer started; it has to keep that bookkeeping isolated between
//! independently loaded documents; and it has to defer a little work (session
//! cleanup, auto-snap) without owning a clock. This crate provides exactly
//! that state, and nothing else: no gesture interpretation, no geometry, no
//! callbacks.
//!
//! - [`DragSession`]: one in-flight (or just-ended) drag: baseline geometry,
//!   pointer origin, the `active` flag, and an epoch stamp.
//! - [`DocumentRegistry`]: everything one document owns: sessions, constraint
//!   specs, handler records, the stacking counter, and pending deferred tasks.
//!   Generic over the handler record type, so callback shapes live upstream.
//! - [`SessionRegistry`]: a map from document identity to [`DocumentRegistry`],
//!   created lazily per document. Explicitly owned by the embedder and passed
//!   around, never a hidden process-wide singleton.
//! - [`TaskQueue`] and [`Task`]: a host-agnostic deadline queue. The caller
//!   supplies `now` in milliseconds; the queue never reads a clock.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use liana_session::{SessionRegistry, Task};
//!
//! // Document identities and element keys are application-defined.
//! let mut registry: SessionRegistry<u32, u64, ()> = SessionRegistry::new();
//! let doc = registry.get_or_create(7);
//!
//! // A drag starts: snapshot the baseline.
//! let epoch = doc.begin_session("card", Point::new(100.0, 100.0), 3.0, Point::new(104.0, 110.0));
//! assert!(doc.has_active_session("card"));
//!
//! // The drag ends: mark inactive, defer the removal.
//! doc.session_mut("card").unwrap().active = false;
//! doc.schedule_task(1040, Task::CleanupSession { id: "card".into(), epoch });
//!
//! // The grace window lets late readers still observe the session...
//! assert!(doc.session("card").is_some());
//!
//! // ...until the host's clock passes the deadline.
//! for task in doc.take_due_tasks(1050) {
//!     if let Task::CleanupSession { id, epoch } = task {
//!         doc.expire_session(&id, epoch);
//!     }
//! }
//! assert!(doc.session("card").is_none());
//! ```
//!
//! ## Epochs
//!
//! Cleanup is deferred so that callback logic running right after a drop can
//! still read the session. If a *new* drag on the same identifier starts
//! before the deferred cleanup fires, the stale cleanup must not delete the
//! fresh session. Every [`DocumentRegistry::begin_session`] stamps the session
//! with a new epoch, and [`DocumentRegistry::expire_session`] only removes a
//! session whose epoch still matches and which is inactive. Stale cleanups
//! fall through as no-ops; no task cancellation is needed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod queue;
mod registry;
mod session;

pub use queue::{Task, TaskQueue};
pub use registry::{DocumentRegistry, SessionRegistry, STACK_BASE};
pub use session::DragSession;

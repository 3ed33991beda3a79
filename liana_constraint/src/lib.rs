// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=liana_constraint --heading-base-level=0

//! Liana Constraint: pure geometric constraint resolution for drag interactions.
//!
//! This crate turns a raw proposed drag position into a constrained one. It is
//! the headless half of a drag engine: given the position a pointer delta would
//! produce, a [`ConstraintSpec`], and a pre-resolved containment rectangle, it
//! returns the position that actually satisfies the spec. It performs no
//! geometry reads or writes and knows nothing about scenes, elements, or
//! pointers.
//!
//! ## Resolution stages
//!
//! [`resolve`] applies three stages in a fixed order. The order is not
//! configurable: later stages must see the already-clamped output of earlier
//! ones.
//!
//! 1. **Boundary clamp**: each of `min_x` / `max_x` / `min_y` / `max_y`
//!    applies independently; unset bounds impose no limit.
//! 2. **Axis lock**: with [`Axis::X`] the top coordinate is re-pinned to the
//!    axis-lock baseline; with [`Axis::Y`], the left coordinate.
//! 3. **Containment clamp**: the coordinates are clamped into a rectangle of
//!    valid top-left positions. Callers resolve [`Containment`] against their
//!    scene first (see [`containment_bounds`]) and pass the result in; `None`
//!    skips the stage, leaving the earlier stages' output in effect.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use liana_constraint::{resolve, Axis, ConstraintSpec};
//!
//! let spec = ConstraintSpec {
//!     min_x: Some(50.0),
//!     max_x: Some(500.0),
//!     axis: Some(Axis::X),
//!     ..ConstraintSpec::default()
//! };
//!
//! // The pointer proposes (600, 240); the element started the drag at
//! // (100, 100). Horizontal movement clamps to 500, vertical is pinned.
//! let resolved = resolve(
//!     Point::new(600.0, 240.0),
//!     &spec,
//!     Point::new(100.0, 100.0),
//!     None,
//! );
//! assert_eq!(resolved, Point::new(500.0, 100.0));
//! ```
//!
//! ## Containment
//!
//! A `within` constraint limits the element to a container or region. The
//! valid positions for the element's top-left corner form a rectangle computed
//! by [`containment_bounds`] from the container's origin and the two sizes:
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use liana_constraint::{containment_bounds, resolve, ConstraintSpec};
//!
//! // A 50x50 element inside a 400x300 container whose origin is (0, 0)
//! // (parent-relative coordinates).
//! let bounds = containment_bounds(
//!     Point::ZERO,
//!     Size::new(400.0, 300.0),
//!     Size::new(50.0, 50.0),
//! );
//! assert_eq!(bounds, Rect::new(0.0, 0.0, 350.0, 250.0));
//!
//! let spec = ConstraintSpec {
//!     within: Some(liana_constraint::Containment::Parent),
//!     ..ConstraintSpec::default()
//! };
//! let resolved = resolve(Point::new(390.0, -20.0), &spec, Point::ZERO, Some(bounds));
//! assert_eq!(resolved, Point::new(350.0, 0.0));
//! ```
//!
//! Determinism: identical inputs always produce identical outputs. The
//! resolver is a pure function with no side effects, so a caller can maintain
//! constraint satisfaction transactionally by routing every position write
//! through it.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod resolve;
mod spec;

pub use resolve::{containment_bounds, resolve};
pub use spec::{Axis, Containment, ConstraintSpec};

// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint specification types.

use alloc::string::String;

/// The axis a drag is restricted to.
///
/// Restricting to an axis does not merely ignore orthogonal pointer movement;
/// the orthogonal coordinate is actively re-pinned to the axis-lock baseline
/// on every resolution, so an element can never creep off its rail.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal movement only; the top coordinate is pinned.
    X,
    /// Vertical movement only; the left coordinate is pinned.
    Y,
}

/// A containment descriptor limiting where an element may be placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Containment {
    /// The nearest enclosing logical container, falling back to the scene
    /// root. Bounds are expressed relative to the container's own origin.
    Parent,
    /// An arbitrary region named by a selector, resolved against the active
    /// scene. Bounds are expressed in the scene's absolute coordinate space.
    Region(String),
}

/// The full constraint specification for one draggable element.
///
/// All fields are optional; an empty spec constrains nothing. Specs are
/// stored per drag identifier and persist until replaced or the owning
/// registry entry is cleared.
///
/// # Example
///
/// ```
/// use liana_constraint::{Axis, ConstraintSpec};
///
/// let spec = ConstraintSpec {
///     min_y: Some(0.0),
///     max_y: Some(480.0),
///     axis: Some(Axis::Y),
///     ..ConstraintSpec::default()
/// };
/// assert!(!spec.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstraintSpec {
    /// Smallest permitted left coordinate.
    pub min_x: Option<f64>,
    /// Largest permitted left coordinate.
    pub max_x: Option<f64>,
    /// Smallest permitted top coordinate.
    pub min_y: Option<f64>,
    /// Largest permitted top coordinate.
    pub max_y: Option<f64>,
    /// Restrict movement to a single axis.
    pub axis: Option<Axis>,
    /// Keep the element inside a container or region.
    pub within: Option<Containment>,
    /// Per-element auto-snap override. `None` defers to the engine's global
    /// auto-snap default.
    pub auto_snap: Option<bool>,
}

impl ConstraintSpec {
    /// An empty specification constraining nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_x: None,
            max_x: None,
            min_y: None,
            max_y: None,
            axis: None,
            within: None,
            auto_snap: None,
        }
    }

    /// Returns `true` if no field of the specification is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x.is_none()
            && self.max_x.is_none()
            && self.min_y.is_none()
            && self.max_y.is_none()
            && self.axis.is_none()
            && self.within.is_none()
            && self.auto_snap.is_none()
    }
}

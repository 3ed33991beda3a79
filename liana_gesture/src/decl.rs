// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative constraint attributes.
//!
//! Hosts can declare constraints on elements with plain string attributes
//! instead of calling `set_constraints`. The engine reads them through
//! [`ScenePort::attribute`] when a scene is about to display; how the host
//! stores them (DOM attributes, a key-value sidecar, anything) is its own
//! business.
//!
//! Malformed values degrade field-wise: a bad number or axis token is warned
//! about and skipped, the rest of the attributes still apply.

use alloc::string::String;

use liana_constraint::{Axis, Containment, ConstraintSpec};

use crate::port::ScenePort;

/// Attribute naming an element's drag identifier.
pub const ATTR_DRAG_ID: &str = "data-drag-id";
/// Attribute marking an element as a drop target (any value).
pub const ATTR_DROP_TARGET: &str = "data-drop-target";
/// Smallest permitted left coordinate.
pub const ATTR_MIN_X: &str = "data-drag-min-x";
/// Largest permitted left coordinate.
pub const ATTR_MAX_X: &str = "data-drag-max-x";
/// Smallest permitted top coordinate.
pub const ATTR_MIN_Y: &str = "data-drag-min-y";
/// Largest permitted top coordinate.
pub const ATTR_MAX_Y: &str = "data-drag-max-y";
/// Axis restriction: `x` or `y`.
pub const ATTR_AXIS: &str = "data-drag-axis";
/// Containment: `parent` or a region selector.
pub const ATTR_WITHIN: &str = "data-drag-within";
/// Per-element auto-snap override: `true` or `false`.
pub const ATTR_AUTO_SNAP: &str = "data-drag-auto-snap";

/// Assembles a [`ConstraintSpec`] from the declarative attributes on
/// `element`.
///
/// Elements with no constraint attributes yield an empty spec; callers
/// usually skip storing those (see [`ConstraintSpec::is_empty`]).
pub fn spec_from_attributes<E, S>(scene: &S, element: E) -> ConstraintSpec
where
    E: Copy,
    S: ScenePort<E> + ?Sized,
{
    let mut spec = ConstraintSpec::new();

    spec.min_x = numeric_attribute(scene, element, ATTR_MIN_X);
    spec.max_x = numeric_attribute(scene, element, ATTR_MAX_X);
    spec.min_y = numeric_attribute(scene, element, ATTR_MIN_Y);
    spec.max_y = numeric_attribute(scene, element, ATTR_MAX_Y);

    if let Some(value) = scene.attribute(element, ATTR_AXIS) {
        spec.axis = parse_axis(&value);
    }

    if let Some(value) = scene.attribute(element, ATTR_WITHIN) {
        spec.within = Some(parse_within(value));
    }

    if let Some(value) = scene.attribute(element, ATTR_AUTO_SNAP) {
        spec.auto_snap = parse_bool(&value);
    }

    spec
}

fn numeric_attribute<E, S>(scene: &S, element: E, name: &str) -> Option<f64>
where
    E: Copy,
    S: ScenePort<E> + ?Sized,
{
    let value = scene.attribute(element, name)?;
    match value.trim().parse::<f64>() {
        Ok(number) => Some(number),
        Err(_) => {
            log::warn!("ignoring non-numeric {name}={value:?}");
            None
        }
    }
}

fn parse_axis(value: &str) -> Option<Axis> {
    match value.trim() {
        "x" | "X" => Some(Axis::X),
        "y" | "Y" => Some(Axis::Y),
        other => {
            log::warn!("ignoring unrecognized {ATTR_AXIS}={other:?}");
            None
        }
    }
}

fn parse_within(value: String) -> Containment {
    if value.trim() == "parent" {
        Containment::Parent
    } else {
        Containment::Region(value)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" => Some(true),
        "false" => Some(false),
        other => {
            log::warn!("ignoring unrecognized {ATTR_AUTO_SNAP}={other:?}");
            None
        }
    }
}

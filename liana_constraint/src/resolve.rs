// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The constraint resolver: proposed position in, constrained position out.

use kurbo::{Point, Rect, Size};

use crate::spec::{Axis, ConstraintSpec};

/// Resolves a proposed position against a constraint specification.
///
/// The stages run in a fixed order (boundary clamp, then axis lock, then
/// containment clamp) so each stage sees the already-clamped output of the
/// one before it.
///
/// - `proposed` is the position the raw pointer delta would produce.
/// - `axis_baseline` supplies the coordinate an axis-locked dimension is
///   pinned to: during a drag this is the session's baseline position; for an
///   auto-snap it is the element's current position.
/// - `containment` is the pre-resolved rectangle of valid top-left positions
///   for the element (see [`containment_bounds`]), or `None` when the spec has
///   no `within` constraint or its selector did not resolve. A `None` skips
///   only the containment stage.
///
/// This function is pure: it never touches element geometry itself.
#[must_use]
pub fn resolve(
    proposed: Point,
    spec: &ConstraintSpec,
    axis_baseline: Point,
    containment: Option<Rect>,
) -> Point {
    let mut x = proposed.x;
    let mut y = proposed.y;

    // Stage 1: absolute boundary clamp. Each bound applies independently.
    if let Some(min_x) = spec.min_x {
        x = x.max(min_x);
    }
    if let Some(max_x) = spec.max_x {
        x = x.min(max_x);
    }
    if let Some(min_y) = spec.min_y {
        y = y.max(min_y);
    }
    if let Some(max_y) = spec.max_y {
        y = y.min(max_y);
    }

    // Stage 2: axis lock re-pins the orthogonal coordinate.
    match spec.axis {
        Some(Axis::X) => y = axis_baseline.y,
        Some(Axis::Y) => x = axis_baseline.x,
        None => {}
    }

    // Stage 3: containment clamp into the pre-resolved bound.
    if let Some(bounds) = containment {
        x = clamp_span(x, bounds.x0, bounds.x1);
        y = clamp_span(y, bounds.y0, bounds.y1);
    }

    Point::new(x, y)
}

/// Computes the rectangle of valid top-left positions for an element inside a
/// container.
///
/// `origin` is the coordinate the bounds are expressed in: `(0, 0)` for
/// parent containment (positions relative to the container's own origin), or
/// the region's absolute top-left for region containment.
///
/// When the element is larger than the container along an axis, the span for
/// that axis collapses to the container's origin edge, which keeps the
/// subsequent clamp well-defined.
#[must_use]
pub fn containment_bounds(origin: Point, container: Size, element: Size) -> Rect {
    let x1 = origin.x + (container.width - element.width).max(0.0);
    let y1 = origin.y + (container.height - element.height).max(0.0);
    Rect::new(origin.x, origin.y, x1, y1)
}

/// Clamps `value` into `[lo, hi]`, collapsing to `lo` if the span is inverted.
fn clamp_span(value: f64, lo: f64, hi: f64) -> f64 {
    if hi < lo { lo } else { value.clamp(lo, hi) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Containment;
    use alloc::string::ToString;

    fn spec() -> ConstraintSpec {
        ConstraintSpec::new()
    }

    #[test]
    fn empty_spec_passes_position_through() {
        let resolved = resolve(Point::new(12.5, -3.0), &spec(), Point::ZERO, None);
        assert_eq!(resolved, Point::new(12.5, -3.0));
    }

    #[test]
    fn boundary_clamps_each_bound_independently() {
        let s = ConstraintSpec {
            min_x: Some(50.0),
            max_x: Some(500.0),
            ..spec()
        };

        // Proposed left of 600 clamps to 500; top is unconstrained.
        let resolved = resolve(Point::new(600.0, 900.0), &s, Point::ZERO, None);
        assert_eq!(resolved, Point::new(500.0, 900.0));

        // Proposed left of 10 clamps to 50.
        let resolved = resolve(Point::new(10.0, -40.0), &s, Point::ZERO, None);
        assert_eq!(resolved, Point::new(50.0, -40.0));
    }

    #[test]
    fn unset_bounds_impose_no_limit() {
        let s = ConstraintSpec {
            max_y: Some(100.0),
            ..spec()
        };
        let resolved = resolve(Point::new(1e6, -1e6), &s, Point::ZERO, None);
        assert_eq!(resolved, Point::new(1e6, -1e6));
    }

    #[test]
    fn axis_x_pins_top_to_baseline() {
        let s = ConstraintSpec {
            axis: Some(Axis::X),
            ..spec()
        };
        let baseline = Point::new(100.0, 100.0);

        for dy in [-250.0, 0.0, 42.0, 9999.0] {
            let resolved = resolve(Point::new(180.0, 100.0 + dy), &s, baseline, None);
            assert_eq!(resolved, Point::new(180.0, 100.0));
        }
    }

    #[test]
    fn axis_y_pins_left_to_baseline() {
        let s = ConstraintSpec {
            axis: Some(Axis::Y),
            ..spec()
        };
        let baseline = Point::new(100.0, 20.0);

        for dx in [-1.0, 370.0] {
            let resolved = resolve(Point::new(100.0 + dx, 77.0), &s, baseline, None);
            assert_eq!(resolved, Point::new(100.0, 77.0));
        }
    }

    #[test]
    fn axis_lock_sees_boundary_clamped_values() {
        // Boundary clamp runs first; the axis stage then pins the orthogonal
        // coordinate regardless of what stage 1 produced for it.
        let s = ConstraintSpec {
            max_x: Some(300.0),
            min_y: Some(0.0),
            axis: Some(Axis::X),
            ..spec()
        };
        let resolved = resolve(Point::new(450.0, -80.0), &s, Point::new(10.0, 60.0), None);
        assert_eq!(resolved, Point::new(300.0, 60.0));
    }

    #[test]
    fn containment_clamps_into_bounds() {
        let s = ConstraintSpec {
            within: Some(Containment::Parent),
            ..spec()
        };
        let bounds = containment_bounds(Point::ZERO, Size::new(400.0, 300.0), Size::new(50.0, 50.0));

        let resolved = resolve(Point::new(390.0, 270.0), &s, Point::ZERO, Some(bounds));
        assert_eq!(resolved, Point::new(350.0, 250.0));

        let resolved = resolve(Point::new(-5.0, 10.0), &s, Point::ZERO, Some(bounds));
        assert_eq!(resolved, Point::new(0.0, 10.0));
    }

    #[test]
    fn missing_containment_skips_only_that_stage() {
        // An unresolved region leaves the boundary clamp in effect.
        let s = ConstraintSpec {
            max_x: Some(120.0),
            within: Some(Containment::Region("#nowhere".to_string())),
            ..spec()
        };
        let resolved = resolve(Point::new(300.0, 40.0), &s, Point::ZERO, None);
        assert_eq!(resolved, Point::new(120.0, 40.0));
    }

    #[test]
    fn region_bounds_are_absolute() {
        // A 20x20 element inside a region at (200, 100) sized 80x60.
        let bounds = containment_bounds(
            Point::new(200.0, 100.0),
            Size::new(80.0, 60.0),
            Size::new(20.0, 20.0),
        );
        assert_eq!(bounds, Rect::new(200.0, 100.0, 260.0, 140.0));
    }

    #[test]
    fn oversized_element_collapses_to_origin_edge() {
        let bounds = containment_bounds(
            Point::new(30.0, 40.0),
            Size::new(50.0, 50.0),
            Size::new(120.0, 20.0),
        );
        // Horizontal span collapses to the container's left edge.
        assert_eq!(bounds.x0, 30.0);
        assert_eq!(bounds.x1, 30.0);
        assert_eq!(bounds.y1, 70.0);

        let s = ConstraintSpec {
            within: Some(Containment::Parent),
            ..spec()
        };
        let resolved = resolve(Point::new(500.0, 45.0), &s, Point::ZERO, Some(bounds));
        assert_eq!(resolved, Point::new(30.0, 45.0));
    }

    #[test]
    fn stages_compose_in_order() {
        // Boundary pushes left to 500, axis pins top to 100, containment then
        // pulls left back into the region.
        let s = ConstraintSpec {
            min_x: Some(50.0),
            max_x: Some(500.0),
            axis: Some(Axis::X),
            within: Some(Containment::Region("#rail".to_string())),
            ..spec()
        };
        let bounds = containment_bounds(
            Point::new(80.0, 0.0),
            Size::new(300.0, 400.0),
            Size::new(40.0, 40.0),
        );
        let resolved = resolve(
            Point::new(620.0, 340.0),
            &s,
            Point::new(100.0, 100.0),
            Some(bounds),
        );
        assert_eq!(resolved, Point::new(340.0, 100.0));
    }

    #[test]
    fn resolver_is_deterministic() {
        let s = ConstraintSpec {
            min_x: Some(0.0),
            max_x: Some(640.0),
            min_y: Some(0.0),
            max_y: Some(480.0),
            ..spec()
        };
        let a = resolve(Point::new(700.0, -3.0), &s, Point::ZERO, None);
        let b = resolve(Point::new(700.0, -3.0), &s, Point::ZERO, None);
        assert_eq!(a, b);
    }
}

// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=liana_overlap --heading-base-level=0

//! Liana Overlap: overlap-area drop-target resolution.
//!
//! When a dragged element is released, the engine has to decide which drop
//! target, if any, received it. This crate answers that with a single rule:
//! the candidate sharing the largest overlap area with the dragged element's
//! axis-aligned box wins.
//!
//! - Candidates that do not intersect the dragged box are not considered.
//! - A candidate replaces the running best only with a **strictly** larger
//!   area, so equal-area ties keep the first candidate in enumeration order.
//! - With no intersecting candidate at all, the result is `None`.
//!
//! Callers supply the candidate set (and are expected to exclude the dragged
//! element itself); this crate does not know about scenes or target markers.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Rect;
//! use liana_overlap::best_target;
//!
//! let dragged = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let candidates = [
//!     ("a", Rect::new(50.0, 50.0, 150.0, 150.0)), // overlap area 2500
//!     ("b", Rect::new(90.0, 90.0, 110.0, 110.0)), // overlap area 100
//!     ("c", Rect::new(400.0, 400.0, 500.0, 500.0)), // no overlap
//! ];
//!
//! assert_eq!(best_target(dragged, candidates), Some("a"));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::Rect;

/// Returns the intersection area of two axis-aligned rectangles.
///
/// Non-intersecting rectangles yield `0.0`; negative extents never leak into
/// the result.
#[must_use]
pub fn overlap_area(a: Rect, b: Rect) -> f64 {
    let w = a.x1.min(b.x1) - a.x0.max(b.x0);
    let h = a.y1.min(b.y1) - a.y0.max(b.y0);
    w.max(0.0) * h.max(0.0)
}

/// Returns the candidate with the largest overlap against `dragged`.
///
/// Candidates are tested in enumeration order. Only a strictly larger overlap
/// area replaces the running best, so ties keep the earliest candidate.
/// Returns `None` when no candidate intersects the dragged box.
#[must_use]
pub fn best_target<E, I>(dragged: Rect, candidates: I) -> Option<E>
where
    I: IntoIterator<Item = (E, Rect)>,
{
    let mut best: Option<(E, f64)> = None;
    for (candidate, rect) in candidates {
        let area = overlap_area(dragged, rect);
        if area <= 0.0 {
            continue;
        }
        match &best {
            Some((_, best_area)) if area <= *best_area => {}
            _ => best = Some((candidate, area)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

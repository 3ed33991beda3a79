// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use crate::port::Easing;

/// Global drag-engine options.
///
/// A controller starts from [`DragConfig::default`]; embedders override the
/// fields they care about. Options apply to all documents a controller
/// manages.
///
/// # Example
///
/// ```
/// use liana_gesture::{DragConfig, Easing};
///
/// let config = DragConfig {
///     snap_back_duration: 0.2,
///     snap_back_timing: Easing::EaseOut,
///     ..DragConfig::default()
/// };
/// assert!(config.bring_to_front);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DragConfig {
    /// Raise an element above everything previously raised when its drag
    /// starts, by assigning it the next stacking-counter value.
    pub bring_to_front: bool,
    /// Duration, in seconds, of the `snap_back` animation.
    pub snap_back_duration: f64,
    /// Easing of the `snap_back` animation.
    pub snap_back_timing: Easing,
    /// Duration, in seconds, of the `snap_to` animation.
    pub snap_to_duration: f64,
    /// Easing of the `snap_to` animation.
    pub snap_to_timing: Easing,
    /// Perform a full state reset when the host reports a scene unload.
    pub reset_on_scene_unload: bool,
    /// Global default for whether declaratively loaded constraints auto-snap
    /// their element into compliance; a spec's own `auto_snap` field
    /// overrides this per element.
    pub auto_snap: bool,
    /// Grace delay, in milliseconds, between a drag ending and its session
    /// being removed. The window lets callback logic running right after the
    /// drop still read session data.
    pub cleanup_delay_ms: u64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            bring_to_front: true,
            snap_back_duration: 0.35,
            snap_back_timing: Easing::Ease,
            snap_to_duration: 0.35,
            snap_to_timing: Easing::Ease,
            reset_on_scene_unload: false,
            auto_snap: false,
            cleanup_delay_ms: 40,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DragConfig::default();
        assert!(config.bring_to_front);
        assert!(!config.reset_on_scene_unload);
        assert!(!config.auto_snap);
        assert_eq!(config.snap_back_timing, Easing::Ease);
        assert_eq!(config.cleanup_delay_ms, 40);
    }
}

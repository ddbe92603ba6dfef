//! Smooth scrolling for the catalog list
//!
//! - `curve` - easing functions and time helpers
//! - `animation` - animator driving the list offset
//!
//! Offsets are in layout units, not terminal rows.

pub mod animation;
pub mod curve;

use std::time::Duration;

pub use animation::ScrollAnimator;
pub use curve::{EasingType, EasingTypeExt};
pub use stickytabs_core::ScrollConfig;

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    fn animation_duration(&self) -> Duration;

    /// Frame interval while an animation runs
    fn animation_tick_duration(&self) -> Duration;

    /// Check if smooth scrolling is effectively enabled
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let config = ScrollConfig::default();
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(16));

        let zero = ScrollConfig {
            animation_fps: 0,
            ..Default::default()
        };
        assert_eq!(zero.animation_tick_duration(), Duration::from_millis(16));
    }

    #[test]
    fn test_is_smooth() {
        let mut config = ScrollConfig::default();
        assert!(config.is_smooth());

        config.animation_duration_ms = 0;
        assert!(!config.is_smooth());
    }
}

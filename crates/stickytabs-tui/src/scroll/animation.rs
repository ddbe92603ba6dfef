//! Eased scroll animation over list offsets, in layout units.

use std::time::{Duration, Instant};

use super::curve::{lerp, progress_at, EasingType, EasingTypeExt};
use super::{ScrollConfig, ScrollConfigExt};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Drives the list offset toward a target.
///
/// `scroll_to_at` starts an animation, `update_at` advances it. User scrolls
/// go through `scroll_by`, which cancels any animation and moves at once.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current: f64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0.0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Final position of the running animation, or the current offset
    pub fn target(&self) -> f64 {
        self.animation.as_ref().map(|a| a.to).unwrap_or(self.current)
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Jump without animating
    pub fn set(&mut self, offset: f64, max: f64) {
        self.animation = None;
        self.current = clamp_offset(offset, max);
    }

    pub fn cancel(&mut self) {
        self.animation = None;
    }

    pub fn scroll_to(&mut self, target: f64, max: f64) {
        self.scroll_to_at(target, max, Instant::now());
    }

    /// Start animating toward `target`. A running animation is replaced and
    /// the new one starts from the current offset.
    pub fn scroll_to_at(&mut self, target: f64, max: f64, now: Instant) {
        let target = clamp_offset(target, max);

        if !self.config.is_smooth() || (self.current - target).abs() < f64::EPSILON {
            self.current = target;
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Move by `delta` immediately; cancels a running animation
    pub fn scroll_by(&mut self, delta: f64, max: f64) {
        self.set(self.current + delta, max);
    }

    pub fn update(&mut self, max: f64) -> f64 {
        self.update_at(max, Instant::now())
    }

    /// Advance the animation to `now` and return the offset to display.
    /// `max` may have shrunk since the animation started.
    pub fn update_at(&mut self, max: f64, now: Instant) -> f64 {
        if let Some(anim) = &self.animation {
            let t = progress_at(anim.start, anim.duration, now);
            self.current = lerp(anim.from, anim.to, anim.easing.apply(t));
            if t >= 1.0 {
                self.current = anim.to;
                self.animation = None;
            }
        }
        self.current = clamp_offset(self.current, max);
        self.current
    }
}

fn clamp_offset(offset: f64, max: f64) -> f64 {
    if offset.is_nan() {
        return 0.0;
    }
    offset.clamp(0.0, max.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator() -> ScrollAnimator {
        ScrollAnimator::new(ScrollConfig {
            animation_duration_ms: 100,
            easing: EasingType::Linear,
            ..Default::default()
        })
    }

    #[test]
    fn test_animates_to_target() {
        let mut a = animator();
        let t0 = Instant::now();
        a.scroll_to_at(400.0, 1000.0, t0);
        assert!(a.is_animating());
        assert_eq!(a.target(), 400.0);

        assert_eq!(a.update_at(1000.0, t0 + Duration::from_millis(50)), 200.0);
        assert_eq!(a.update_at(1000.0, t0 + Duration::from_millis(150)), 400.0);
        assert!(!a.is_animating());
    }

    #[test]
    fn test_target_is_clamped() {
        let mut a = animator();
        a.scroll_to_at(5000.0, 800.0, Instant::now());
        assert_eq!(a.target(), 800.0);
        a.scroll_to_at(-20.0, 800.0, Instant::now());
        assert_eq!(a.target(), 0.0);
    }

    #[test]
    fn test_instant_when_smooth_disabled() {
        let mut a = ScrollAnimator::new(ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        });
        a.scroll_to(300.0, 1000.0);
        assert!(!a.is_animating());
        assert_eq!(a.current(), 300.0);
    }

    #[test]
    fn test_scroll_by_cancels_animation() {
        let mut a = animator();
        let t0 = Instant::now();
        a.scroll_to_at(400.0, 1000.0, t0);
        a.update_at(1000.0, t0 + Duration::from_millis(50));
        a.scroll_by(16.0, 1000.0);
        assert!(!a.is_animating());
        assert_eq!(a.current(), 216.0);
    }

    #[test]
    fn test_update_respects_shrunk_max() {
        let mut a = animator();
        a.set(900.0, 1000.0);
        assert_eq!(a.update_at(500.0, Instant::now()), 500.0);
    }
}

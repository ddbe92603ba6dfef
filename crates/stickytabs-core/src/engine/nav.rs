//! Crossfade of the overlay navigation bar.
//!
//! The nav starts translucent over the header image (light icons) and becomes
//! solid over the page background (dark icons) as the user scrolls.

use serde::Serialize;

/// Fraction of the way to a fully solid nav bar, in `[0, 1]`
pub fn nav_progress(scroll_offset: f64, appear_threshold: f64) -> f64 {
    if scroll_offset <= 0.0 || scroll_offset.is_nan() {
        return 0.0;
    }
    if !appear_threshold.is_finite() || appear_threshold <= 0.0 {
        return 1.0;
    }
    (scroll_offset / appear_threshold).clamp(0.0, 1.0)
}

/// Which icon layer receives input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavLayer {
    /// Light icons over the header image
    Light,
    /// Dark icons over the solid background
    Dark,
}

/// Presentation values derived from nav progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NavOverlay {
    pub progress: f64,
    pub underlay_opacity: f64,
    pub light_opacity: f64,
    pub dark_opacity: f64,
    pub touch_layer: NavLayer,
}

impl NavOverlay {
    pub fn from_progress(progress: f64) -> Self {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        Self {
            progress,
            underlay_opacity: progress,
            light_opacity: 1.0 - progress,
            dark_opacity: progress,
            touch_layer: if progress >= 1.0 {
                NavLayer::Dark
            } else {
                NavLayer::Light
            },
        }
    }

    pub fn at_offset(scroll_offset: f64, appear_threshold: f64) -> Self {
        Self::from_progress(nav_progress(scroll_offset, appear_threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_threshold() {
        assert_eq!(nav_progress(12.0, 24.0), 0.5);
        assert_eq!(nav_progress(48.0, 24.0), 1.0);
        assert_eq!(nav_progress(0.0, 24.0), 0.0);
    }

    #[test]
    fn test_monotone_and_saturating() {
        let mut prev = 0.0;
        for i in 0..=300 {
            let p = nav_progress(i as f64, 124.0);
            assert!(p >= prev, "not monotone at {}", i);
            if i >= 124 {
                assert_eq!(p, 1.0);
            }
            prev = p;
        }
    }

    #[test]
    fn test_degenerate_threshold() {
        assert_eq!(nav_progress(5.0, 0.0), 1.0);
        assert_eq!(nav_progress(0.0, 0.0), 0.0);
        assert_eq!(nav_progress(-3.0, 24.0), 0.0);
    }

    #[test]
    fn test_non_finite_threshold_is_solid() {
        assert_eq!(nav_progress(5.0, f64::NAN), 1.0);
        assert_eq!(nav_progress(5.0, f64::INFINITY), 1.0);
        assert_eq!(nav_progress(0.0, f64::NAN), 0.0);

        let overlay = NavOverlay::at_offset(30.0, f64::NAN);
        assert_eq!(overlay.underlay_opacity, 1.0);
        assert_eq!(overlay.light_opacity, 0.0);
        assert_eq!(overlay.touch_layer, NavLayer::Dark);
    }

    #[test]
    fn test_nan_progress_reads_as_transparent() {
        let overlay = NavOverlay::from_progress(f64::NAN);
        assert_eq!(overlay.progress, 0.0);
        assert_eq!(overlay.light_opacity, 1.0);
        assert_eq!(overlay.touch_layer, NavLayer::Light);
    }

    #[test]
    fn test_overlay_crossfade() {
        let overlay = NavOverlay::at_offset(6.0, 24.0);
        assert_eq!(overlay.underlay_opacity, 0.25);
        assert_eq!(overlay.light_opacity, 0.75);
        assert_eq!(overlay.dark_opacity, 0.25);
        assert_eq!(overlay.touch_layer, NavLayer::Light);
    }

    #[test]
    fn test_touch_moves_to_dark_at_full_progress() {
        let almost = NavOverlay::from_progress(0.99);
        assert_eq!(almost.touch_layer, NavLayer::Light);
        assert!(almost.dark_opacity > almost.light_opacity);

        let solid = NavOverlay::from_progress(1.0);
        assert_eq!(solid.touch_layer, NavLayer::Dark);
        assert_eq!(solid.light_opacity, 0.0);
    }
}

//! Latest scroll offset and container measurements.
//!
//! Each field has exactly one writer (the host's scroll or layout callback) and
//! any number of readers. Values are stored as `f64` bit patterns in atomics, so
//! readers always observe the most recently committed value without locking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::EngineConfig;

#[derive(Debug)]
struct AtomicF64(AtomicU64);

impl AtomicF64 {
    fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    #[inline]
    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    #[inline]
    fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

/// Negative, NaN and infinite measurements collapse to zero
#[inline]
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Point-in-time copy of the clock, the input of every derived animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub scroll_offset: f64,
    pub header_height: f64,
    pub nav_overlay_height: f64,
    pub tabs_bar_height: f64,
}

impl Geometry {
    pub fn new(
        scroll_offset: f64,
        header_height: f64,
        nav_overlay_height: f64,
        tabs_bar_height: f64,
    ) -> Self {
        Self {
            scroll_offset,
            header_height,
            nav_overlay_height,
            tabs_bar_height,
        }
    }

    pub fn with_offset(self, scroll_offset: f64) -> Self {
        Self {
            scroll_offset,
            ..self
        }
    }
}

#[derive(Debug)]
pub struct ScrollClock {
    scroll_offset: AtomicF64,
    header_height: AtomicF64,
    nav_overlay_height: AtomicF64,
    tabs_bar_height: AtomicF64,
    /// Used when the tabs bar reports a zero height
    tab_height_fallback: f64,
}

impl ScrollClock {
    /// Create a clock primed with the configured fallback geometry
    pub fn new(config: &EngineConfig) -> Arc<Self> {
        let tab_height = sanitize(config.tab_height);
        Arc::new(Self {
            scroll_offset: AtomicF64::new(0.0),
            header_height: AtomicF64::new(0.0),
            nav_overlay_height: AtomicF64::new(config.fallback_nav_height()),
            tabs_bar_height: AtomicF64::new(tab_height),
            tab_height_fallback: tab_height,
        })
    }

    /// Record an absolute scroll position. Missed frames self-correct on the next call.
    pub fn set_scroll_offset(&self, offset: f64) {
        self.scroll_offset.store(sanitize(offset));
    }

    pub fn set_header_height(&self, height: f64) {
        self.header_height.store(sanitize(height));
    }

    pub fn set_nav_overlay_height(&self, height: f64) {
        self.nav_overlay_height.store(sanitize(height));
    }

    /// A zero measurement means the bar has not been laid out yet
    pub fn set_tabs_bar_height(&self, height: f64) {
        let height = sanitize(height);
        let height = if height > 0.0 {
            height
        } else {
            self.tab_height_fallback
        };
        self.tabs_bar_height.store(height);
    }

    #[inline]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset.load()
    }

    #[inline]
    pub fn header_height(&self) -> f64 {
        self.header_height.load()
    }

    #[inline]
    pub fn nav_overlay_height(&self) -> f64 {
        self.nav_overlay_height.load()
    }

    #[inline]
    pub fn tabs_bar_height(&self) -> f64 {
        self.tabs_bar_height.load()
    }

    pub fn snapshot(&self) -> Geometry {
        Geometry {
            scroll_offset: self.scroll_offset(),
            header_height: self.header_height(),
            nav_overlay_height: self.nav_overlay_height(),
            tabs_bar_height: self.tabs_bar_height(),
        }
    }
}

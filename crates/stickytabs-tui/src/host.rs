//! Terminal list host.
//!
//! Lays out the flattened rows in layout units, owns the list offset, writes
//! scroll and layout measurements to the engine's clock and reports row
//! visibility. Terminal rows are `units_per_row` units tall.

use std::sync::Arc;
use std::time::{Duration, Instant};

use stickytabs_core::catalog::{FlatRows, Row};
use stickytabs_core::config::{EngineConfig, LayoutConfig, ScrollConfig};
use stickytabs_core::engine::{spacer_height, ListHost, ScrollClock, ScrollToRow, VisibleRow};
use stickytabs_core::ScrollTargetError;
use tracing::debug;

use crate::scroll::ScrollAnimator;

/// Row position relative to the viewport top, in units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSlot {
    pub index: usize,
    pub top: f64,
    pub height: f64,
}

pub struct TerminalList {
    clock: Arc<ScrollClock>,
    layout: LayoutConfig,
    kinds: Vec<Row>,
    tabs_row: usize,
    has_header: bool,
    /// Row tops with the spacer collapsed
    base_tops: Vec<f64>,
    base_heights: Vec<f64>,
    /// Unset until the first layout pass
    viewport: Option<f64>,
    animator: ScrollAnimator,
    throttle: Duration,
    last_emit: Option<Instant>,
    visibility_threshold: f64,
    viewable: Vec<usize>,
}

impl TerminalList {
    pub fn new(
        rows: &FlatRows,
        clock: Arc<ScrollClock>,
        layout: LayoutConfig,
        scroll: ScrollConfig,
        engine: &EngineConfig,
    ) -> Self {
        let mut list = Self {
            clock,
            layout,
            kinds: Vec::new(),
            tabs_row: 0,
            has_header: false,
            base_tops: Vec::new(),
            base_heights: Vec::new(),
            viewport: None,
            animator: ScrollAnimator::new(scroll),
            throttle: engine.scroll_event_throttle(),
            last_emit: None,
            visibility_threshold: engine.visibility_threshold,
            viewable: Vec::new(),
        };
        list.set_rows(rows);
        list
    }

    /// Take a new row list. Offset is kept and clamped on the next tick.
    pub fn set_rows(&mut self, rows: &FlatRows) {
        self.kinds = rows.iter().map(|r| r.row).collect();
        self.tabs_row = rows.tabs_row;
        self.has_header = rows.has_header();

        self.base_heights = self.kinds.iter().map(|r| self.base_height(r)).collect();
        self.base_tops = self
            .base_heights
            .iter()
            .scan(0.0, |top, h| {
                let this = *top;
                *top += h;
                Some(this)
            })
            .collect();
        self.viewable.clear();
    }

    fn base_height(&self, row: &Row) -> f64 {
        match row {
            Row::Header => self.layout.header_height,
            Row::TabsBar => self.layout.tabs_bar_height,
            Row::SectionHeader { .. } => self.layout.section_header_height,
            Row::Item { .. } => self.layout.item_height,
        }
    }

    /// Size the viewport and report measured heights to the clock.
    /// Measurements are only written when the viewport changes.
    pub fn layout(&mut self, viewport_rows: u16) {
        let viewport = viewport_rows as f64 * self.layout.units_per_row;
        if self.viewport == Some(viewport) {
            return;
        }
        self.viewport = Some(viewport);

        let header = if self.has_header {
            self.layout.header_height
        } else {
            0.0
        };
        self.clock.set_header_height(header);
        self.clock.set_nav_overlay_height(self.layout.nav_bar_height);
        self.clock.set_tabs_bar_height(self.layout.tabs_bar_height);

        debug!(
            "List layout: viewport {:.0} units, header {:.0}, nav {:.0}, tabs {:.0}",
            viewport, header, self.layout.nav_bar_height, self.layout.tabs_bar_height
        );
    }

    pub fn is_ready(&self) -> bool {
        self.viewport.is_some()
    }

    pub fn units_per_row(&self) -> f64 {
        self.layout.units_per_row
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn tabs_row(&self) -> usize {
        self.tabs_row
    }

    pub fn kind(&self, index: usize) -> Option<Row> {
        self.kinds.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Spacer inside the tabs row, as the clock currently sees it
    pub fn spacer(&self) -> f64 {
        spacer_height(&self.clock.snapshot())
    }

    pub fn row_height(&self, index: usize, spacer: f64) -> f64 {
        let base = self.base_heights.get(index).copied().unwrap_or(0.0);
        if index == self.tabs_row {
            base + spacer
        } else {
            base
        }
    }

    pub fn row_top(&self, index: usize, spacer: f64) -> f64 {
        let base = self.base_tops.get(index).copied().unwrap_or(0.0);
        if index > self.tabs_row {
            base + spacer
        } else {
            base
        }
    }

    pub fn content_height(&self, spacer: f64) -> f64 {
        match self.kinds.len() {
            0 => 0.0,
            n => self.row_top(n - 1, spacer) + self.row_height(n - 1, spacer),
        }
    }

    pub fn max_offset(&self, spacer: f64) -> f64 {
        let viewport = self.viewport.unwrap_or(0.0);
        (self.content_height(spacer) - viewport).max(0.0)
    }

    /// Current list offset
    pub fn offset(&self) -> f64 {
        self.animator.current()
    }

    pub fn viewport(&self) -> Option<f64> {
        self.viewport
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Work is pending: an animation, or an offset not yet sent to the clock
    pub fn needs_frame(&self) -> bool {
        self.animator.is_animating() || self.clock.scroll_offset() != self.animator.current()
    }

    /// User scroll by `rows` terminal rows
    pub fn scroll_rows(&mut self, rows: i32) {
        let max = self.max_offset(self.spacer());
        self.animator
            .scroll_by(rows as f64 * self.layout.units_per_row, max);
    }

    pub fn viewport_rows(&self) -> u16 {
        match self.viewport {
            Some(v) => (v / self.layout.units_per_row) as u16,
            None => 0,
        }
    }

    pub fn jump_to_top(&mut self) {
        let max = self.max_offset(self.spacer());
        self.animator.scroll_to(0.0, max);
    }

    pub fn jump_to_bottom(&mut self) {
        let max = self.max_offset(self.spacer());
        self.animator.scroll_to(max, max);
    }

    /// Rows overlapping the viewport with their on-screen share
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        self.slots()
            .into_iter()
            .filter(|s| s.height > 0.0)
            .filter_map(|s| {
                let viewport = self.viewport?;
                let overlap = (s.top + s.height).min(viewport) - s.top.max(0.0);
                (overlap > 0.0).then(|| VisibleRow::new(s.index, (overlap / s.height).min(1.0)))
            })
            .collect()
    }

    /// Rows overlapping the viewport, top relative to the viewport
    pub fn slots(&self) -> Vec<RowSlot> {
        let Some(viewport) = self.viewport else {
            return Vec::new();
        };
        let spacer = self.spacer();
        let offset = self.offset();
        let first = (0..self.kinds.len())
            .position(|i| self.row_top(i, spacer) + self.row_height(i, spacer) > offset)
            .unwrap_or(self.kinds.len());

        (first..self.kinds.len())
            .map(|index| RowSlot {
                index,
                top: self.row_top(index, spacer) - offset,
                height: self.row_height(index, spacer),
            })
            .take_while(|s| s.top < viewport)
            .collect()
    }

    /// Tabs row pinned at the viewport top once scrolled past its position
    pub fn sticky_slot(&self) -> Option<RowSlot> {
        if self.kinds.is_empty() || !self.is_ready() {
            return None;
        }
        let spacer = self.spacer();
        let top = self.row_top(self.tabs_row, spacer) - self.offset();
        (top < 0.0).then(|| RowSlot {
            index: self.tabs_row,
            top: 0.0,
            height: self.row_height(self.tabs_row, spacer),
        })
    }

    pub fn tick(&mut self) -> Option<Vec<VisibleRow>> {
        self.tick_at(Instant::now())
    }

    /// Advance the scroll animation and deliver events.
    ///
    /// The offset is written to the clock at most once per throttle interval.
    /// Returns the viewable rows when the set of viewable row indices changed.
    pub fn tick_at(&mut self, now: Instant) -> Option<Vec<VisibleRow>> {
        if !self.is_ready() {
            return None;
        }

        let max = self.max_offset(self.spacer());
        let offset = self.animator.update_at(max, now);

        let due = self
            .last_emit
            .map_or(true, |last| now.saturating_duration_since(last) >= self.throttle);
        if due && self.clock.scroll_offset() != offset {
            self.clock.set_scroll_offset(offset);
            self.last_emit = Some(now);
        }

        let viewable: Vec<VisibleRow> = self
            .visible_rows()
            .into_iter()
            .filter(|v| v.fraction >= self.visibility_threshold)
            .collect();
        let indices: Vec<usize> = viewable.iter().map(|v| v.index).collect();
        if indices == self.viewable {
            return None;
        }
        self.viewable = indices;
        Some(viewable)
    }
}

impl ListHost for TerminalList {
    fn scroll_to_row(&mut self, request: ScrollToRow) -> Result<(), ScrollTargetError> {
        let viewport = self.viewport.ok_or(ScrollTargetError::NotReady)?;
        if request.row >= self.kinds.len() {
            return Err(ScrollTargetError::OutOfRange {
                row: request.row,
                len: self.kinds.len(),
            });
        }

        let spacer = self.spacer();
        let top = self.row_top(request.row, spacer);
        let height = self.row_height(request.row, spacer);
        let target =
            top - request.align.view_position() * (viewport - height) - request.view_offset;
        let max = self.max_offset(spacer);

        debug!(
            "Scroll to row {}: top {:.0} target {:.0} (max {:.0})",
            request.row, top, target, max
        );

        if request.animated {
            self.animator.scroll_to(target, max);
        } else {
            self.animator.set(target, max);
        }
        Ok(())
    }
}

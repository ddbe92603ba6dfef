//! Engine facade tying rows, clock and tab interaction together.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::clock::{Geometry, ScrollClock};
use super::host::{ListHost, ScrollToRow};
use super::nav::NavOverlay;
use super::selection::TabSelectionController;
use super::spacer::spacer_height;
use super::suppression::SuppressionGate;
use super::tracker::{ActiveTabTracker, InteractionState, VisibleRow};
use crate::catalog::{flatten, tab_titles, FlatRows, Row, Section};
use crate::config::EngineConfig;
use crate::Result;

/// Per-frame animated values, derived from a clock snapshot only
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameValues {
    pub scroll_offset: f64,
    pub spacer_height: f64,
    pub nav: NavOverlay,
}

impl FrameValues {
    pub fn derive(geometry: &Geometry, nav_appear_threshold: f64) -> Self {
        Self {
            scroll_offset: geometry.scroll_offset,
            spacer_height: spacer_height(geometry),
            nav: NavOverlay::at_offset(geometry.scroll_offset, nav_appear_threshold),
        }
    }
}

/// Sticky category tabs engine.
///
/// Owns the section list and its flattened rows, a handle to the scroll clock
/// and the interaction state. Hosts feed it scroll, layout and visibility
/// events and forward tab presses to [`StickyTabs::press_tab`].
pub struct StickyTabs<T> {
    config: EngineConfig,
    sections: Arc<[Section<T>]>,
    rows: FlatRows,
    titles: Vec<String>,
    clock: Arc<ScrollClock>,
    interaction: InteractionState,
    tracker: ActiveTabTracker,
    selection: TabSelectionController,
}

impl<T> StickyTabs<T> {
    pub fn new(
        sections: impl Into<Arc<[Section<T>]>>,
        has_header: bool,
        config: EngineConfig,
    ) -> Self {
        let sections = sections.into();
        let rows = flatten(&sections, has_header);
        let titles = tab_titles(&sections);
        let interaction = InteractionState::new(
            config.initial_active_index,
            sections.len(),
            SuppressionGate::new(config.suppression_window()),
        );

        debug!(
            "Engine built: {} sections, {} rows, tabs at row {}",
            sections.len(),
            rows.len(),
            rows.tabs_row
        );

        Self {
            clock: ScrollClock::new(&config),
            tracker: ActiveTabTracker::new(config.visibility_threshold),
            selection: TabSelectionController::new(&config),
            config,
            sections,
            rows,
            titles,
            interaction,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rows(&self) -> &FlatRows {
        &self.rows
    }

    pub fn sections(&self) -> &[Section<T>] {
        &self.sections
    }

    pub fn tab_titles(&self) -> &[String] {
        &self.titles
    }

    pub fn section(&self, index: usize) -> Option<&Section<T>> {
        self.sections.get(index)
    }

    /// Item payload of an item row
    pub fn item(&self, row: usize) -> Option<&T> {
        match self.rows.row(row)? {
            Row::Item { section, item } => self.sections.get(section)?.data.get(item),
            _ => None,
        }
    }

    /// Shared clock handle for the host's scroll/layout writer
    pub fn clock(&self) -> Arc<ScrollClock> {
        Arc::clone(&self.clock)
    }

    pub fn geometry(&self) -> Geometry {
        self.clock.snapshot()
    }

    /// Current animated values
    pub fn frame(&self) -> FrameValues {
        FrameValues::derive(&self.clock.snapshot(), self.config.nav_appear_threshold)
    }

    /// Record a scroll offset and return the values to render for it
    pub fn on_scroll(&self, offset: f64) -> FrameValues {
        self.clock.set_scroll_offset(offset);
        self.frame()
    }

    pub fn on_header_layout(&self, height: f64) {
        self.clock.set_header_height(height);
    }

    pub fn on_nav_layout(&self, height: f64) {
        self.clock.set_nav_overlay_height(height);
    }

    pub fn on_tabs_layout(&self, height: f64) {
        self.clock.set_tabs_bar_height(height);
    }

    /// Visibility notification from the host list
    pub fn on_viewable_rows_changed(&mut self, visible: &[VisibleRow]) -> Option<usize> {
        self.tracker
            .on_viewable_rows_changed(&mut self.interaction, &self.rows, visible)
    }

    /// Tab press: activate, arm suppression, and ask the host to scroll
    pub fn press_tab<H: ListHost + ?Sized>(
        &mut self,
        index: usize,
        host: &mut H,
    ) -> Result<ScrollToRow> {
        let geometry = self.clock.snapshot();
        self.selection
            .press(&mut self.interaction, index, &geometry, &self.rows, host)
    }

    pub fn active_index(&self) -> usize {
        self.interaction.active()
    }

    pub fn active_section(&self) -> Option<usize> {
        self.interaction.active_section()
    }

    pub fn is_suppressed(&self) -> bool {
        self.interaction.gate.is_suppressed()
    }

    pub fn visibility_threshold(&self) -> f64 {
        self.tracker.threshold()
    }
}

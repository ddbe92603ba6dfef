//! Active tab inference from row visibility.

use tracing::debug;

use super::suppression::{GateState, SuppressionGate};
use crate::catalog::FlatRows;

/// A row reported visible by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRow {
    pub index: usize,
    /// Share of the row's area on screen, 0.0-1.0
    pub fraction: f64,
}

impl VisibleRow {
    pub fn new(index: usize, fraction: f64) -> Self {
        Self { index, fraction }
    }
}

/// Interaction-side state: the active section and the suppression gate.
///
/// Only the tracker and the tab selection controller mutate it.
#[derive(Debug, Clone)]
pub struct InteractionState {
    active: usize,
    section_count: usize,
    pub gate: SuppressionGate,
}

impl InteractionState {
    pub fn new(initial: usize, section_count: usize, gate: SuppressionGate) -> Self {
        let mut state = Self {
            active: 0,
            section_count,
            gate,
        };
        state.active = state.clamp(initial);
        state
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.section_count.saturating_sub(1))
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// `None` when there are no sections to focus
    pub fn active_section(&self) -> Option<usize> {
        (self.section_count > 0).then_some(self.active)
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// Returns true when the value changed
    pub fn set_active(&mut self, index: usize) -> bool {
        let index = self.clamp(index);
        if index == self.active {
            return false;
        }
        debug!("Active tab {} -> {}", self.active, index);
        self.active = index;
        true
    }
}

#[derive(Debug, Clone)]
pub struct ActiveTabTracker {
    threshold: f64,
}

impl ActiveTabTracker {
    pub fn new(visibility_threshold: f64) -> Self {
        Self {
            threshold: visibility_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Section of the topmost sufficiently visible section header
    pub fn resolve(&self, rows: &FlatRows, visible: &[VisibleRow]) -> Option<usize> {
        visible
            .iter()
            .filter(|v| v.fraction >= self.threshold)
            .filter_map(|v| match rows.row(v.index) {
                Some(row) if row.is_section_header() => row.section().map(|s| (v.index, s)),
                _ => None,
            })
            .min_by_key(|(index, _)| *index)
            .map(|(_, section)| section)
    }

    /// Apply a visibility notification. Returns the new active index if it changed.
    pub fn on_viewable_rows_changed(
        &self,
        state: &mut InteractionState,
        rows: &FlatRows,
        visible: &[VisibleRow],
    ) -> Option<usize> {
        if state.gate.poll() == GateState::Suppressed {
            return None;
        }
        let next = self.resolve(rows, visible)?;
        state.set_active(next).then_some(next)
    }
}

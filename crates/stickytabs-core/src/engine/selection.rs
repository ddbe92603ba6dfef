//! Tab press handling: optimistic activation, geometry-matched scroll request,
//! and suppression of the visibility feedback the scroll will cause.

use tracing::{debug, warn};

use super::clock::Geometry;
use super::host::{Alignment, ListHost, ScrollToRow};
use super::spacer::spacer_height;
use super::tracker::InteractionState;
use crate::catalog::FlatRows;
use crate::config::EngineConfig;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct TabSelectionController {
    epsilon: f64,
    /// Applied to the first tab's view offset only
    first_tab_multiplier: f64,
}

impl TabSelectionController {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            epsilon: config.view_offset_epsilon,
            first_tab_multiplier: config.first_tab_offset_multiplier,
        }
    }

    /// Distance between the viewport top and the target section header:
    /// the spacer as currently rendered, the tabs bar, and epsilon.
    pub fn view_offset(&self, index: usize, geometry: &Geometry) -> f64 {
        let base = spacer_height(geometry) + geometry.tabs_bar_height + self.epsilon;
        if index == 0 {
            base * self.first_tab_multiplier
        } else {
            base
        }
    }

    /// Scroll request for a press on `index`, without side effects
    pub fn plan(&self, index: usize, geometry: &Geometry, rows: &FlatRows) -> Result<ScrollToRow> {
        let row = *rows
            .section_header_rows
            .get(index)
            .ok_or(Error::SectionOutOfRange {
                index,
                count: rows.section_count(),
            })?;

        Ok(ScrollToRow {
            row,
            view_offset: self.view_offset(index, geometry),
            align: Alignment::Top,
            animated: true,
        })
    }

    /// Handle a tab press.
    ///
    /// The active index is updated and the gate armed before the host is asked
    /// to scroll. A host failure is logged and returned; the active index is
    /// kept and nothing is retried.
    pub fn press<H: ListHost + ?Sized>(
        &self,
        state: &mut InteractionState,
        index: usize,
        geometry: &Geometry,
        rows: &FlatRows,
        host: &mut H,
    ) -> Result<ScrollToRow> {
        let request = self.plan(index, geometry, rows)?;

        state.set_active(index);
        state.gate.arm();

        debug!(
            "Tab {} pressed: row {} view_offset {:.1}",
            index, request.row, request.view_offset
        );

        if let Err(e) = host.scroll_to_row(request) {
            warn!("Scroll to section {} (row {}) failed: {}", index, request.row, e);
            return Err(e.into());
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::catalog::{flatten, Section};
    use crate::engine::host::RecordingHost;
    use crate::engine::suppression::{GateState, SuppressionGate};
    use crate::error::ScrollTargetError;

    fn rows() -> FlatRows {
        let sections: Vec<Section<u8>> = [6usize, 8, 7]
            .iter()
            .enumerate()
            .map(|(i, &n)| Section::new(format!("s{}", i), "", vec![0; n]))
            .collect();
        flatten(&sections, true)
    }

    fn state() -> InteractionState {
        InteractionState::new(0, 3, SuppressionGate::new(Duration::from_millis(500)))
    }

    #[test]
    fn test_press_past_band() {
        let controller = TabSelectionController::new(&EngineConfig::default());
        let geometry = Geometry::new(500.0, 300.0, 80.0, 48.0);
        let mut state = state();
        let mut host = RecordingHost::default();

        let request = controller
            .press(&mut state, 1, &geometry, &rows(), &mut host)
            .unwrap();

        assert_eq!(request.view_offset, 129.0);
        assert_eq!(request.row, 9);
        assert_eq!(request.align, Alignment::Top);
        assert_eq!(state.active(), 1);
        assert_eq!(state.gate.state(), GateState::Suppressed);
        assert_eq!(host.requests, vec![request]);
    }

    #[test]
    fn test_view_offset_uses_live_spacer() {
        let controller = TabSelectionController::new(&EngineConfig::default());
        // at the threshold the spacer is half the nav height
        let geometry = Geometry::new(300.0, 300.0, 80.0, 48.0);
        assert_eq!(controller.view_offset(2, &geometry), 40.0 + 48.0 + 1.0);
    }

    #[test]
    fn test_first_tab_multiplier() {
        let controller = TabSelectionController::new(&EngineConfig::default());
        let geometry = Geometry::new(500.0, 300.0, 80.0, 48.0);
        assert_eq!(controller.view_offset(0, &geometry), 129.0 * 6.0);

        let plain = TabSelectionController::new(&EngineConfig {
            first_tab_offset_multiplier: 1.0,
            ..Default::default()
        });
        assert_eq!(plain.view_offset(0, &geometry), 129.0);
    }

    #[test]
    fn test_out_of_range_press_changes_nothing() {
        let controller = TabSelectionController::new(&EngineConfig::default());
        let geometry = Geometry::new(0.0, 300.0, 80.0, 48.0);
        let mut state = state();
        let mut host = RecordingHost::default();

        let err = controller
            .press(&mut state, 3, &geometry, &rows(), &mut host)
            .unwrap_err();

        assert!(matches!(err, Error::SectionOutOfRange { index: 3, count: 3 }));
        assert_eq!(state.active(), 0);
        assert_eq!(state.gate.state(), GateState::Idle);
        assert!(host.requests.is_empty());
    }

    #[test]
    fn test_host_failure_is_surfaced_without_rollback() {
        let controller = TabSelectionController::new(&EngineConfig::default());
        let geometry = Geometry::new(0.0, 300.0, 80.0, 48.0);
        let mut state = state();
        let mut host = RecordingHost {
            fail_with: Some(ScrollTargetError::NotReady),
            ..Default::default()
        };

        let err = controller
            .press(&mut state, 2, &geometry, &rows(), &mut host)
            .unwrap_err();

        assert!(err.is_recoverable());
        assert_eq!(state.active(), 2);
        assert_eq!(state.gate.state(), GateState::Suppressed);
    }
}

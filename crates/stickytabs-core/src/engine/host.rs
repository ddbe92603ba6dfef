//! Capabilities the engine needs from the surrounding list implementation.

use serde::Serialize;

use crate::error::ScrollTargetError;

/// Where the target row should land within the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Top,
    Center,
    Bottom,
}

impl Alignment {
    /// Fraction of the free viewport space placed above the row
    pub fn view_position(self) -> f64 {
        match self {
            Alignment::Top => 0.0,
            Alignment::Center => 0.5,
            Alignment::Bottom => 1.0,
        }
    }
}

/// Programmatic scroll request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollToRow {
    pub row: usize,
    /// Distance kept between the aligned edge and the row
    pub view_offset: f64,
    pub align: Alignment,
    pub animated: bool,
}

/// A virtualized list able to scroll to a flattened row.
///
/// Requests are fire-and-forget: `Ok` means the scroll was started, not that it
/// finished.
pub trait ListHost {
    fn scroll_to_row(&mut self, request: ScrollToRow) -> Result<(), ScrollTargetError>;
}

/// Host that records requests, for tests and headless use
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub requests: Vec<ScrollToRow>,
    /// Error returned instead of recording
    pub fail_with: Option<ScrollTargetError>,
}

impl ListHost for RecordingHost {
    fn scroll_to_row(&mut self, request: ScrollToRow) -> Result<(), ScrollTargetError> {
        if let Some(err) = self.fail_with.clone() {
            return Err(err);
        }
        self.requests.push(request);
        Ok(())
    }
}

//! Scroll-position synchronization engine
//!
//! Two domains share nothing but the scroll clock:
//!
//! ## Frame domain (runs at scroll-event rate)
//! - `clock` - lock-free, single-writer scroll offset and measurements
//! - `spacer` - animated spacer height inside the sticky tabs row
//! - `nav` - overlay nav crossfade
//!
//! ## Interaction domain (tab presses, visibility changes)
//! - `suppression` - timed gate muting visibility feedback after a press
//! - `tracker` - active tab from visible section headers
//! - `selection` - tab press to scroll request
//!
//! `sticky` ties both together behind [`StickyTabs`], and `host` describes what
//! the engine needs from the list that renders the rows.

pub mod clock;
pub mod host;
pub mod nav;
pub mod selection;
pub mod spacer;
pub mod sticky;
pub mod suppression;
pub mod tracker;

pub use clock::{Geometry, ScrollClock};
pub use host::{Alignment, ListHost, RecordingHost, ScrollToRow};
pub use nav::{nav_progress, NavLayer, NavOverlay};
pub use selection::TabSelectionController;
pub use spacer::{interpolate_clamped, spacer_height};
pub use sticky::{FrameValues, StickyTabs};
pub use suppression::{GateState, SuppressionGate};
pub use tracker::{ActiveTabTracker, InteractionState, VisibleRow};

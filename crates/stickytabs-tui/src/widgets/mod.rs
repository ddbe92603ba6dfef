mod catalog_list;
mod nav_overlay;
mod status_bar;
mod tabs_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub use catalog_list::CatalogListWidget;
pub use nav_overlay::NavOverlayWidget;
pub use status_bar::StatusBarWidget;
pub use tabs_bar::{TabStrip, TabsBarWidget};

use crate::app::App;

/// Draw the whole screen: list, overlay nav on top of it, status bar.
///
/// Lays the list out for the current size, so call [`App::tick`] after a draw
/// that followed a resize.
pub fn render_screen(frame: &mut Frame, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    app.resize(layout[0].height);
    app.hitboxes.clear();

    CatalogListWidget::render(frame, layout[0], app);
    NavOverlayWidget::render(frame, layout[0], app);
    StatusBarWidget::render(frame, layout[1], app);
}

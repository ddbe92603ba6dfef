pub mod app;
pub mod event;
pub mod host;
pub mod input;
pub mod keymap;
pub mod scroll;
pub mod theme;
pub mod themes;
pub mod widgets;

pub use app::App;
pub use host::TerminalList;
pub use theme::Theme;
pub use themes::{available_themes, load_theme};

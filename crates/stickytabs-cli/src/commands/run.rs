use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use stickytabs_core::{AppConfig, Catalog};
use stickytabs_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    keymap::Keymap,
    load_theme,
    scroll::ScrollConfigExt,
    widgets::render_screen,
};

pub async fn run(config: Arc<AppConfig>, catalog: Catalog, show_header: bool) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);
    let theme = load_theme(&config.ui.theme);
    let title = catalog
        .header
        .as_ref()
        .map(|h| h.title.clone())
        .unwrap_or_else(|| "stickytabs".to_string());

    info!(
        "Starting UI: {} sections, {} items",
        catalog.sections.len(),
        catalog.item_count()
    );
    let mut app = App::new(catalog, &config, theme, show_header);

    let event_handler = EventHandler::new(
        config.ui.tick_rate_ms,
        config.ui.scroll.animation_tick_duration(),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, &mut app, &keymap, &event_handler);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("UI closed");
    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    keymap: &Keymap,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render_screen(frame, app))?;

        // Scroll events and visibility for the offset just drawn
        app.tick();

        if let Some(event) = event_handler.next(app.needs_frame())? {
            match event {
                AppEvent::Key(key) => {
                    app.status_message = None;
                    let action = handle_key_event(key, app, keymap);
                    app.dispatch(action);
                }
                AppEvent::Mouse(mouse) => app.dispatch(handle_mouse_event(mouse)),
                // The next draw lays the list out for the new size
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

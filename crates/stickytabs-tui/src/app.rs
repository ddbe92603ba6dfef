use ratatui::layout::{Position, Rect};
use stickytabs_core::catalog::Hero;
use stickytabs_core::{AppConfig, Catalog, CatalogItem, StickyTabs};
use tracing::{debug, info};

use crate::host::TerminalList;
use crate::input::Action;
use crate::theme::Theme;

/// Clickable element drawn in the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Tab(usize),
    Back,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hitbox {
    pub area: Rect,
    pub target: HitTarget,
}

pub struct App {
    pub engine: StickyTabs<CatalogItem>,
    pub list: TerminalList,
    pub hero: Option<Hero>,
    pub theme: Theme,
    pub scroll_lines: u16,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
    /// First key of a multi-key sequence ("gg")
    pub pending_key: Option<char>,
    /// Rebuilt on every draw
    pub hitboxes: Vec<Hitbox>,
}

impl App {
    /// `show_header` only has an effect when the catalog has a header
    pub fn new(catalog: Catalog, config: &AppConfig, theme: Theme, show_header: bool) -> Self {
        let has_header = show_header && catalog.has_header();
        let hero = if has_header { catalog.header } else { None };
        let engine = StickyTabs::new(catalog.sections, has_header, config.engine.clone());
        let list = TerminalList::new(
            engine.rows(),
            engine.clock(),
            config.ui.layout.clone(),
            config.ui.scroll.clone(),
            engine.config(),
        );

        Self {
            engine,
            list,
            hero,
            theme,
            scroll_lines: config.ui.scroll.scroll_lines.max(1),
            should_quit: false,
            status_message: None,
            error_message: None,
            pending_key: None,
            hitboxes: Vec::new(),
        }
    }

    /// Lay out the list for a viewport of `rows` terminal rows
    pub fn resize(&mut self, rows: u16) {
        self.list.layout(rows);
    }

    /// Advance scrolling and feed visibility changes to the engine
    pub fn tick(&mut self) {
        if let Some(visible) = self.list.tick() {
            if let Some(active) = self.engine.on_viewable_rows_changed(&visible) {
                debug!("Active tab from scroll: {}", active);
            }
        }
    }

    /// Whether the next frame should come at animation rate
    pub fn needs_frame(&self) -> bool {
        self.list.needs_frame()
    }

    pub fn press_tab(&mut self, index: usize) {
        self.error_message = None;
        if let Err(e) = self.engine.press_tab(index, &mut self.list) {
            self.error_message = Some(e.to_string());
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        let page = self.list.viewport_rows() as i32;
        let sections = self.engine.sections().len();
        let active = self.engine.active_index();

        match action {
            Action::Quit => self.should_quit = true,
            Action::Back => {
                info!("Back navigation requested");
                self.should_quit = true;
            }
            Action::Search => {
                self.status_message = Some("Search is not available in this catalog".to_string());
            }
            Action::ScrollDown => self.list.scroll_rows(self.scroll_lines as i32),
            Action::ScrollUp => self.list.scroll_rows(-(self.scroll_lines as i32)),
            Action::ScrollHalfPageDown => self.list.scroll_rows(page / 2),
            Action::ScrollHalfPageUp => self.list.scroll_rows(-page / 2),
            Action::ScrollPageDown => self.list.scroll_rows(page),
            Action::ScrollPageUp => self.list.scroll_rows(-page),
            Action::Wheel(rows) => self.list.scroll_rows(rows),
            Action::JumpToTop => self.list.jump_to_top(),
            Action::JumpToBottom => self.list.jump_to_bottom(),
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextTab if active + 1 < sections => self.press_tab(active + 1),
            Action::PrevTab if active > 0 && sections > 0 => self.press_tab(active - 1),
            Action::SelectTab(index) if index < sections => self.press_tab(index),
            Action::Click { column, row } => self.click(column, row),
            _ => {}
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        let position = Position::new(column, row);
        // Later hitboxes are drawn on top
        let target = self
            .hitboxes
            .iter()
            .rev()
            .find(|h| h.area.contains(position))
            .map(|h| h.target);

        match target {
            Some(HitTarget::Tab(index)) => self.press_tab(index),
            Some(HitTarget::Back) => {
                let layer = self.engine.frame().nav.touch_layer;
                debug!("Back pressed on {:?} nav layer", layer);
                self.dispatch(Action::Back);
            }
            Some(HitTarget::Search) => self.dispatch(Action::Search),
            None => {}
        }
    }
}

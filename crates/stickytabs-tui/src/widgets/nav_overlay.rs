use ratatui::{buffer::Buffer, layout::Rect, style::Color, Frame};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, HitTarget, Hitbox};
use crate::theme::{blend, Theme};

const BACK_ICON: &str = " ‹ ";
const SEARCH_ICON: &str = " ⌕ ";
/// Light layer chip opacity at full strength
const CHIP_ALPHA: f64 = 0.8;

pub struct NavOverlayWidget;

impl NavOverlayWidget {
    /// Draw the overlay nav over whatever the list rendered at the top.
    ///
    /// The underlay and both icon layers are composited into the existing
    /// cells, so the content below stays visible while the overlay fades in.
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let upr = app.list.units_per_row();
        let nav_height = app.list.layout_config().nav_bar_height;
        let rows = ((nav_height / upr).round() as u16).min(area.height);
        if rows == 0 || area.width < 8 {
            return;
        }
        let nav_area = Rect::new(area.x, area.y, area.width, rows);
        let nav = app.engine.frame().nav;
        let theme = &app.theme;
        let buf = frame.buffer_mut();

        for y in nav_area.top()..nav_area.bottom() {
            for x in nav_area.left()..nav_area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    let under = resolve_bg(cell.bg, theme);
                    cell.set_bg(blend(under, theme.bg1, nav.underlay_opacity));
                }
            }
        }

        let mid = nav_area.y + rows / 2;
        let icon_fg = blend(theme.hero_fg, theme.fg0, nav.dark_opacity);
        let chip_alpha = nav.light_opacity * CHIP_ALPHA;
        let search_x = nav_area.right() - SEARCH_ICON.width() as u16 - 1;

        draw_icon(buf, nav_area.x + 1, mid, BACK_ICON, icon_fg, theme, chip_alpha);
        draw_icon(buf, search_x, mid, SEARCH_ICON, icon_fg, theme, chip_alpha);

        if let Some(hero) = &app.hero {
            draw_title(buf, nav_area, mid, &hero.title, theme, nav.dark_opacity);
        }

        app.hitboxes.push(Hitbox {
            area: Rect::new(nav_area.x, nav_area.y, BACK_ICON.width() as u16 + 2, rows),
            target: HitTarget::Back,
        });
        app.hitboxes.push(Hitbox {
            area: Rect::new(search_x - 1, nav_area.y, SEARCH_ICON.width() as u16 + 2, rows),
            target: HitTarget::Search,
        });
    }
}

fn resolve_bg(bg: Color, theme: &Theme) -> Color {
    match bg {
        Color::Reset => theme.bg0,
        other => other,
    }
}

fn draw_icon(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    icon: &str,
    fg: Color,
    theme: &Theme,
    chip_alpha: f64,
) {
    for (i, ch) in icon.chars().enumerate() {
        if let Some(cell) = buf.cell_mut((x + i as u16, y)) {
            let under = resolve_bg(cell.bg, theme);
            cell.set_char(ch);
            cell.set_fg(fg);
            cell.set_bg(blend(under, theme.bg2, chip_alpha));
        }
    }
}

/// Centered title, faded in with the dark layer
fn draw_title(buf: &mut Buffer, area: Rect, y: u16, title: &str, theme: &Theme, alpha: f64) {
    if alpha <= 0.0 {
        return;
    }
    // keep clear of both icons
    let room = area.width.saturating_sub(12) as usize;
    let title = truncate_to_width(title, room);
    let mut x = area.x + area.width.saturating_sub(title.width() as u16) / 2;
    for ch in title.chars() {
        let width = ch.width().unwrap_or(0) as u16;
        if width == 0 {
            continue;
        }
        if let Some(cell) = buf.cell_mut((x, y)) {
            let under = resolve_bg(cell.bg, theme);
            cell.set_char(ch);
            cell.set_fg(blend(under, theme.fg0, alpha));
        }
        x += width;
    }
}

/// Longest prefix of `text` that fits in `max` columns
fn truncate_to_width(text: &str, max: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= max
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};
    use stickytabs_core::config::ScrollConfig;
    use stickytabs_core::{AppConfig, Catalog};

    use super::*;

    fn app() -> App {
        app_with(Catalog::demo())
    }

    fn app_with(catalog: Catalog) -> App {
        let mut config = AppConfig::default();
        config.ui.scroll = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut app = App::new(catalog, &config, Theme::default(), true);
        app.resize(30);
        app.tick();
        app
    }

    fn draw(app: &mut App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(40, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.hitboxes.clear();
                NavOverlayWidget::render(frame, area, app);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_transparent_at_top() {
        let mut app = app();
        let buffer = draw(&mut app);
        // underlay fully transparent over an empty buffer
        assert_eq!(buffer[(20u16, 0u16)].bg, app.theme.bg0);
        assert_eq!(buffer[(2u16, 1u16)].symbol(), "‹");
        // chip drawn by the light layer
        assert_ne!(buffer[(2u16, 1u16)].bg, app.theme.bg0);
        assert_eq!(app.hitboxes.len(), 2);
        assert_eq!(app.hitboxes[0].target, HitTarget::Back);
    }

    #[test]
    fn test_opaque_when_scrolled() {
        let mut app = app();
        app.list.scroll_rows(20);
        app.tick();
        assert_eq!(app.engine.frame().nav.progress, 1.0);

        let buffer = draw(&mut app);
        assert_eq!(buffer[(20u16, 0u16)].bg, app.theme.bg1);
        assert_eq!(buffer[(2u16, 1u16)].fg, app.theme.fg0);
        let title_row: String = (0..40u16)
            .map(|x| buffer[(x, 1u16)].symbol().to_string())
            .collect();
        assert!(title_row.contains("Burger Barn"));
    }

    #[test]
    fn test_wide_title_is_cut_by_display_width() {
        let mut catalog = Catalog::demo();
        if let Some(header) = catalog.header.as_mut() {
            header.title = "汉堡".repeat(20);
        }
        let mut app = app_with(catalog);
        app.list.scroll_rows(20);
        app.tick();

        let buffer = draw(&mut app);
        // 28 columns of room: 14 glyphs starting at column 6
        assert_eq!(buffer[(6u16, 1u16)].symbol(), "汉");
        assert_eq!(buffer[(8u16, 1u16)].symbol(), "堡");
        assert_eq!(buffer[(32u16, 1u16)].symbol(), "堡");
        // icons untouched
        assert_eq!(buffer[(2u16, 1u16)].symbol(), "‹");
        assert_eq!(buffer[(37u16, 1u16)].symbol(), "⌕");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Burger Barn", 6), "Burger");
        assert_eq!(truncate_to_width("汉堡汉堡", 5), "汉堡");
        assert_eq!(truncate_to_width("汉堡", 0), "");
    }
}

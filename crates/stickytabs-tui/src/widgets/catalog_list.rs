use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};
use stickytabs_core::catalog::Row;
use unicode_width::UnicodeWidthStr;

use super::tabs_bar::TabsBarWidget;
use crate::app::App;
use crate::host::RowSlot;
use crate::theme::Theme;

/// Units to terminal rows
fn to_rows(units: f64, units_per_row: f64) -> i32 {
    (units / units_per_row).round() as i32
}

/// Screen rows `[start, end)` of a slot relative to the viewport
fn row_span(slot: &RowSlot, units_per_row: f64) -> (i32, i32) {
    (
        to_rows(slot.top, units_per_row),
        to_rows(slot.top + slot.height, units_per_row),
    )
}

pub struct CatalogListWidget;

impl CatalogListWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let upr = app.list.units_per_row();
        let height = area.height as i32;
        let mut lines: Vec<Line<'static>> = vec![Line::default(); area.height as usize];
        let mut tabs_slot = None;

        for slot in app.list.slots() {
            let Some(kind) = app.list.kind(slot.index) else {
                continue;
            };
            if kind == Row::TabsBar {
                tabs_slot = Some(slot);
                continue;
            }

            let (y0, y1) = row_span(&slot, upr);
            let row_lines = row_lines(app, kind, (y1 - y0).max(0) as usize, area.width);
            for (i, line) in row_lines.into_iter().enumerate() {
                let y = y0 + i as i32;
                if (0..height).contains(&y) {
                    lines[y as usize] = line;
                }
            }
        }

        let paragraph = Paragraph::new(lines)
            .style(Style::default().bg(app.theme.bg0).fg(app.theme.fg0));
        frame.render_widget(paragraph, area);

        // Pinned once scrolled past, otherwise drawn in place
        if let Some(slot) = app.list.sticky_slot().or(tabs_slot) {
            Self::render_tabs_row(frame, area, app, &slot);
        }
    }

    /// Spacer on top, tabs bar at the bottom of the row
    fn render_tabs_row(frame: &mut Frame, area: Rect, app: &mut App, slot: &RowSlot) {
        let upr = app.list.units_per_row();
        let tabs_rows = to_rows(app.list.layout_config().tabs_bar_height, upr);
        let (y0, y1) = row_span(slot, upr);
        let bar_top = (y1 - tabs_rows).max(y0);

        let clip = |from: i32, to: i32| -> Option<Rect> {
            let from = from.clamp(0, area.height as i32);
            let to = to.clamp(0, area.height as i32);
            (to > from).then(|| {
                Rect::new(area.x, area.y + from as u16, area.width, (to - from) as u16)
            })
        };

        if let Some(row) = clip(y0, y1) {
            frame.render_widget(Clear, row);
        }
        if let Some(spacer) = clip(y0, bar_top) {
            frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg0)), spacer);
        }
        if let Some(bar) = clip(bar_top, y1) {
            TabsBarWidget::render(frame, bar, app);
        }
    }
}

/// Exactly `height` lines for a row
fn row_lines(app: &App, kind: Row, height: usize, width: u16) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let mut lines = match kind {
        Row::Header => hero_lines(app, height, width),
        Row::SectionHeader { section } => {
            let title = app
                .engine
                .section(section)
                .map(|s| s.tab_title(section))
                .unwrap_or_default();
            vec![Line::from(Span::styled(
                format!(" {}", title),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ))]
        }
        Row::Item { section, item } => {
            let Some(entry) = app.engine.section(section).and_then(|s| s.data.get(item)) else {
                return vec![Line::default(); height];
            };
            let mut detail = vec![
                Span::raw("   "),
                Span::styled(entry.price.clone(), Style::default().fg(theme.price)),
            ];
            if let Some(description) = &entry.description {
                detail.push(Span::styled(
                    format!("  {}", description),
                    Style::default().fg(theme.muted),
                ));
            }
            let mut item_lines = vec![
                Line::from(Span::styled(
                    format!("   {}", entry.name),
                    Style::default().fg(theme.fg1),
                )),
                Line::from(detail),
            ];
            if height > 2 {
                item_lines.resize(height - 1, Line::default());
                item_lines.push(Line::from(Span::styled(
                    format!("   {}", "─".repeat(width.saturating_sub(6) as usize)),
                    Style::default().fg(theme.bg2),
                )));
            }
            item_lines
        }
        Row::TabsBar => Vec::new(),
    };
    lines.resize(height, Line::default());
    lines
}

/// Hero block with the title near its bottom edge
fn hero_lines(app: &App, height: usize, width: u16) -> Vec<Line<'static>> {
    let theme: &Theme = &app.theme;
    let style = Style::default().bg(theme.hero).fg(theme.hero_fg);
    let padded = |text: String, text_style: Style| -> Line<'static> {
        let fill = (width as usize).saturating_sub(text.width());
        Line::from(vec![
            Span::styled(text, text_style),
            Span::styled(" ".repeat(fill), style),
        ])
    };

    let mut lines: Vec<Line<'static>> = (0..height).map(|_| padded(String::new(), style)).collect();
    let Some(hero) = &app.hero else {
        return lines;
    };

    if height >= 3 {
        lines[height - 3] = padded(
            format!("  {}", hero.title),
            style.add_modifier(Modifier::BOLD),
        );
    }
    if let (Some(subtitle), true) = (&hero.subtitle, height >= 2) {
        lines[height - 2] = padded(format!("  {}", subtitle), style);
    }
    lines
}

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, HitTarget, Hitbox};

/// Columns before the first tab
const LEADING: u16 = 1;
const GAP: u16 = 1;

/// Horizontal placement of the tab labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabStrip {
    /// Columns scrolled off the left edge
    pub offset: u16,
    /// (x, width) of each tab in strip coordinates
    pub tabs: Vec<(u16, u16)>,
    pub total_width: u16,
}

impl TabStrip {
    /// Lay out `titles` and scroll so the active tab starts one pad from the left
    pub fn layout(titles: &[String], active: usize, width: u16) -> Self {
        let mut tabs = Vec::with_capacity(titles.len());
        let mut x = LEADING;
        for title in titles {
            let w = (title.width() as u16).saturating_add(2);
            tabs.push((x, w));
            x = x.saturating_add(w).saturating_add(GAP);
        }
        let total_width = if tabs.is_empty() {
            0
        } else {
            x - GAP + LEADING
        };

        let offset = tabs
            .get(active)
            .map(|(x, _)| x.saturating_sub(LEADING))
            .unwrap_or(0)
            .min(total_width.saturating_sub(width));

        Self {
            offset,
            tabs,
            total_width,
        }
    }

    /// Screen span of tab `index` within `area`, clipped
    pub fn screen_span(&self, index: usize, area: Rect) -> Option<(u16, u16)> {
        let (x, w) = *self.tabs.get(index)?;
        let start = x.max(self.offset) - self.offset;
        let end = (x + w).saturating_sub(self.offset).min(area.width);
        (end > start).then(|| (area.x + start, end - start))
    }
}

pub struct TabsBarWidget;

impl TabsBarWidget {
    /// Blank line, labels, underline. Clipped from the bottom when `area` is short.
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let theme = &app.theme;
        let titles = app.engine.tab_titles();
        let active = app.engine.active_section();
        let strip = TabStrip::layout(titles, active.unwrap_or(0), area.width);

        let mut labels = vec![Span::raw(" ".repeat(LEADING as usize))];
        let mut underline = vec![Span::styled(
            "─".repeat(LEADING as usize),
            Style::default().fg(theme.bg2),
        )];
        for (i, (title, (_, w))) in titles.iter().zip(&strip.tabs).enumerate() {
            let is_active = Some(i) == active;
            let (label_style, rule, rule_style) = if is_active {
                (
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    "━",
                    Style::default().fg(theme.accent),
                )
            } else {
                (Style::default().fg(theme.muted), "─", Style::default().fg(theme.bg2))
            };
            labels.push(Span::styled(format!(" {} ", title), label_style));
            labels.push(Span::raw(" ".repeat(GAP as usize)));
            underline.push(Span::styled(rule.repeat(*w as usize), rule_style));
            underline.push(Span::styled(
                "─".repeat(GAP as usize),
                Style::default().fg(theme.bg2),
            ));
        }
        let fill = area.width.max(strip.total_width) as usize;
        underline.push(Span::styled("─".repeat(fill), Style::default().fg(theme.bg2)));

        let lines = vec![Line::default(), Line::from(labels), Line::from(underline)];
        let paragraph = Paragraph::new(lines)
            .style(Style::default().bg(theme.bg0).fg(theme.fg0))
            .scroll((0, strip.offset));
        frame.render_widget(paragraph, area);

        for i in 0..strip.tabs.len() {
            if let Some((x, width)) = strip.screen_span(i, area) {
                app.hitboxes.push(Hitbox {
                    area: Rect::new(x, area.y, width, area.height),
                    target: HitTarget::Tab(i),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_layout_positions() {
        let strip = TabStrip::layout(&titles(&["Popular", "Burgers", "Desserts"]), 0, 80);
        assert_eq!(strip.tabs, vec![(1, 9), (11, 9), (21, 10)]);
        assert_eq!(strip.total_width, 32);
        assert_eq!(strip.offset, 0);
    }

    #[test]
    fn test_active_tab_scrolled_into_view() {
        let names = titles(&["Breakfast", "Lunch", "Dinner", "Drinks", "Desserts", "Sides"]);
        let strip = TabStrip::layout(&names, 3, 20);
        let (x, _) = strip.tabs[3];
        assert_eq!(strip.offset, x - LEADING);

        // near the end the strip stops at its content edge
        let last = TabStrip::layout(&names, 5, 20);
        assert_eq!(last.offset, last.total_width - 20);
    }

    #[test]
    fn test_screen_span_clips() {
        let names = titles(&["Popular", "Burgers", "Desserts"]);
        let mut strip = TabStrip::layout(&names, 0, 12);
        strip.offset = 5;
        let area = Rect::new(0, 4, 12, 3);
        assert_eq!(strip.screen_span(0, area), Some((0, 5)));
        assert_eq!(strip.screen_span(1, area), Some((6, 6)));
        assert_eq!(strip.screen_span(2, area), None);
    }

    #[test]
    fn test_empty_titles() {
        let strip = TabStrip::layout(&[], 0, 40);
        assert_eq!(strip.total_width, 0);
        assert_eq!(strip.offset, 0);
    }
}

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let bar = Style::default().bg(theme.bg2);

        let (status_text, status_style) = if let Some(err) = &app.error_message {
            (format!(" {} ", err), bar.fg(theme.error))
        } else if let Some(msg) = &app.status_message {
            (format!(" {} ", msg), bar.fg(theme.info))
        } else {
            let titles = app.engine.tab_titles();
            let section = app
                .engine
                .active_section()
                .and_then(|i| titles.get(i).map(|t| (i, t)));
            let text = match section {
                Some((i, title)) => format!(
                    " {} | {}/{} | offset {:.0}{}",
                    title,
                    i + 1,
                    titles.len(),
                    app.list.offset(),
                    if app.engine.is_suppressed() { " | locked" } else { "" }
                ),
                None => " (empty catalog)".to_string(),
            };
            (text, bar.fg(theme.fg0))
        };

        let help_hint = " ]/[:tabs 1-9:jump j/k:scroll q:quit ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, status_style),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, bar.fg(theme.muted)),
        ]);

        frame.render_widget(Paragraph::new(line).style(bar), area);
    }
}

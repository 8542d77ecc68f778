use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::state::AppState;

use super::Component;

/// Key hints shown in the status bar.
const HINTS: &[(&str, &str)] = &[
    ("q", "quit"),
    ("j/k", "move"),
    ("n/p", "hunk"),
    ("t/b", "expand"),
    ("Enter", "show all"),
    ("y/Y", "copy"),
    ("[/]", "pair"),
    ("?", "help"),
];

/// Full binding list for the help overlay.
const HELP: &[(&str, &str)] = &[
    ("j / k, ↓ / ↑", "move the cursor"),
    ("Space, PgDn / PgUp", "page down / up"),
    ("g / G", "first / last row"),
    ("n", "next hunk"),
    ("p", "previous hunk"),
    ("t", "reveal lines at the top of a collapsed region"),
    ("b", "reveal lines at the bottom of a collapsed region"),
    ("Enter", "show the whole collapsed region"),
    ("y", "copy the right side of the range under the cursor"),
    ("Y", "copy the left side of the range under the cursor"),
    ("w", "toggle ignoring all whitespace"),
    ("s", "toggle ignoring changes in amount of whitespace"),
    ("J", "toggle JSON normalization"),
    ("a", "cycle the diff algorithm"),
    ("z", "toggle line wrapping"),
    ("+ / -", "more / less context"),
    ("] / [", "next / previous file pair"),
    ("?", "close this help"),
    ("q, Ctrl-C", "quit"),
];

pub struct ActionHud;

impl Component for ActionHud {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;

        if let Some((ref msg, is_error)) = state.status_message {
            let color = if is_error { theme.error } else { theme.success };
            let bar = Paragraph::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(msg.as_str(), Style::default().fg(color)),
            ]))
            .style(Style::default().bg(theme.surface));
            frame.render_widget(bar, area);
            return;
        }

        let mut spans = vec![Span::raw(" ")];
        for (i, (key, desc)) in HINTS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!("[{key}]"),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(*desc, Style::default().fg(theme.text_muted)));
        }

        let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.surface));
        frame.render_widget(bar, area);
    }
}

pub fn render_help(frame: &mut Frame, state: &AppState) {
    let theme = &state.theme;
    let area = frame.area();
    let width = 72.min(area.width.saturating_sub(4));
    let height = (HELP.len() as u16 + 2).min(area.height.saturating_sub(2));
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    let dialog_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    let key_width = HELP.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!(" {key:<key_width$}  "),
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*desc, Style::default().fg(theme.text)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), dialog_area);
}

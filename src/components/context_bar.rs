use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::AppState;

use super::Component;

pub struct ContextBar;

impl Component for ContextBar {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let options = &state.options;
        let ws_label = if options.ignore_whitespace {
            "[ws:ignored]"
        } else if options.ignore_space_change {
            "[ws:amount]"
        } else {
            "[ws:shown]"
        };
        let mut flags = format!("[{}]", options.algorithm.name());
        if options.normalize_json {
            flags.push_str(" [json]");
        }
        if state.wrap_lines {
            flags.push_str(" [wrap]");
        }
        let session = &state.session;
        let hunks = session.ops().iter().filter(|r| r.kind.is_change()).count();

        let line = Line::from(vec![
            Span::styled(
                " codediff ",
                Style::default().fg(Color::Black).bg(theme.accent),
            ),
            Span::raw("  "),
            Span::styled(
                format!("pair {}/{}", state.current_pair + 1, state.pairs.len().max(1)),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{hunks} changed ranges"),
                Style::default().fg(theme.warning),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[context:{}]", options.context_lines),
                Style::default().fg(theme.text_muted),
            ),
            Span::raw(" "),
            Span::styled(ws_label, Style::default().fg(theme.text_muted)),
            Span::raw(" "),
            Span::styled(flags, Style::default().fg(theme.text_muted)),
        ]);

        let bar = Paragraph::new(line).style(Style::default().bg(theme.surface));
        frame.render_widget(bar, area);
    }
}

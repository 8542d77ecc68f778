use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::diff::lines::expand_tabs;
use crate::diff::{DisplayRow, LineRow, LineSlot, RangeKind, SkipRow, SlotContent};
use crate::highlight::{parse_fragment, style_for_class};
use crate::state::{AppState, DiffSession, LoadState};
use crate::theme::Theme;

use super::Component;

const GUTTER_WIDTH: usize = 5;

pub struct DiffView;

impl Component for DiffView {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let session = &state.session;

        let block = Block::default()
            .title(format_title(state))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &session.load {
            LoadState::Loading => {
                let msg = Paragraph::new(" Loading…").style(Style::default().fg(theme.text_muted));
                frame.render_widget(msg, inner);
            }
            LoadState::Failed(err) => {
                let msg = Paragraph::new(vec![
                    Line::from(Span::styled(
                        " Unable to load diff",
                        Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(format!(" {err}"), Style::default().fg(theme.error))),
                ])
                .wrap(Wrap { trim: false });
                frame.render_widget(msg, inner);
            }
            LoadState::Ready if session.gate.is_armed() => {
                render_gate(frame, inner, session, theme);
            }
            LoadState::Ready => render_split(frame, inner, session, theme),
        }
    }
}

fn format_title(state: &AppState) -> String {
    let session = &state.session;
    let mut title = format!(" {}", session.title);
    if state.pairs.len() > 1 {
        title.push_str(&format!(" ({}/{})", state.current_pair + 1, state.pairs.len()));
    }
    if session.load == LoadState::Ready {
        if session.is_plain_text() {
            title.push_str(" [plain text]");
        } else if let Some(lang) = session.language {
            title.push_str(&format!(" [{lang}]"));
        }
        if let Some(no_changes) = session.no_changes() {
            title.push(' ');
            title.push_str(no_changes.message());
        }
    }
    title.push(' ');
    title
}

fn render_gate(frame: &mut Frame, area: Rect, session: &DiffSession, theme: &Theme) {
    let first_len = |lines: &[String]| lines.first().map_or(0, |l| l.chars().count());
    let longest = first_len(&session.before_lines).max(first_len(&session.after_lines));

    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!(" This diff contains a line of {longest} characters."),
            Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " It is probably minified or generated. Rendering it may be very slow.",
            Style::default().fg(theme.text),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled(
                " [Enter]",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" render anyway  ", Style::default().fg(theme.text_muted)),
            Span::styled("[ / ]", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled(" other pairs  ", Style::default().fg(theme.text_muted)),
            Span::styled("[q]", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled(" quit", Style::default().fg(theme.text_muted)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// Text columns available to each half of a diff pane `pane_width` wide,
/// borders included. Wrapped rows break at this width.
pub fn wrap_width_for(pane_width: u16) -> usize {
    let inner = pane_width.saturating_sub(2);
    (inner / 2).saturating_sub(GUTTER_WIDTH as u16 + 1).max(1) as usize
}

fn render_split(frame: &mut Frame, area: Rect, session: &DiffSession, theme: &Theme) {
    let left_width = area.width / 2;
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(left_width), Constraint::Min(0)])
        .split(area);
    let (left_width, right_width) = (halves[0].width, halves[1].width);

    let height = area.height as usize;
    let mut left = Vec::with_capacity(height);
    let mut right = Vec::with_capacity(height);
    for (index, row) in session.current_rows().iter().enumerate().skip(session.scroll_offset) {
        if left.len() >= height {
            break;
        }
        let cursor = index == session.cursor_row;
        match row {
            DisplayRow::Line(line) => {
                let before = half_line(line, line.before.as_ref(), Half::Before, cursor, theme);
                let after = half_line(line, line.after.as_ref(), Half::After, cursor, theme);
                let (before_filler, after_filler) = (before.filler(left_width), after.filler(right_width));
                let mut before = before.layout(left_width, session.wrap_width);
                let mut after = after.layout(right_width, session.wrap_width);
                // Both halves of a row take the same number of screen lines.
                let rows = before.len().max(after.len());
                before.resize(rows, before_filler);
                after.resize(rows, after_filler);
                left.extend(before);
                right.extend(after);
            }
            DisplayRow::Skip(skip) => {
                left.push(skip_label(skip, cursor, left_width, theme));
                right.push(skip_header(skip, cursor, right_width, theme));
            }
        }
    }
    left.truncate(height);
    right.truncate(height);

    frame.render_widget(Paragraph::new(left), halves[0]);
    frame.render_widget(Paragraph::new(right), halves[1]);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Half {
    Before,
    After,
}

fn gutter_style(selected: bool, cursor: bool, theme: &Theme) -> Style {
    let mut style = Style::default().fg(theme.gutter_fg);
    if selected {
        style = style.fg(theme.selected_gutter_fg).add_modifier(Modifier::BOLD);
    }
    if cursor {
        style = style.fg(Color::Black).bg(theme.accent);
    }
    style
}

fn change_colors(kind: RangeKind, half: Half, theme: &Theme) -> Option<(Color, Color)> {
    match (kind, half) {
        (RangeKind::Delete | RangeKind::Replace, Half::Before) => Some((theme.delete_bg, theme.delete_fg)),
        (RangeKind::Insert | RangeKind::Replace, Half::After) => Some((theme.insert_bg, theme.insert_fg)),
        _ => None,
    }
}

/// One side of a line row before it is fitted to the pane.
struct HalfLine {
    gutter: String,
    gutter_style: Style,
    content: Vec<Span<'static>>,
    /// Background carried to the edge of the pane.
    fill: Option<Style>,
}

impl HalfLine {
    /// Screen lines for this half: one when truncating, as many as the text
    /// needs at `wrap` columns otherwise.
    fn layout(self, width: u16, wrap: Option<usize>) -> Vec<Line<'static>> {
        let pieces = match wrap {
            Some(columns) => wrap_spans(self.content, columns.max(1)),
            None => vec![self.content],
        };
        let blank_gutter = " ".repeat(GUTTER_WIDTH + 1);
        pieces
            .into_iter()
            .enumerate()
            .map(|(i, piece)| {
                let gutter = if i == 0 { self.gutter.clone() } else { blank_gutter.clone() };
                let text_width: usize = piece.iter().map(|s| s.content.chars().count()).sum();
                let used = GUTTER_WIDTH + 1 + text_width;
                let mut spans = vec![Span::styled(gutter, self.gutter_style)];
                spans.extend(piece);
                if let Some(fill) = self.fill {
                    let pad = (width as usize).saturating_sub(used);
                    if pad > 0 {
                        spans.push(Span::styled(" ".repeat(pad), fill));
                    }
                }
                Line::from(spans)
            })
            .collect()
    }

    /// Blank continuation line, for when the other half wrapped further.
    fn filler(&self, width: u16) -> Line<'static> {
        let mut spans = vec![Span::styled(" ".repeat(GUTTER_WIDTH + 1), self.gutter_style)];
        if let Some(fill) = self.fill {
            spans.push(Span::styled(
                " ".repeat((width as usize).saturating_sub(GUTTER_WIDTH + 1)),
                fill,
            ));
        }
        Line::from(spans)
    }
}

/// Break styled text into runs of at most `columns` characters.
fn wrap_spans(spans: Vec<Span<'static>>, columns: usize) -> Vec<Vec<Span<'static>>> {
    let mut lines = vec![Vec::new()];
    let mut used = 0;
    for span in spans {
        let mut chunk = String::new();
        for c in span.content.chars() {
            if used == columns {
                if let Some(line) = lines.last_mut().filter(|_| !chunk.is_empty()) {
                    line.push(Span::styled(std::mem::take(&mut chunk), span.style));
                }
                lines.push(Vec::new());
                used = 0;
            }
            chunk.push(c);
            used += 1;
        }
        if let Some(line) = lines.last_mut().filter(|_| !chunk.is_empty()) {
            line.push(Span::styled(chunk, span.style));
        }
    }
    lines
}

fn half_line(row: &LineRow, slot: Option<&LineSlot>, half: Half, cursor: bool, theme: &Theme) -> HalfLine {
    let marker = if row.selected { '▶' } else { ' ' };
    let gutter_style = gutter_style(row.selected, cursor, theme);

    let Some(slot) = slot else {
        return HalfLine {
            gutter: format!("{:>GUTTER_WIDTH$}{marker}", ""),
            gutter_style,
            content: Vec::new(),
            fill: Some(Style::default().bg(theme.empty_bg)),
        };
    };

    let colors = change_colors(row.kind, half, theme);
    let mut base = Style::default().fg(theme.text);
    if let Some((bg, _)) = colors {
        base = base.bg(bg);
    }
    if cursor && colors.is_none() {
        base = base.bg(theme.cursor_bg);
    }

    let mut content = Vec::new();
    match &slot.content {
        SlotContent::Markup(fragment) => {
            for segment in parse_fragment(fragment) {
                let mut style = match segment.class {
                    Some(ref class) => base.patch(style_for_class(class, &theme.syntax)),
                    None => base,
                };
                if let Some((bg, _)) = colors {
                    style = style.bg(bg);
                }
                content.push(Span::styled(expand_tabs(&segment.text), style));
            }
        }
        SlotContent::Text(text) => {
            let style = match colors {
                Some((_, fg)) => base.fg(fg),
                None => base,
            };
            content.push(Span::styled(expand_tabs(text), style));
        }
    }

    HalfLine {
        gutter: format!("{:>GUTTER_WIDTH$}{marker}", slot.line_number()),
        gutter_style,
        content,
        fill: (colors.is_some() || cursor).then_some(base),
    }
}

fn skip_label<'a>(skip: &SkipRow, cursor: bool, width: u16, theme: &Theme) -> Line<'a> {
    let marker = if skip.selected { '▶' } else { ' ' };
    let mut style = Style::default().fg(theme.skip_fg).bg(theme.skip_bg);
    if cursor {
        style = style.add_modifier(Modifier::BOLD);
    }
    let rows = skip.range.num_rows;
    let noun = if rows == 1 { "line" } else { "lines" };
    let label = if cursor {
        format!("⋯ {rows} {noun} hidden  [t]↑ [b]↓ [Enter] all")
    } else {
        format!("⋯ {rows} {noun} hidden")
    };
    let used = GUTTER_WIDTH + 1 + label.chars().count();
    Line::from(vec![
        Span::styled(format!("{:>GUTTER_WIDTH$}{marker}", "⋯"), gutter_style(skip.selected, cursor, theme)),
        Span::styled(label, style),
        Span::styled(" ".repeat((width as usize).saturating_sub(used)), style),
    ])
}

fn skip_header<'a>(skip: &SkipRow, cursor: bool, width: u16, theme: &Theme) -> Line<'a> {
    let header = expand_tabs(skip.range.header.as_deref().unwrap_or_default());
    let style = Style::default().fg(theme.skip_header_fg).bg(theme.skip_bg);
    let used = GUTTER_WIDTH + 1 + header.chars().count();
    Line::from(vec![
        Span::styled(format!("{:>GUTTER_WIDTH$} ", "⋯"), gutter_style(false, cursor, theme)),
        Span::styled(header, style),
        Span::styled(" ".repeat((width as usize).saturating_sub(used)), style),
    ])
}

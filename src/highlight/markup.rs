//! Line-oriented handling of highlighter markup.
//!
//! Highlighters see the whole file, so a span (a block comment, a multi-line
//! string) may contain line breaks. Rows are rendered one line at a time, so
//! each line needs its own balanced fragment.

use crate::diff::lines::line_break;

/// Re-partition whole-text markup into one balanced fragment per line.
///
/// Spans still open at a line break are closed at the end of that line and
/// reopened with the identical open tag before the next content on the
/// following line. A span that closes right at a line boundary is not
/// reopened. Stray carriage returns are dropped, matching
/// [`string_as_lines`](crate::diff::lines::string_as_lines).
pub fn distribute_spans(html: &str) -> Vec<String> {
    let brk = line_break(html);
    let mut lines = Vec::new();
    let mut current = String::new();
    // Open tags, outermost first. Only the first `live` are emitted on the
    // current line; the rest are waiting to be reopened.
    let mut open: Vec<&str> = Vec::new();
    let mut live = 0usize;
    let mut rest = html;

    while !rest.is_empty() {
        if rest.starts_with('<') {
            if let Some(end) = rest.find('>') {
                let tag = &rest[..=end];
                rest = &rest[end + 1..];
                if tag.starts_with("</") {
                    if open.len() > live {
                        open.pop();
                    } else if open.pop().is_some() {
                        current.push_str(tag);
                        live -= 1;
                    }
                } else if tag.ends_with("/>") {
                    reopen(&mut current, &open, &mut live);
                    current.push_str(tag);
                } else {
                    reopen(&mut current, &open, &mut live);
                    current.push_str(tag);
                    open.push(tag);
                    live += 1;
                }
                continue;
            }
        }

        let text_end = if rest.starts_with('<') {
            // Unterminated tag: treat the remainder as text.
            rest.len()
        } else {
            rest.find('<').unwrap_or(rest.len())
        };
        let text = &rest[..text_end];
        rest = &rest[text_end..];

        for (i, piece) in text.split(brk).enumerate() {
            if i > 0 {
                close_live(&mut current, &open, live);
                live = 0;
                lines.push(std::mem::take(&mut current));
            }
            let piece = piece.replace(['\r', '\n'], "");
            if !piece.is_empty() {
                reopen(&mut current, &open, &mut live);
                current.push_str(&piece);
            }
        }
    }

    close_live(&mut current, &open, live);
    lines.push(current);
    lines
}

fn reopen(out: &mut String, open: &[&str], live: &mut usize) {
    for tag in &open[*live..] {
        out.push_str(tag);
    }
    *live = open.len();
}

fn close_live(out: &mut String, open: &[&str], live: usize) {
    for tag in open[..live].iter().rev() {
        out.push_str("</");
        out.push_str(tag_name(tag));
        out.push('>');
    }
}

fn tag_name(open_tag: &str) -> &str {
    let inner = open_tag.trim_start_matches('<');
    let end = inner
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(inner.len());
    &inner[..end]
}

/// Escape text for inclusion in markup.
pub fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let c = match &rest[1..semi] {
                "lt" => '<',
                "gt" => '>',
                "amp" => '&',
                "quot" => '"',
                "apos" | "#39" | "#x27" => '\'',
                _ => return None,
            };
            Some((c, semi + 1))
        });
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Plain text of a fragment: tags removed, entities decoded.
#[cfg(test)]
pub fn strip_markup(fragment: &str) -> String {
    parse_fragment(fragment)
        .into_iter()
        .map(|seg| seg.text)
        .collect()
}

/// A run of text and the class of the innermost span around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSegment {
    pub text: String,
    pub class: Option<String>,
}

/// Split one line's fragment into styled text runs.
pub fn parse_fragment(fragment: &str) -> Vec<MarkupSegment> {
    let mut segments: Vec<MarkupSegment> = Vec::new();
    let mut classes: Vec<Option<String>> = Vec::new();
    let mut rest = fragment;

    while !rest.is_empty() {
        if rest.starts_with('<') {
            if let Some(end) = rest.find('>') {
                let tag = &rest[..=end];
                rest = &rest[end + 1..];
                if tag.starts_with("</") {
                    classes.pop();
                } else if !tag.ends_with("/>") {
                    classes.push(class_attr(tag));
                }
                continue;
            }
        }
        let text_end = if rest.starts_with('<') {
            rest.len()
        } else {
            rest.find('<').unwrap_or(rest.len())
        };
        let text = decode_entities(&rest[..text_end]);
        rest = &rest[text_end..];
        if text.is_empty() {
            continue;
        }
        let class = classes.iter().rev().find_map(|c| c.clone());
        if let Some(prev) = segments.last_mut().filter(|seg| seg.class == class) {
            prev.text.push_str(&text);
        } else {
            segments.push(MarkupSegment { text, class });
        }
    }

    segments
}

fn class_attr(tag: &str) -> Option<String> {
    let start = tag.find("class=")? + "class=".len();
    let value = &tag[start..];
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &value[1..];
    let end = value.find(quote)?;
    Some(value[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::lines::string_as_lines;

    const KW: &str = "<span class=\"hl-keyword\">";
    const CM: &str = "<span class=\"hl-comment\">";

    #[test]
    fn test_single_line_spans_untouched() {
        let html = format!("{KW}fn</span> main() {{}}\n{KW}let</span> x;");
        let lines = distribute_spans(&html);
        assert_eq!(
            lines,
            vec![format!("{KW}fn</span> main() {{}}"), format!("{KW}let</span> x;")]
        );
    }

    #[test]
    fn test_span_crossing_lines_is_split() {
        let html = format!("a {CM}/* one\ntwo\nthree */</span> b");
        let lines = distribute_spans(&html);
        assert_eq!(
            lines,
            vec![
                format!("a {CM}/* one</span>"),
                format!("{CM}two</span>"),
                format!("{CM}three */</span> b"),
            ]
        );
    }

    #[test]
    fn test_nested_spans_reopen_in_order() {
        let html = format!("{CM}x{KW}y\nz</span>w</span>");
        let lines = distribute_spans(&html);
        assert_eq!(
            lines,
            vec![
                format!("{CM}x{KW}y</span></span>"),
                format!("{CM}{KW}z</span>w</span>"),
            ]
        );
    }

    #[test]
    fn test_span_closed_at_boundary_not_reopened() {
        let html = format!("{CM}// note\n</span>next");
        let lines = distribute_spans(&html);
        assert_eq!(lines, vec![format!("{CM}// note</span>"), "next".to_string()]);
    }

    #[test]
    fn test_blank_lines_inside_span() {
        let html = format!("{CM}a\n\nb</span>");
        let lines = distribute_spans(&html);
        assert_eq!(
            lines,
            vec![
                format!("{CM}a</span>"),
                String::new(),
                format!("{CM}b</span>"),
            ]
        );
    }

    #[test]
    fn test_round_trip_matches_line_splitter() {
        let text = "fn main() {\n    /* a <b> & c\n  d */\n    let s = \"x\";\n}\n";
        let mut html = String::new();
        html.push_str(KW);
        html.push_str("fn</span> main() {\n    ");
        html.push_str(CM);
        escape_into(&mut html, "/* a <b> & c\n  d */");
        html.push_str("</span>\n    ");
        html.push_str(KW);
        html.push_str("let</span> s = ");
        html.push_str("<span class=\"hl-string\">");
        escape_into(&mut html, "\"x\"");
        html.push_str("</span>;\n}\n");

        let fragments = distribute_spans(&html);
        let expected = string_as_lines(Some(text));
        assert_eq!(fragments.len(), expected.len());
        let stripped: Vec<String> = fragments.iter().map(|f| strip_markup(f)).collect();
        assert_eq!(stripped, expected);
    }

    #[test]
    fn test_crlf_markup() {
        let lines = distribute_spans("a\r\nb\r\n");
        assert_eq!(lines, vec!["a", "b", ""]);
    }

    #[test]
    fn test_empty_input_is_one_line() {
        assert_eq!(distribute_spans(""), vec![String::new()]);
    }

    #[test]
    fn test_parse_fragment_innermost_class() {
        let frag = format!("x {CM}a{KW}b</span>c</span> &lt;y&gt;");
        let segs = parse_fragment(&frag);
        assert_eq!(
            segs,
            vec![
                MarkupSegment { text: "x ".into(), class: None },
                MarkupSegment { text: "a".into(), class: Some("hl-comment".into()) },
                MarkupSegment { text: "b".into(), class: Some("hl-keyword".into()) },
                MarkupSegment { text: "c".into(), class: Some("hl-comment".into()) },
                MarkupSegment { text: " <y>".into(), class: None },
            ]
        );
    }

    #[test]
    fn test_unknown_entity_kept_literally() {
        assert_eq!(strip_markup("a &nbsp; b &amp; c"), "a &nbsp; b & c");
    }
}

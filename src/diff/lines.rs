/// Pick the line terminator used by `text`.
///
/// `\n` unless the text only ever uses bare `\r` (classic Mac line endings).
pub fn line_break(text: &str) -> char {
    if !text.contains('\n') && text.contains('\r') {
        '\r'
    } else {
        '\n'
    }
}

/// Split a text blob into logical lines, indexed the same way diff ranges are.
///
/// No terminator is kept on any line. A trailing terminator produces a
/// trailing empty line, and an empty text is a single empty line. An absent
/// side (pure add or delete) has no lines at all.
pub fn string_as_lines(text: Option<&str>) -> Vec<String> {
    let Some(text) = text else {
        return Vec::new();
    };
    let brk = line_break(text);
    text.split(brk)
        .map(|line| line.replace(['\r', '\n'], ""))
        .collect()
}

/// Columns a tab advances on screen.
pub const TAB_WIDTH: usize = 4;

/// Line text as laid out on screen, tabs turned into spaces.
pub fn expand_tabs(text: &str) -> String {
    if text.contains('\t') {
        text.replace('\t', &" ".repeat(TAB_WIDTH))
    } else {
        text.to_string()
    }
}

/// Terminal columns `text` occupies once tabs are expanded.
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| if c == '\t' { TAB_WIDTH } else { 1 }).sum()
}

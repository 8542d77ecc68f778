use ratatui::style::{Modifier, Style};

use crate::theme::SyntaxColors;

/// Recognized highlight capture names. Tree-sitter reports highlights as
/// indices into this list.
pub const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "escape",
    "function",
    "function.builtin",
    "function.method",
    "keyword",
    "label",
    "number",
    "operator",
    "property",
    "punctuation",
    "punctuation.bracket",
    "punctuation.delimiter",
    "punctuation.special",
    "string",
    "string.special",
    "tag",
    "type",
    "type.builtin",
    "variable",
    "variable.builtin",
    "variable.parameter",
];

const CLASS_PREFIX: &str = "hl-";

pub fn highlight_names_vec() -> Vec<String> {
    HIGHLIGHT_NAMES.iter().map(|s| s.to_string()).collect()
}

/// Markup class for a highlight index, e.g. `hl-function-method`.
pub fn class_for_highlight(idx: usize) -> Option<String> {
    HIGHLIGHT_NAMES
        .get(idx)
        .map(|name| format!("{CLASS_PREFIX}{}", name.replace('.', "-")))
}

/// Style for a markup class produced by [`class_for_highlight`].
///
/// Unknown classes fall back to the default foreground.
pub fn style_for_class(class: &str, colors: &SyntaxColors) -> Style {
    let name = class.strip_prefix(CLASS_PREFIX).unwrap_or(class);
    let base = Style::default();
    match name {
        "comment" => base.fg(colors.comment).add_modifier(Modifier::ITALIC),
        "keyword" => base.fg(colors.keyword).add_modifier(Modifier::BOLD),
        "string" | "string-special" | "escape" => base.fg(colors.string),
        "number" | "constant" | "constant-builtin" | "attribute" => base.fg(colors.number),
        "function" | "function-builtin" | "function-method" => base.fg(colors.function),
        "type" | "type-builtin" | "constructor" => base.fg(colors.type_name),
        "variable" | "variable-builtin" | "variable-parameter" => base.fg(colors.variable),
        "operator" => base.fg(colors.operator),
        "property" | "label" => base.fg(colors.property),
        "tag" => base.fg(colors.tag),
        n if n.starts_with("punctuation") => base.fg(colors.punctuation),
        _ => base.fg(colors.default_fg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn test_class_names() {
        let idx = HIGHLIGHT_NAMES.iter().position(|n| *n == "function.method").unwrap();
        assert_eq!(class_for_highlight(idx).as_deref(), Some("hl-function-method"));
        assert_eq!(class_for_highlight(HIGHLIGHT_NAMES.len()), None);
    }

    #[test]
    fn test_style_lookup() {
        let theme = Theme::from_name("one-dark");
        let syntax = &theme.syntax;
        assert_eq!(style_for_class("hl-keyword", syntax).fg, Some(syntax.keyword));
        assert_eq!(style_for_class("hl-punctuation-bracket", syntax).fg, Some(syntax.punctuation));
        assert_eq!(style_for_class("something-else", syntax).fg, Some(syntax.default_fg));
    }
}

use std::collections::BTreeMap;

use ratatui::style::Color;
use serde::Deserialize;

/// Color slots for the diff UI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Chrome
    pub accent: Color,
    pub text: Color,
    pub text_muted: Color,
    pub surface: Color,
    pub cursor_bg: Color,

    // Gutter
    pub gutter_fg: Color,
    pub selected_gutter_fg: Color,

    // Changes
    pub insert_bg: Color,
    pub delete_bg: Color,
    pub insert_fg: Color,
    pub delete_fg: Color,
    /// Background of the side of a row that has no line.
    pub empty_bg: Color,

    // Collapsed regions
    pub skip_bg: Color,
    pub skip_fg: Color,
    pub skip_header_fg: Color,

    // Status
    pub success: Color,
    pub error: Color,
    pub warning: Color,

    pub syntax: SyntaxColors,
}

#[derive(Debug, Clone)]
pub struct SyntaxColors {
    pub comment: Color,
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub function: Color,
    pub type_name: Color,
    pub variable: Color,
    pub operator: Color,
    pub property: Color,
    pub tag: Color,
    pub punctuation: Color,
    pub default_fg: Color,
}

pub const THEME_NAMES: &[&str] = &["one-dark", "github-dark", "dracula", "solarized-dark"];

impl Theme {
    /// Built-in theme by name; unknown names get the default.
    pub fn from_name(name: &str) -> Self {
        match name {
            "github-dark" => github_dark(),
            "dracula" => dracula(),
            "solarized-dark" => solarized_dark(),
            other => {
                if !THEME_NAMES.contains(&other) {
                    tracing::warn!(theme = other, known = ?THEME_NAMES, "unknown theme, using one-dark");
                }
                one_dark()
            }
        }
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Color> {
        let slot = match name {
            "accent" => &mut self.accent,
            "text" => &mut self.text,
            "text_muted" => &mut self.text_muted,
            "surface" => &mut self.surface,
            "cursor_bg" => &mut self.cursor_bg,
            "gutter_fg" => &mut self.gutter_fg,
            "selected_gutter_fg" => &mut self.selected_gutter_fg,
            "insert_bg" => &mut self.insert_bg,
            "delete_bg" => &mut self.delete_bg,
            "insert_fg" => &mut self.insert_fg,
            "delete_fg" => &mut self.delete_fg,
            "empty_bg" => &mut self.empty_bg,
            "skip_bg" => &mut self.skip_bg,
            "skip_fg" => &mut self.skip_fg,
            "skip_header_fg" => &mut self.skip_header_fg,
            "success" => &mut self.success,
            "error" => &mut self.error,
            "warning" => &mut self.warning,
            _ => return None,
        };
        Some(slot)
    }
}

impl SyntaxColors {
    fn slot_mut(&mut self, name: &str) -> Option<&mut Color> {
        let slot = match name {
            "comment" => &mut self.comment,
            "keyword" => &mut self.keyword,
            "string" => &mut self.string,
            "number" => &mut self.number,
            "function" => &mut self.function,
            "type_name" => &mut self.type_name,
            "variable" => &mut self.variable,
            "operator" => &mut self.operator,
            "property" => &mut self.property,
            "tag" => &mut self.tag,
            "punctuation" => &mut self.punctuation,
            "default_fg" => &mut self.default_fg,
            _ => return None,
        };
        Some(slot)
    }
}

pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// `[colors]` table of the config file: slot name to hex color, plus a
/// nested `[colors.syntax]` table.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThemeOverrides {
    #[serde(default)]
    pub syntax: BTreeMap<String, String>,
    #[serde(flatten)]
    pub slots: BTreeMap<String, String>,
}

pub fn apply_overrides(theme: &mut Theme, overrides: &ThemeOverrides) {
    for (name, hex) in &overrides.slots {
        apply_one(theme.slot_mut(name), "colors", name, hex);
    }
    for (name, hex) in &overrides.syntax {
        apply_one(theme.syntax.slot_mut(name), "colors.syntax", name, hex);
    }
}

fn apply_one(slot: Option<&mut Color>, table: &str, name: &str, hex: &str) {
    match (slot, parse_hex_color(hex)) {
        (Some(slot), Some(color)) => *slot = color,
        (None, _) => tracing::warn!(table, name, "unknown color slot"),
        (_, None) => tracing::warn!(table, name, hex, "invalid hex color"),
    }
}

// ── Built-in themes ──────────────────────────────────────────────

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(r, g, b)
}

fn one_dark() -> Theme {
    Theme {
        name: "one-dark".to_string(),
        accent: Color::Cyan,
        text: rgb(171, 178, 191),
        text_muted: Color::DarkGray,
        surface: rgb(30, 30, 30),
        cursor_bg: rgb(44, 49, 60),
        gutter_fg: rgb(92, 99, 112),
        selected_gutter_fg: Color::Yellow,
        insert_bg: rgb(0, 40, 0),
        delete_bg: rgb(50, 0, 0),
        insert_fg: Color::Green,
        delete_fg: Color::Red,
        empty_bg: rgb(24, 24, 24),
        skip_bg: rgb(33, 37, 43),
        skip_fg: rgb(97, 175, 239),
        skip_header_fg: Color::Magenta,
        success: Color::Green,
        error: Color::Red,
        warning: Color::Yellow,
        syntax: SyntaxColors {
            comment: rgb(106, 115, 125),
            keyword: rgb(198, 120, 221),
            string: rgb(152, 195, 121),
            number: rgb(209, 154, 102),
            function: rgb(97, 175, 239),
            type_name: rgb(229, 192, 123),
            variable: rgb(171, 178, 191),
            operator: rgb(86, 182, 194),
            property: rgb(224, 108, 117),
            tag: rgb(224, 108, 117),
            punctuation: rgb(140, 140, 140),
            default_fg: rgb(171, 178, 191),
        },
    }
}

fn github_dark() -> Theme {
    Theme {
        name: "github-dark".to_string(),
        accent: rgb(88, 166, 255),
        text: rgb(230, 237, 243),
        text_muted: rgb(125, 133, 144),
        surface: rgb(22, 27, 34),
        cursor_bg: rgb(38, 50, 72),
        gutter_fg: rgb(110, 118, 129),
        selected_gutter_fg: rgb(210, 153, 34),
        insert_bg: rgb(18, 40, 24),
        delete_bg: rgb(50, 18, 18),
        insert_fg: rgb(63, 185, 80),
        delete_fg: rgb(248, 81, 73),
        empty_bg: rgb(13, 17, 23),
        skip_bg: rgb(21, 32, 50),
        skip_fg: rgb(88, 166, 255),
        skip_header_fg: rgb(188, 140, 255),
        success: rgb(63, 185, 80),
        error: rgb(248, 81, 73),
        warning: rgb(210, 153, 34),
        syntax: SyntaxColors {
            comment: rgb(125, 133, 144),
            keyword: rgb(255, 123, 114),
            string: rgb(165, 214, 255),
            number: rgb(121, 192, 255),
            function: rgb(210, 168, 255),
            type_name: rgb(255, 166, 87),
            variable: rgb(230, 237, 243),
            operator: rgb(255, 123, 114),
            property: rgb(121, 192, 255),
            tag: rgb(126, 231, 135),
            punctuation: rgb(125, 133, 144),
            default_fg: rgb(230, 237, 243),
        },
    }
}

fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        accent: rgb(139, 233, 253),
        text: rgb(248, 248, 242),
        text_muted: rgb(98, 114, 164),
        surface: rgb(40, 42, 54),
        cursor_bg: rgb(68, 71, 90),
        gutter_fg: rgb(98, 114, 164),
        selected_gutter_fg: rgb(241, 250, 140),
        insert_bg: rgb(15, 40, 15),
        delete_bg: rgb(45, 10, 10),
        insert_fg: rgb(80, 250, 123),
        delete_fg: rgb(255, 85, 85),
        empty_bg: rgb(30, 31, 40),
        skip_bg: rgb(52, 55, 70),
        skip_fg: rgb(139, 233, 253),
        skip_header_fg: rgb(255, 121, 198),
        success: rgb(80, 250, 123),
        error: rgb(255, 85, 85),
        warning: rgb(241, 250, 140),
        syntax: SyntaxColors {
            comment: rgb(98, 114, 164),
            keyword: rgb(255, 121, 198),
            string: rgb(241, 250, 140),
            number: rgb(189, 147, 249),
            function: rgb(80, 250, 123),
            type_name: rgb(139, 233, 253),
            variable: rgb(248, 248, 242),
            operator: rgb(255, 121, 198),
            property: rgb(189, 147, 249),
            tag: rgb(255, 121, 198),
            punctuation: rgb(248, 248, 242),
            default_fg: rgb(248, 248, 242),
        },
    }
}

fn solarized_dark() -> Theme {
    Theme {
        name: "solarized-dark".to_string(),
        accent: rgb(38, 139, 210),
        text: rgb(147, 161, 161),
        text_muted: rgb(88, 110, 117),
        surface: rgb(0, 34, 43),
        cursor_bg: rgb(7, 54, 66),
        gutter_fg: rgb(88, 110, 117),
        selected_gutter_fg: rgb(181, 137, 0),
        insert_bg: rgb(0, 30, 10),
        delete_bg: rgb(40, 5, 5),
        insert_fg: rgb(133, 153, 0),
        delete_fg: rgb(220, 50, 47),
        empty_bg: rgb(0, 26, 33),
        skip_bg: rgb(3, 44, 55),
        skip_fg: rgb(38, 139, 210),
        skip_header_fg: rgb(211, 54, 130),
        success: rgb(133, 153, 0),
        error: rgb(220, 50, 47),
        warning: rgb(181, 137, 0),
        syntax: SyntaxColors {
            comment: rgb(88, 110, 117),
            keyword: rgb(133, 153, 0),
            string: rgb(42, 161, 152),
            number: rgb(211, 54, 130),
            function: rgb(38, 139, 210),
            type_name: rgb(181, 137, 0),
            variable: rgb(147, 161, 161),
            operator: rgb(133, 153, 0),
            property: rgb(38, 139, 210),
            tag: rgb(220, 50, 47),
            punctuation: rgb(88, 110, 117),
            default_fg: rgb(147, 161, 161),
        },
    }
}

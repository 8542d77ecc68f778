use std::path::Path;

use tree_sitter::QueryError;
use tree_sitter_highlight::HighlightConfiguration;

/// File names whose contents tend to produce noisy false-positive guesses.
pub const HIGHLIGHT_DENYLIST: &[&str] = &["TODO", "README", "NOTES"];

pub struct LanguageEntry {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub file_names: &'static [&'static str],
    config_fn: fn() -> Result<HighlightConfiguration, QueryError>,
}

impl LanguageEntry {
    pub fn config(&self, highlight_names: &[String]) -> Result<HighlightConfiguration, QueryError> {
        let mut config = (self.config_fn)()?;
        config.configure(highlight_names);
        Ok(config)
    }
}

macro_rules! lang {
    ($name:expr, $exts:expr, $files:expr, $lang_fn:expr, $highlights:expr) => {
        LanguageEntry {
            name: $name,
            extensions: $exts,
            file_names: $files,
            config_fn: || HighlightConfiguration::new($lang_fn.into(), $name, $highlights, "", ""),
        }
    };
}

pub fn language_entries() -> Vec<LanguageEntry> {
    vec![
        lang!(
            "rust",
            &["rs"],
            &[],
            tree_sitter_rust::LANGUAGE,
            tree_sitter_rust::HIGHLIGHTS_QUERY
        ),
        lang!(
            "javascript",
            &["js", "jsx", "mjs", "cjs"],
            &[],
            tree_sitter_javascript::LANGUAGE,
            tree_sitter_javascript::HIGHLIGHT_QUERY
        ),
        lang!(
            "typescript",
            &["ts", "tsx", "mts", "cts"],
            &[],
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT,
            tree_sitter_typescript::HIGHLIGHTS_QUERY
        ),
        lang!(
            "python",
            &["py", "pyi", "pyw"],
            &["SConstruct", "SConscript"],
            tree_sitter_python::LANGUAGE,
            tree_sitter_python::HIGHLIGHTS_QUERY
        ),
        lang!(
            "json",
            &["json", "jsonc", "geojson"],
            &[".babelrc", ".eslintrc"],
            tree_sitter_json::LANGUAGE,
            tree_sitter_json::HIGHLIGHTS_QUERY
        ),
        lang!(
            "toml",
            &["toml"],
            &["Cargo.lock", "Pipfile"],
            tree_sitter_toml_ng::LANGUAGE,
            tree_sitter_toml_ng::HIGHLIGHTS_QUERY
        ),
        lang!(
            "css",
            &["css"],
            &[],
            tree_sitter_css::LANGUAGE,
            tree_sitter_css::HIGHLIGHTS_QUERY
        ),
        lang!(
            "html",
            &["html", "htm", "xhtml", "xml", "svg"],
            &[],
            tree_sitter_html::LANGUAGE,
            tree_sitter_html::HIGHLIGHTS_QUERY
        ),
        lang!(
            "go",
            &["go"],
            &[],
            tree_sitter_go::LANGUAGE,
            tree_sitter_go::HIGHLIGHTS_QUERY
        ),
        lang!(
            "ruby",
            &["rb", "rake", "gemspec"],
            &["Gemfile", "Rakefile", "Guardfile"],
            tree_sitter_ruby::LANGUAGE,
            tree_sitter_ruby::HIGHLIGHTS_QUERY
        ),
        lang!(
            "bash",
            &["sh", "bash", "zsh"],
            &["Makefile", "makefile", "GNUmakefile", "Dockerfile", ".bashrc", ".zshrc"],
            tree_sitter_bash::LANGUAGE,
            tree_sitter_bash::HIGHLIGHT_QUERY
        ),
        lang!(
            "yaml",
            &["yml", "yaml"],
            &[],
            tree_sitter_yaml::LANGUAGE,
            tree_sitter_yaml::HIGHLIGHTS_QUERY
        ),
    ]
}

/// Resolve a user-supplied language name or common alias.
pub fn canonical_language(name: &str) -> Option<&'static str> {
    let lower = name.to_ascii_lowercase();
    let alias = match lower.as_str() {
        "js" => "javascript",
        "ts" => "typescript",
        "py" => "python",
        "sh" | "shell" | "zsh" => "bash",
        "yml" => "yaml",
        "xml" | "svg" => "html",
        "rs" => "rust",
        "rb" => "ruby",
        other => other,
    };
    language_entries()
        .into_iter()
        .map(|entry| entry.name)
        .find(|n| *n == alias)
}

/// Guess a language from a file name alone.
pub fn guess_language_using_file_name(path: &Path) -> Option<&'static str> {
    let entries = language_entries();
    let file_name = path.file_name()?.to_str()?;
    if let Some(entry) = entries.iter().find(|e| e.file_names.contains(&file_name)) {
        return Some(entry.name);
    }
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    entries
        .iter()
        .find(|e| e.extensions.contains(&ext.as_str()))
        .map(|e| e.name)
}

/// Guess a language by sniffing the text itself.
pub fn guess_language_using_contents(text: &str) -> Option<&'static str> {
    let trimmed = text.trim_start();
    let first_line = trimmed.lines().next().unwrap_or("");

    if let Some(shebang) = first_line.strip_prefix("#!") {
        let interpreter = shebang
            .split_whitespace()
            .map(|part| part.rsplit('/').next().unwrap_or(part))
            .find(|part| *part != "env")?;
        return match interpreter.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.') {
            "python" => Some("python"),
            "bash" | "sh" | "zsh" | "dash" | "ksh" => Some("bash"),
            "node" | "deno" | "bun" => Some("javascript"),
            "ruby" => Some("ruby"),
            _ => None,
        };
    }

    let lower_head: String = trimmed.chars().take(64).collect::<String>().to_ascii_lowercase();
    if lower_head.starts_with("<?xml")
        || lower_head.starts_with("<!doctype html")
        || lower_head.starts_with("<html")
        || lower_head.starts_with("<svg")
    {
        return Some("html");
    }

    if (trimmed.starts_with('{') || trimmed.starts_with('['))
        && serde_json::from_str::<serde_json::Value>(text).is_ok()
    {
        return Some("json");
    }

    None
}

/// Pick the language for a file pair.
///
/// The file name wins. Otherwise, for files below the syntax line ceiling
/// whose names are not on the denylist, the longer side is sniffed.
pub fn choose_language(
    path: &Path,
    before: Option<&str>,
    after: Option<&str>,
    num_lines: usize,
    max_lines_for_syntax: usize,
) -> Option<&'static str> {
    if let Some(lang) = guess_language_using_file_name(path) {
        return Some(lang);
    }
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if HIGHLIGHT_DENYLIST.contains(&file_name) || num_lines >= max_lines_for_syntax {
        return None;
    }
    let longer = match (before, after) {
        (Some(b), Some(a)) if a.len() > b.len() => Some(a),
        (Some(b), _) => Some(b),
        (None, a) => a,
    };
    guess_language_using_contents(longer?)
}

use std::collections::HashMap;

use thiserror::Error;
use tree_sitter_highlight::{HighlightConfiguration, HighlightEvent, Highlighter};

use super::languages::language_entries;
use super::markup::{distribute_spans, escape_into};
use super::theme::{class_for_highlight, highlight_names_vec};

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("no highlighter for language `{0}`")]
    UnknownLanguage(String),
    #[error("highlighting failed: {0}")]
    Highlight(#[from] tree_sitter_highlight::Error),
}

pub struct HighlightEngine {
    configs: HashMap<&'static str, HighlightConfiguration>,
}

impl HighlightEngine {
    pub fn new() -> Self {
        let highlight_names = highlight_names_vec();
        let mut configs = HashMap::new();

        for entry in language_entries() {
            match entry.config(&highlight_names) {
                Ok(config) => {
                    configs.insert(entry.name, config);
                }
                Err(err) => {
                    tracing::warn!(language = entry.name, %err, "skipping highlight grammar");
                }
            }
        }

        Self { configs }
    }

    pub fn supports(&self, language: &str) -> bool {
        self.configs.contains_key(language)
    }

    /// Highlight the whole text as escaped markup with `<span class="hl-…">`
    /// around each capture. Spans may contain line breaks.
    pub fn highlight_html(&self, text: &str, language: &str) -> Result<String, HighlightError> {
        let config = self
            .configs
            .get(language)
            .ok_or_else(|| HighlightError::UnknownLanguage(language.to_string()))?;

        let mut highlighter = Highlighter::new();
        let events = highlighter.highlight(config, text.as_bytes(), None, |_| None)?;

        let mut html = String::with_capacity(text.len() * 2);
        for event in events {
            match event? {
                HighlightEvent::Source { start, end } => {
                    if let Some(source) = text.get(start..end) {
                        escape_into(&mut html, source);
                    }
                }
                HighlightEvent::HighlightStart(highlight) => match class_for_highlight(highlight.0) {
                    Some(class) => {
                        html.push_str("<span class=\"");
                        html.push_str(&class);
                        html.push_str("\">");
                    }
                    None => html.push_str("<span>"),
                },
                HighlightEvent::HighlightEnd => html.push_str("</span>"),
            }
        }
        Ok(html)
    }
}

/// Highlight `text` and split the result into per-line fragments.
///
/// Returns `None` when highlighting fails; callers fall back to plain text.
pub fn highlight_text(engine: &HighlightEngine, text: &str, language: &str) -> Option<Vec<String>> {
    match engine.highlight_html(text, language) {
        Ok(html) => Some(distribute_spans(&html)),
        Err(err) => {
            tracing::warn!(language, %err, "falling back to plain text");
            None
        }
    }
}

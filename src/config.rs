use serde::Deserialize;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::highlight::canonical_language;
use crate::source::{DiffAlgorithm, DiffOptions};
use crate::state::SessionSettings;
use crate::theme::{apply_overrides, Theme, ThemeOverrides};

/// Resolved settings for this run. Read-only once built.
#[derive(Debug, Clone)]
pub struct CodediffConfig {
    pub theme: Theme,
    colors: Option<ThemeOverrides>,
    pub min_jump_size: usize,
    pub expand_lines: usize,
    pub max_lines_for_syntax: usize,
    pub context_lines: usize,
    pub ignore_whitespace: bool,
    pub ignore_space_change: bool,
    pub normalize_json: bool,
    pub diff_algorithm: DiffAlgorithm,
    pub wrap_lines: bool,
    pub language: Option<&'static str>,
}

impl Default for CodediffConfig {
    fn default() -> Self {
        Self {
            theme: Theme::from_name("one-dark"),
            colors: None,
            min_jump_size: 10,
            expand_lines: 10,
            max_lines_for_syntax: 25_000,
            context_lines: 8,
            ignore_whitespace: false,
            ignore_space_change: false,
            normalize_json: false,
            diff_algorithm: DiffAlgorithm::Myers,
            wrap_lines: false,
            language: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    colors: Option<ThemeOverrides>,
    #[serde(default)]
    min_jump_size: Option<usize>,
    #[serde(default)]
    expand_lines: Option<usize>,
    #[serde(default)]
    max_lines_for_syntax: Option<usize>,
    #[serde(default)]
    context_lines: Option<usize>,
    #[serde(default)]
    ignore_whitespace: Option<bool>,
    #[serde(default)]
    ignore_space_change: Option<bool>,
    #[serde(default)]
    normalize_json: Option<bool>,
    #[serde(default)]
    diff_algorithm: Option<DiffAlgorithm>,
    #[serde(default)]
    wrap_lines: Option<bool>,
}

fn config_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("codediff");
    path.push("config.toml");
    path
}

impl CodediffConfig {
    fn from_file(file: ConfigFile) -> Self {
        let defaults = Self::default();
        let mut theme = Theme::from_name(file.theme.as_deref().unwrap_or("one-dark"));
        if let Some(ref overrides) = file.colors {
            apply_overrides(&mut theme, overrides);
        }
        Self {
            theme,
            colors: file.colors,
            min_jump_size: file.min_jump_size.unwrap_or(defaults.min_jump_size),
            expand_lines: file.expand_lines.unwrap_or(defaults.expand_lines),
            max_lines_for_syntax: file
                .max_lines_for_syntax
                .unwrap_or(defaults.max_lines_for_syntax),
            context_lines: file.context_lines.unwrap_or(defaults.context_lines),
            ignore_whitespace: file.ignore_whitespace.unwrap_or(defaults.ignore_whitespace),
            ignore_space_change: file
                .ignore_space_change
                .unwrap_or(defaults.ignore_space_change),
            normalize_json: file.normalize_json.unwrap_or(defaults.normalize_json),
            diff_algorithm: file.diff_algorithm.unwrap_or(defaults.diff_algorithm),
            wrap_lines: file.wrap_lines.unwrap_or(defaults.wrap_lines),
            language: None,
        }
    }

    /// Parse config file contents. Malformed input falls back to defaults.
    pub fn parse(contents: &str) -> Self {
        match toml::from_str::<ConfigFile>(contents) {
            Ok(file) => Self::from_file(file),
            Err(err) => {
                tracing::warn!(%err, "malformed config, using defaults");
                Self::default()
            }
        }
    }

    /// Command-line flags win over the file.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref name) = cli.theme {
            self.theme = Theme::from_name(name);
            if let Some(ref overrides) = self.colors {
                apply_overrides(&mut self.theme, overrides);
            }
        }
        if cli.ignore_whitespace {
            self.ignore_whitespace = true;
        }
        if cli.ignore_space_change {
            self.ignore_space_change = true;
        }
        if cli.normalize_json {
            self.normalize_json = true;
        }
        if let Some(algorithm) = cli.diff_algorithm {
            self.diff_algorithm = algorithm;
        }
        if cli.wrap {
            self.wrap_lines = true;
        }
        if let Some(n) = cli.max_lines_for_syntax {
            self.max_lines_for_syntax = n;
        }
        if let Some(n) = cli.unified {
            self.context_lines = n;
        }
        if let Some(n) = cli.min_jump_size {
            self.min_jump_size = n;
        }
        if let Some(n) = cli.expand_lines {
            self.expand_lines = n;
        }
        if let Some(ref name) = cli.language {
            self.language = canonical_language(name);
            if self.language.is_none() {
                tracing::warn!(language = %name, "unknown language, guessing instead");
            }
        }
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            ignore_whitespace: self.ignore_whitespace,
            ignore_space_change: self.ignore_space_change,
            normalize_json: self.normalize_json,
            algorithm: self.diff_algorithm,
            context_lines: self.context_lines,
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            min_jump_size: self.min_jump_size,
            expand_lines: self.expand_lines,
            max_lines_for_syntax: self.max_lines_for_syntax,
            language_override: self.language,
        }
    }
}

/// Load `~/.config/codediff/config.toml`, falling back to defaults.
pub fn load_config() -> CodediffConfig {
    let path = config_path();
    match std::fs::read_to_string(&path) {
        Ok(contents) => {
            tracing::debug!(path = %path.display(), "loaded config");
            CodediffConfig::parse(&contents)
        }
        Err(_) => CodediffConfig::default(),
    }
}

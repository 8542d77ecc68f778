use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::source::{DiffAlgorithm, FileSource};

#[derive(Parser, Debug)]
#[command(
    name = "codediff",
    version,
    about = "Side-by-side terminal diff viewer"
)]
pub struct Cli {
    /// Files to compare, as before/after pairs
    #[arg(value_name = "PATHS", required_unless_present = "ops")]
    pub paths: Vec<PathBuf>,

    /// Load a precomputed diff document instead (repeatable)
    #[arg(long, value_name = "FILE")]
    pub ops: Vec<PathBuf>,

    /// Ignore all whitespace (like `git diff -w`)
    #[arg(short = 'w', long = "ignore-ws")]
    pub ignore_whitespace: bool,

    /// Ignore changes in the amount of whitespace (like `git diff -b`)
    #[arg(short = 'b', long)]
    pub ignore_space_change: bool,

    /// Pretty-print JSON files with sorted keys before diffing
    #[arg(long)]
    pub normalize_json: bool,

    /// Line matching algorithm
    #[arg(long, value_enum, value_name = "NAME")]
    pub diff_algorithm: Option<DiffAlgorithm>,

    /// Wrap long lines instead of cutting them off
    #[arg(long)]
    pub wrap: bool,

    /// Lines of context kept around each change
    #[arg(short = 'U', long, value_name = "N")]
    pub unified: Option<usize>,

    /// Unchanged regions shorter than this are never collapsed
    #[arg(long, value_name = "N")]
    pub min_jump_size: Option<usize>,

    /// Rows revealed per expansion of a collapsed region
    #[arg(long, value_name = "N")]
    pub expand_lines: Option<usize>,

    /// Files with more lines than this are shown without highlighting
    #[arg(long, value_name = "N")]
    pub max_lines_for_syntax: Option<usize>,

    /// Highlight as this language instead of guessing
    #[arg(long, value_name = "NAME")]
    pub language: Option<String>,

    /// Color theme
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Write logs here instead of the cache directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The file pairs to show, in command-line order.
    pub fn file_sources(&self) -> Result<Vec<FileSource>> {
        if self.paths.len() % 2 != 0 {
            bail!(
                "expected before/after pairs, got {} path(s)",
                self.paths.len()
            );
        }
        let mut sources: Vec<FileSource> = self
            .paths
            .chunks_exact(2)
            .map(|pair| FileSource::Paths {
                before: pair[0].clone(),
                after: pair[1].clone(),
            })
            .collect();
        sources.extend(self.ops.iter().cloned().map(FileSource::Precomputed));
        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs() {
        let cli = Cli::parse_from(["codediff", "a1", "a2", "b1", "b2", "--ops", "x.json"]);
        let sources = cli.file_sources().unwrap();
        assert_eq!(sources.len(), 3);
        assert_eq!(
            sources[1],
            FileSource::Paths {
                before: "b1".into(),
                after: "b2".into()
            }
        );
        assert_eq!(sources[2], FileSource::Precomputed("x.json".into()));
    }

    #[test]
    fn test_odd_paths_rejected() {
        let cli = Cli::parse_from(["codediff", "a1", "a2", "b1"]);
        assert!(cli.file_sources().is_err());
    }

    #[test]
    fn test_paths_required_without_ops() {
        assert!(Cli::try_parse_from(["codediff"]).is_err());
        assert!(Cli::try_parse_from(["codediff", "--ops", "d.json"]).is_ok());
    }

    #[test]
    fn test_diff_option_flags() {
        let cli = Cli::parse_from([
            "codediff",
            "-b",
            "--wrap",
            "--diff-algorithm",
            "minimal",
            "a",
            "b",
        ]);
        assert!(cli.ignore_space_change);
        assert!(cli.wrap);
        assert!(!cli.normalize_json);
        assert_eq!(cli.diff_algorithm, Some(DiffAlgorithm::Minimal));
        assert!(cli.max_lines_for_syntax.is_none());
        assert!(Cli::try_parse_from(["codediff", "--diff-algorithm", "lcs", "a", "b"]).is_err());
    }
}

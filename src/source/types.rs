use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use similar::Algorithm;
use thiserror::Error;

use crate::diff::DiffRange;

/// Where a file pair comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Two files on disk; a missing path is an absent side.
    Paths { before: PathBuf, after: PathBuf },
    /// A JSON document already holding both texts and their ranges.
    Precomputed(PathBuf),
}

impl FileSource {
    /// Path used for titles and language detection: the before side unless
    /// the file was added.
    pub fn display_path(&self) -> &Path {
        match self {
            FileSource::Paths { before, after } => {
                if before.exists() || !after.exists() {
                    before
                } else {
                    after
                }
            }
            FileSource::Precomputed(path) => path,
        }
    }

    pub fn title(&self) -> String {
        match self {
            FileSource::Paths { before, after } if before != after => {
                format!("{} → {}", before.display(), after.display())
            }
            other => other.display_path().display().to_string(),
        }
    }
}

/// Line-matching strategy, named after git's `--diff-algorithm` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Minimal,
    Patience,
    Histogram,
}

impl DiffAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            DiffAlgorithm::Myers => "myers",
            DiffAlgorithm::Minimal => "minimal",
            DiffAlgorithm::Patience => "patience",
            DiffAlgorithm::Histogram => "histogram",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DiffAlgorithm::Myers => DiffAlgorithm::Minimal,
            DiffAlgorithm::Minimal => DiffAlgorithm::Patience,
            DiffAlgorithm::Patience => DiffAlgorithm::Histogram,
            DiffAlgorithm::Histogram => DiffAlgorithm::Myers,
        }
    }

    /// `similar` has no minimal or histogram mode. LCS always finds a
    /// minimal edit script and patience is histogram's closest relative.
    pub fn as_similar(self) -> Algorithm {
        match self {
            DiffAlgorithm::Myers => Algorithm::Myers,
            DiffAlgorithm::Minimal => Algorithm::Lcs,
            DiffAlgorithm::Patience | DiffAlgorithm::Histogram => Algorithm::Patience,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Like `git diff -w`.
    pub ignore_whitespace: bool,
    /// Like `git diff -b`.
    pub ignore_space_change: bool,
    /// Pretty-print both sides with sorted keys when they parse as JSON.
    pub normalize_json: bool,
    pub algorithm: DiffAlgorithm,
    pub context_lines: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            ignore_whitespace: false,
            ignore_space_change: false,
            normalize_json: false,
            algorithm: DiffAlgorithm::Myers,
            context_lines: 8,
        }
    }
}

/// Both texts of a pair plus the ranges aligning them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileData {
    #[serde(default)]
    pub content_a: Option<String>,
    #[serde(default)]
    pub content_b: Option<String>,
    pub diff_ops: Vec<DiffRange>,
    /// The files on disk are byte-identical. Normalized or
    /// whitespace-insensitive diffs can show no changes without this.
    #[serde(default)]
    pub no_changes: bool,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("neither {before} nor {after} exists")]
    BothMissing { before: PathBuf, after: PathBuf },
    #[error("{0} is not valid UTF-8 text")]
    NotText(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed diff document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_display_path_prefers_before() {
        let dir = TempDir::new().unwrap();
        let before = dir.path().join("old.py");
        let after = dir.path().join("new.rs");
        fs::write(&before, "x = 1\n").unwrap();
        fs::write(&after, "fn x() {}\n").unwrap();

        let both = FileSource::Paths {
            before: before.clone(),
            after: after.clone(),
        };
        assert_eq!(both.display_path(), before.as_path());

        let added = FileSource::Paths {
            before: dir.path().join("missing.py"),
            after: after.clone(),
        };
        assert_eq!(added.display_path(), after.as_path());
    }

    #[test]
    fn test_algorithm_cycle_visits_all() {
        let mut algorithm = DiffAlgorithm::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(algorithm.name());
            algorithm = algorithm.next();
        }
        assert_eq!(algorithm, DiffAlgorithm::Myers);
        assert_eq!(seen, ["myers", "minimal", "patience", "histogram"]);
    }
}

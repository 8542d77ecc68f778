use std::io::ErrorKind;
use std::path::Path;

use similar::{capture_diff_slices, DiffTag};

use crate::diff::{string_as_lines, DiffRange, RangeKind};

use super::types::{DiffOptions, FileData, FileSource, SourceError};

const MAX_HEADER_CHARS: usize = 80;

/// Load a pair and compute its ranges. Runs on a blocking worker thread.
pub fn load_file_data(source: &FileSource, options: &DiffOptions) -> Result<FileData, SourceError> {
    match source {
        FileSource::Paths { before, after } => {
            let mut content_a = read_optional(before)?;
            let mut content_b = read_optional(after)?;
            if content_a.is_none() && content_b.is_none() {
                return Err(SourceError::BothMissing {
                    before: before.clone(),
                    after: after.clone(),
                });
            }
            let no_changes = content_a == content_b;
            if options.normalize_json {
                content_a = content_a.map(normalize_json);
                content_b = content_b.map(normalize_json);
            }
            let diff_ops = compute_ranges(
                &diff_lines(content_a.as_deref()),
                &diff_lines(content_b.as_deref()),
                options,
            );
            tracing::debug!(
                before = %before.display(),
                after = %after.display(),
                ranges = diff_ops.len(),
                algorithm = options.algorithm.name(),
                "computed diff"
            );
            Ok(FileData {
                content_a,
                content_b,
                diff_ops,
                no_changes,
            })
        }
        FileSource::Precomputed(path) => {
            let raw = std::fs::read(path).map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;
            let mut data: FileData = serde_json::from_slice(&raw).map_err(|source| SourceError::Json {
                path: path.clone(),
                source,
            })?;
            data.no_changes = data.no_changes || data.content_a == data.content_b;
            Ok(data)
        }
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, SourceError> {
    match std::fs::read(path) {
        Ok(bytes) => String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| SourceError::NotText(path.to_path_buf())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SourceError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Pretty-print with two-space indents and sorted keys. Text that is not
/// JSON comes back unchanged.
pub fn normalize_json(text: String) -> String {
    let value = match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(%err, "not JSON, diffing as is");
            return text;
        }
    };
    match serde_json::to_string_pretty(&value) {
        Ok(mut pretty) => {
            pretty.push('\n');
            pretty
        }
        Err(_) => text,
    }
}

/// Lines as a line-oriented diff counts them: the empty piece after a final
/// terminator is not a line of its own.
fn diff_lines(text: Option<&str>) -> Vec<String> {
    let mut lines = string_as_lines(text);
    let terminated = text.is_some_and(|t| t.ends_with(['\n', '\r']));
    if terminated && lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// Align two line lists into a range sequence.
///
/// Adjacent deletes and inserts merge into a replace. Unchanged runs keep
/// `context_lines` of context next to each change and collapse the rest
/// into a skip.
pub fn compute_ranges(before: &[String], after: &[String], options: &DiffOptions) -> Vec<DiffRange> {
    let raw = if options.ignore_whitespace || options.ignore_space_change {
        let key: fn(&str) -> String = if options.ignore_whitespace {
            without_whitespace
        } else {
            collapse_whitespace
        };
        let keys = |lines: &[String]| -> Vec<String> { lines.iter().map(|l| key(l)).collect() };
        diff_line_keys(&keys(before), &keys(after), options)
    } else {
        diff_line_keys(before, after, options)
    };
    collapse_unchanged(raw, options.context_lines, after)
}

fn without_whitespace(line: &str) -> String {
    line.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Runs of whitespace compare equal to a single space; trailing whitespace
/// is dropped.
fn collapse_whitespace(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_space = false;
    for c in line.trim_end().chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn diff_line_keys(before: &[String], after: &[String], options: &DiffOptions) -> Vec<DiffRange> {
    let mut ranges: Vec<DiffRange> = Vec::new();

    for op in capture_diff_slices(options.algorithm.as_similar(), before, after) {
        let (tag, old, new) = op.as_tag_tuple();
        let kind = match tag {
            DiffTag::Equal => RangeKind::Equal,
            DiffTag::Delete => RangeKind::Delete,
            DiffTag::Insert => RangeKind::Insert,
            DiffTag::Replace => RangeKind::Replace,
        };
        if old.is_empty() && new.is_empty() {
            continue;
        }

        if let Some(prev) = ranges.last_mut() {
            let merges = prev.kind.is_change() && kind.is_change();
            if merges && prev.before.end == old.start && prev.after.end == new.start {
                prev.kind = RangeKind::Replace;
                prev.before.end = old.end;
                prev.after.end = new.end;
                continue;
            }
        }
        ranges.push(DiffRange::new(kind, (old.start, old.end), (new.start, new.end)));
    }

    ranges
}

fn collapse_unchanged(ranges: Vec<DiffRange>, context: usize, after: &[String]) -> Vec<DiffRange> {
    let last = ranges.len().saturating_sub(1);
    let mut out = Vec::with_capacity(ranges.len() + 2);

    for (i, range) in ranges.into_iter().enumerate() {
        if range.kind != RangeKind::Equal {
            out.push(range);
            continue;
        }
        let lead = if i > 0 { context } else { 0 };
        let trail = if i < last { context } else { 0 };
        let len = range.before.len();
        if len <= lead + trail {
            out.push(range);
            continue;
        }

        let (b, a) = (range.before.start, range.after.start);
        if lead > 0 {
            out.push(DiffRange::new(RangeKind::Equal, (b, b + lead), (a, a + lead)));
        }
        let skip_len = len - lead - trail;
        let mut skip = DiffRange::new(
            RangeKind::Skip,
            (b + lead, b + lead + skip_len),
            (a + lead, a + lead + skip_len),
        );
        if let Some(header) = function_header(after, a + lead + skip_len) {
            skip = skip.with_header(header);
        }
        out.push(skip);
        if trail > 0 {
            let (b2, a2) = (b + lead + skip_len, a + lead + skip_len);
            out.push(DiffRange::new(RangeKind::Equal, (b2, b2 + trail), (a2, a2 + trail)));
        }
    }

    out
}

/// Nearest line before `end` that looks like a definition, the way git picks
/// hunk headers by default.
fn function_header(lines: &[String], end: usize) -> Option<String> {
    lines[..end.min(lines.len())]
        .iter()
        .rev()
        .find(|line| {
            line.chars()
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        })
        .map(|line| line.trim_end().chars().take(MAX_HEADER_CHARS).collect())
}

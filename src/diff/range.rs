use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Kind of a diff range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKind {
    Equal,
    Insert,
    Delete,
    Replace,
    Skip,
}

impl RangeKind {
    pub fn is_change(self) -> bool {
        matches!(self, RangeKind::Insert | RangeKind::Delete | RangeKind::Replace)
    }
}

/// Half-open `[start, end)` interval of 0-based line indices.
///
/// Serialized as a two-element array, which is how diff sources exchange it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of lines covered. Inverted spans count as empty.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end.max(self.start)
    }
}

impl From<(usize, usize)> for LineSpan {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<LineSpan> for (usize, usize) {
    fn from(span: LineSpan) -> Self {
        (span.start, span.end)
    }
}

/// One contiguous segment of the before/after line alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRange {
    #[serde(rename = "type")]
    pub kind: RangeKind,
    pub before: LineSpan,
    pub after: LineSpan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

impl DiffRange {
    pub fn new(kind: RangeKind, before: (usize, usize), after: (usize, usize)) -> Self {
        Self {
            kind,
            before: before.into(),
            after: after.into(),
            header: None,
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Rows this range occupies when laid out side by side.
    pub fn num_rows(&self) -> usize {
        self.before.len().max(self.after.len())
    }

    pub fn is_skip(&self) -> bool {
        self.kind == RangeKind::Skip
    }
}

/// Total display rows of a range sequence.
pub fn total_rows(ranges: &[DiffRange]) -> usize {
    ranges.iter().map(DiffRange::num_rows).sum()
}

/// True when no range in the sequence is an insert, delete or replace.
pub fn has_no_changes(ranges: &[DiffRange]) -> bool {
    !ranges.iter().any(|r| r.kind.is_change())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_rows_uses_longer_side() {
        let r = DiffRange::new(RangeKind::Replace, (25, 27), (25, 28));
        assert_eq!(r.num_rows(), 3);
        let r = DiffRange::new(RangeKind::Delete, (3, 7), (3, 3));
        assert_eq!(r.num_rows(), 4);
    }

    #[test]
    fn test_inverted_span_is_empty() {
        let span = LineSpan::new(9, 4);
        assert_eq!(span.len(), 0);
        assert!(span.is_empty());
        assert_eq!(span.as_range().count(), 0);
    }

    #[test]
    fn test_json_wire_format() {
        let json = r#"[
            {"type": "equal", "before": [0, 5], "after": [0, 5]},
            {"type": "skip", "before": [5, 25], "after": [5, 25], "header": "fn main()"},
            {"type": "replace", "before": [25, 27], "after": [25, 28]}
        ]"#;
        let ranges: Vec<DiffRange> = serde_json::from_str(json).unwrap();
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[1].kind, RangeKind::Skip);
        assert_eq!(ranges[1].header.as_deref(), Some("fn main()"));
        assert_eq!(ranges[2].after, LineSpan::new(25, 28));
        assert_eq!(total_rows(&ranges), 28);

        let out = serde_json::to_value(&ranges[0]).unwrap();
        assert_eq!(
            out,
            serde_json::json!({"type": "equal", "before": [0, 5], "after": [0, 5]})
        );
    }

    #[test]
    fn test_has_no_changes() {
        let same = vec![
            DiffRange::new(RangeKind::Skip, (0, 40), (0, 40)),
            DiffRange::new(RangeKind::Equal, (40, 42), (40, 42)),
        ];
        assert!(has_no_changes(&same));
        let changed = vec![DiffRange::new(RangeKind::Insert, (0, 0), (0, 1))];
        assert!(!has_no_changes(&changed));
    }
}

use super::expand::SkipRange;
use super::range::{DiffRange, RangeKind};

/// What a populated side of a row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotContent {
    /// Balanced highlighter markup for exactly one line.
    Markup(String),
    /// Raw line text, used when no highlighting is available for the side.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSlot {
    /// 0-based index into the side's lines.
    pub index: usize,
    pub content: SlotContent,
}

impl LineSlot {
    /// 1-based number shown in the gutter.
    pub fn line_number(&self) -> usize {
        self.index + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRow {
    pub kind: RangeKind,
    pub before: Option<LineSlot>,
    pub after: Option<LineSlot>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRow {
    pub range: SkipRange,
    pub selected: bool,
}

/// One row of the side-by-side table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRow {
    Line(LineRow),
    Skip(SkipRow),
}

/// Stable identity of a row across rebuilds with the same ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKey {
    Line {
        before: Option<usize>,
        after: Option<usize>,
    },
    Skip {
        before_start: usize,
        after_start: usize,
    },
}

impl DisplayRow {
    pub fn key(&self) -> RowKey {
        match self {
            DisplayRow::Line(row) => RowKey::Line {
                before: row.before.as_ref().map(|s| s.index),
                after: row.after.as_ref().map(|s| s.index),
            },
            DisplayRow::Skip(row) => RowKey::Skip {
                before_start: row.range.before_start_line,
                after_start: row.range.after_start_line,
            },
        }
    }

    pub fn is_selected(&self) -> bool {
        match self {
            DisplayRow::Line(row) => row.selected,
            DisplayRow::Skip(row) => row.selected,
        }
    }

    pub fn as_skip(&self) -> Option<&SkipRange> {
        match self {
            DisplayRow::Skip(row) => Some(&row.range),
            DisplayRow::Line(_) => None,
        }
    }
}

/// Line text for one side, plus its highlighted fragments when available.
#[derive(Debug, Clone, Copy)]
pub struct SideLines<'a> {
    pub lines: &'a [String],
    pub highlighted: Option<&'a [String]>,
}

impl<'a> SideLines<'a> {
    pub fn new(lines: &'a [String], highlighted: Option<&'a [String]>) -> Self {
        Self { lines, highlighted }
    }

    fn slot(&self, index: usize) -> LineSlot {
        // Indices past the end only happen with a malformed range sequence;
        // render those as empty instead of failing.
        let content = match self.highlighted {
            Some(fragments) => SlotContent::Markup(fragments.get(index).cloned().unwrap_or_default()),
            None => SlotContent::Text(self.lines.get(index).cloned().unwrap_or_default()),
        };
        LineSlot { index, content }
    }
}

/// Lay out a range sequence as side-by-side display rows.
///
/// A skip range becomes one collapsed row; every other range becomes one row
/// per line position, pairing before and after lines by offset. Selection
/// only ever lands on the first row of a range.
pub fn build_rows(
    ops: &[DiffRange],
    before: SideLines<'_>,
    after: SideLines<'_>,
    selected_line: Option<usize>,
) -> Vec<DisplayRow> {
    let mut rows = Vec::new();

    for range in ops {
        let num_before_rows = range.before.len();
        let num_after_rows = range.after.len();
        let num_rows = num_before_rows.max(num_after_rows);
        let is_selected = selected_line == Some(range.after.start);

        if range.is_skip() {
            rows.push(DisplayRow::Skip(SkipRow {
                range: SkipRange::from_range(range),
                selected: is_selected,
            }));
            continue;
        }

        for j in 0..num_rows {
            let before_slot = (j < num_before_rows).then(|| before.slot(range.before.start + j));
            let after_slot = (j < num_after_rows).then(|| after.slot(range.after.start + j));
            rows.push(DisplayRow::Line(LineRow {
                kind: range.kind,
                before: before_slot,
                after: after_slot,
                selected: j == 0 && is_selected,
            }));
        }
    }

    rows
}

/// Index of the first selected row, if any.
pub fn selected_row_index(rows: &[DisplayRow]) -> Option<usize> {
    rows.iter().position(DisplayRow::is_selected)
}

/// Index of the row with the given identity, if it is still laid out.
pub fn row_index(rows: &[DisplayRow], key: RowKey) -> Option<usize> {
    rows.iter().position(|row| row.key() == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::jump::enforce_min_jump_size;
    use crate::diff::range::total_rows;
    use std::collections::HashSet;

    fn numbered(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    fn scenario() -> Vec<DiffRange> {
        vec![
            DiffRange::new(RangeKind::Equal, (0, 5), (0, 5)),
            DiffRange::new(RangeKind::Skip, (5, 25), (5, 25)),
            DiffRange::new(RangeKind::Replace, (25, 27), (25, 28)),
        ]
    }

    fn rows_for(ops: &[DiffRange], selected: Option<usize>) -> Vec<DisplayRow> {
        let before = numbered("b", 27);
        let after = numbered("a", 28);
        build_rows(
            ops,
            SideLines::new(&before, None),
            SideLines::new(&after, None),
            selected,
        )
    }

    fn displayed_rows(rows: &[DisplayRow]) -> usize {
        rows.iter()
            .map(|row| row.as_skip().map_or(1, |skip| skip.num_rows))
            .sum()
    }

    #[test]
    fn test_skip_collapses_to_one_row() {
        let ops = enforce_min_jump_size(&scenario(), 10);
        let rows = rows_for(&ops, None);

        assert_eq!(rows.len(), 5 + 1 + 3);
        let skip = rows[5].as_skip().unwrap();
        assert_eq!(skip.num_rows, 20);
        assert_eq!(skip.before_start_line, 5);

        let tail: Vec<&LineRow> = rows[6..]
            .iter()
            .map(|r| match r {
                DisplayRow::Line(row) => row,
                DisplayRow::Skip(_) => panic!("unexpected skip row"),
            })
            .collect();
        assert!(tail.iter().all(|r| r.kind == RangeKind::Replace && r.after.is_some()));
        assert_eq!(tail.iter().filter(|r| r.before.is_some()).count(), 2);
        assert!(tail[2].before.is_none());
        assert_eq!(
            tail[2].after.as_ref().unwrap().content,
            SlotContent::Text("a27".to_string())
        );
        assert_eq!(tail[2].after.as_ref().unwrap().line_number(), 28);
    }

    #[test]
    fn test_small_skip_shown_in_full() {
        let ops = enforce_min_jump_size(&scenario(), 25);
        let rows = rows_for(&ops, None);
        assert_eq!(rows.len(), 5 + 20 + 3);
        assert!(rows.iter().all(|r| r.as_skip().is_none()));
    }

    #[test]
    fn test_row_count_matches_ranges() {
        let ops = vec![
            DiffRange::new(RangeKind::Skip, (0, 12), (0, 12)),
            DiffRange::new(RangeKind::Delete, (12, 15), (12, 12)),
            DiffRange::new(RangeKind::Equal, (15, 17), (12, 14)),
            DiffRange::new(RangeKind::Insert, (17, 17), (14, 18)),
            DiffRange::new(RangeKind::Replace, (17, 18), (18, 21)),
            DiffRange::new(RangeKind::Skip, (18, 40), (21, 43)),
        ];
        let before = numbered("b", 40);
        let after = numbered("a", 43);
        let rows = build_rows(
            &ops,
            SideLines::new(&before, None),
            SideLines::new(&after, None),
            None,
        );
        assert_eq!(displayed_rows(&rows), total_rows(&ops));
    }

    #[test]
    fn test_selection_only_on_first_row_of_range() {
        let ops = enforce_min_jump_size(&scenario(), 10);
        let rows = rows_for(&ops, Some(25));
        let selected: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_selected())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(selected, vec![6]);
        assert_eq!(selected_row_index(&rows), Some(6));

        // Mid-range line numbers never select anything.
        let rows = rows_for(&ops, Some(26));
        assert_eq!(selected_row_index(&rows), None);
    }

    #[test]
    fn test_skip_row_can_be_selected() {
        let ops = enforce_min_jump_size(&scenario(), 10);
        let rows = rows_for(&ops, Some(5));
        assert_eq!(selected_row_index(&rows), Some(5));
        let key = RowKey::Skip {
            before_start: 5,
            after_start: 5,
        };
        assert_eq!(row_index(&rows, key), Some(5));
        let gone = RowKey::Skip {
            before_start: 6,
            after_start: 6,
        };
        assert_eq!(row_index(&rows, gone), None);
    }

    #[test]
    fn test_highlighted_fragments_replace_text_per_side() {
        let ops = vec![DiffRange::new(RangeKind::Replace, (0, 1), (0, 1))];
        let before = vec!["let x = 1;".to_string()];
        let after = vec!["let x = 2;".to_string()];
        let after_hl = vec!["<span class=\"hl-keyword\">let</span> x = 2;".to_string()];
        let rows = build_rows(
            &ops,
            SideLines::new(&before, None),
            SideLines::new(&after, Some(&after_hl)),
            None,
        );
        let DisplayRow::Line(row) = &rows[0] else {
            panic!("expected a line row");
        };
        assert_eq!(
            row.before.as_ref().unwrap().content,
            SlotContent::Text("let x = 1;".to_string())
        );
        assert_eq!(
            row.after.as_ref().unwrap().content,
            SlotContent::Markup(after_hl[0].clone())
        );
    }

    #[test]
    fn test_malformed_ranges_do_not_panic() {
        let ops = vec![DiffRange::new(RangeKind::Equal, (0, 4), (0, 4))];
        let before = numbered("b", 2);
        let after: Vec<String> = Vec::new();
        let rows = build_rows(
            &ops,
            SideLines::new(&before, None),
            SideLines::new(&after, None),
            None,
        );
        assert_eq!(rows.len(), 4);
        let DisplayRow::Line(last) = &rows[3] else {
            panic!("expected a line row");
        };
        assert_eq!(last.before.as_ref().unwrap().content, SlotContent::Text(String::new()));
    }

    #[test]
    fn test_keys_are_unique_and_stable() {
        let ops = enforce_min_jump_size(&scenario(), 10);
        let first = rows_for(&ops, None);
        let second = rows_for(&ops, Some(0));
        let keys: HashSet<RowKey> = first.iter().map(DisplayRow::key).collect();
        assert_eq!(keys.len(), first.len());
        let first_keys: Vec<RowKey> = first.iter().map(DisplayRow::key).collect();
        let second_keys: Vec<RowKey> = second.iter().map(DisplayRow::key).collect();
        assert_eq!(first_keys, second_keys);
    }
}

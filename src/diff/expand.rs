use super::range::{DiffRange, LineSpan, RangeKind};

/// A collapsed region the user is interacting with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRange {
    pub before_start_line: usize,
    pub after_start_line: usize,
    /// Total number of collapsed rows.
    pub num_rows: usize,
    pub header: Option<String>,
}

impl SkipRange {
    pub fn from_range(range: &DiffRange) -> Self {
        Self {
            before_start_line: range.before.start,
            after_start_line: range.after.start,
            num_rows: range.num_rows(),
            header: range.header.clone(),
        }
    }
}

/// Which edge of a skip row an expansion grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandEdge {
    /// Reveal rows at the top of the collapsed region.
    Top,
    /// Reveal rows at the bottom of the collapsed region.
    Bottom,
}

/// Signed amount to pass to [`show_more`] for one click on an edge affordance.
///
/// Negative reveals from the top, positive from the bottom. When the step
/// covers the whole skip the magnitude equals `num_rows`, which removes it.
pub fn expand_step(target: &SkipRange, edge: ExpandEdge, expand_lines: usize) -> isize {
    let step = expand_lines.max(1).min(target.num_rows) as isize;
    match edge {
        ExpandEdge::Top => -step,
        ExpandEdge::Bottom => step,
    }
}

/// Reveal rows of one skip range, returning the new range sequence.
///
/// `n > 0` reveals `n` rows from the bottom edge, `n < 0` reveals `|n|` rows
/// from the top edge, and `|n| == num_rows` turns the whole skip into an
/// equal range. The skip is found by its before-side start line; every other
/// range is passed through untouched. Out-of-range amounts leave the
/// sequence as it was.
pub fn show_more(ops: &[DiffRange], target: &SkipRange, n: isize) -> Vec<DiffRange> {
    let amount = n.unsigned_abs();
    if amount == 0 || amount > target.num_rows {
        return ops.to_vec();
    }

    let mut out = Vec::with_capacity(ops.len() + 1);
    for op in ops {
        if op.before.start != target.before_start_line || !op.is_skip() {
            out.push(op.clone());
            continue;
        }

        if amount == target.num_rows {
            out.push(DiffRange {
                kind: RangeKind::Equal,
                ..op.clone()
            });
            continue;
        }

        let (before, after) = (op.before, op.after);
        if n > 0 {
            let before_cut = before.end.saturating_sub(amount).max(before.start);
            let after_cut = after.end.saturating_sub(amount).max(after.start);
            out.push(DiffRange {
                before: LineSpan::new(before.start, before_cut),
                after: LineSpan::new(after.start, after_cut),
                ..op.clone()
            });
            out.push(DiffRange {
                kind: RangeKind::Equal,
                before: LineSpan::new(before_cut, before.end),
                after: LineSpan::new(after_cut, after.end),
                header: None,
            });
        } else {
            let before_cut = (before.start + amount).min(before.end);
            let after_cut = (after.start + amount).min(after.end);
            out.push(DiffRange {
                kind: RangeKind::Equal,
                before: LineSpan::new(before.start, before_cut),
                after: LineSpan::new(after.start, after_cut),
                header: None,
            });
            out.push(DiffRange {
                before: LineSpan::new(before_cut, before.end),
                after: LineSpan::new(after_cut, after.end),
                ..op.clone()
            });
        }
    }
    out
}

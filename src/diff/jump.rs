use super::range::{DiffRange, RangeKind};

/// Turn skips shorter than `min_jump_size` into plain equal ranges.
///
/// Collapsing two unchanged lines behind a "show 2 lines" row is noisier than
/// just showing them. The row span is measured on the before side.
pub fn enforce_min_jump_size(ranges: &[DiffRange], min_jump_size: usize) -> Vec<DiffRange> {
    ranges
        .iter()
        .map(|range| {
            if range.kind == RangeKind::Skip && range.before.len() < min_jump_size {
                DiffRange {
                    kind: RangeKind::Equal,
                    ..range.clone()
                }
            } else {
                range.clone()
            }
        })
        .collect()
}

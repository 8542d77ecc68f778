use super::range::DiffRange;

/// Direction of a hunk jump.
///
/// Named after the boundary being sought, not the screen: `Up` moves to the
/// next range start further into the file, `Down` to an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunkDirection {
    Up,
    Down,
}

/// Compute the after-side line the selection should move to.
///
/// Returns `None` when the selection should stay put. There is no wrapping
/// past the last or first range.
pub fn move_up_down(
    direction: HunkDirection,
    selected_line: Option<usize>,
    ops: &[DiffRange],
) -> Option<usize> {
    match (direction, selected_line) {
        (HunkDirection::Up, None) => Some(0),
        (HunkDirection::Up, Some(selected)) => ops
            .iter()
            .map(|range| range.after.start)
            .find(|&start| start > selected),
        (HunkDirection::Down, Some(selected)) => ops
            .iter()
            .rev()
            .map(|range| range.after.start)
            .find(|&start| start < selected),
        (HunkDirection::Down, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::range::RangeKind;

    fn three_hunks() -> Vec<DiffRange> {
        vec![
            DiffRange::new(RangeKind::Equal, (0, 4), (0, 4)),
            DiffRange::new(RangeKind::Insert, (4, 4), (4, 6)),
            DiffRange::new(RangeKind::Skip, (4, 30), (6, 32)),
            DiffRange::new(RangeKind::Delete, (30, 31), (32, 32)),
            DiffRange::new(RangeKind::Equal, (31, 40), (32, 41)),
        ]
    }

    #[test]
    fn test_up_from_nothing_goes_to_top() {
        assert_eq!(move_up_down(HunkDirection::Up, None, &three_hunks()), Some(0));
    }

    #[test]
    fn test_up_advances_monotonically() {
        let ops = three_hunks();
        let mut selected = move_up_down(HunkDirection::Up, None, &ops);
        let mut visited = vec![selected.unwrap()];
        while let Some(next) = move_up_down(HunkDirection::Up, selected, &ops) {
            assert!(next > selected.unwrap());
            visited.push(next);
            selected = Some(next);
        }
        assert_eq!(visited, vec![0, 4, 6, 32]);
    }

    #[test]
    fn test_down_returns_to_previous() {
        let ops = three_hunks();
        assert_eq!(move_up_down(HunkDirection::Down, Some(32), &ops), Some(6));
        assert_eq!(move_up_down(HunkDirection::Down, Some(6), &ops), Some(4));
        assert_eq!(move_up_down(HunkDirection::Down, Some(4), &ops), Some(0));
    }

    #[test]
    fn test_down_from_first_or_nothing_stays() {
        let ops = three_hunks();
        assert_eq!(move_up_down(HunkDirection::Down, Some(0), &ops), None);
        assert_eq!(move_up_down(HunkDirection::Down, None, &ops), None);
    }

    #[test]
    fn test_no_wrap_past_last() {
        let ops = three_hunks();
        assert_eq!(move_up_down(HunkDirection::Up, Some(32), &ops), None);
    }
}

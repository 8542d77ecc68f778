use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use crate::diff::lines::display_width;
use crate::diff::range::{has_no_changes, total_rows};
use crate::diff::rows::{row_index, selected_row_index};
use crate::diff::{
    build_rows, enforce_min_jump_size, expand_step, move_up_down, show_more, string_as_lines,
    DiffRange, DisplayRow, ExpandEdge, HunkDirection, LineSlot, RowKey, SafetyGate, SideLines,
    SkipRange,
};
use crate::highlight::{choose_language, highlight_text, HighlightEngine};
use crate::source::FileData;

use super::memo::Memo;

/// Knobs the session needs from configuration.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub min_jump_size: usize,
    pub expand_lines: usize,
    pub max_lines_for_syntax: usize,
    pub language_override: Option<&'static str>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            min_jump_size: 10,
            expand_lines: 10,
            max_lines_for_syntax: 25_000,
            language_override: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed(String),
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

/// Why a pair shows no changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoChanges {
    /// The files are byte-identical.
    Identical,
    /// They differ, but not once whitespace or JSON formatting is ignored.
    IdenticalAfterNormalization,
}

impl NoChanges {
    pub fn message(self) -> &'static str {
        match self {
            NoChanges::Identical => "(File content is identical)",
            NoChanges::IdenticalAfterNormalization => "(File content is identical after normalization)",
        }
    }
}

type HighlightKey = (u64, Option<&'static str>);
type HighlightMemo = Memo<HighlightKey, Option<Vec<String>>>;
type RowsKey = (u64, Option<usize>, u64);

/// Everything on screen for the current file pair.
pub struct DiffSession {
    pub settings: SessionSettings,
    pub load: LoadState,
    pub title: String,
    pub before_text: Option<String>,
    pub after_text: Option<String>,
    pub before_lines: Vec<String>,
    pub after_lines: Vec<String>,
    pub language: Option<&'static str>,
    /// Files on disk were byte-identical.
    contents_identical: bool,
    before_key: HighlightKey,
    after_key: HighlightKey,
    before_highlight: HighlightMemo,
    after_highlight: HighlightMemo,
    highlight_rev: u64,
    /// Working copy of the ranges; only skip expansion edits it.
    ops: Vec<DiffRange>,
    ops_rev: u64,
    /// After-side line of the selected hunk boundary.
    pub selected_line: Option<usize>,
    pub gate: SafetyGate,
    rows: Memo<RowsKey, Vec<DisplayRow>>,
    pub cursor_row: usize,
    pub scroll_offset: usize,
    pub viewport_height: usize,
    /// Text columns per half when long lines wrap; `None` truncates them.
    pub wrap_width: Option<usize>,
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Fragments held by `memo`, but only if they belong to `key`.
fn current_fragments<'a>(memo: &'a HighlightMemo, key: &HighlightKey) -> Option<&'a [String]> {
    if memo.is_current(key) {
        memo.get().and_then(|h| h.as_deref())
    } else {
        None
    }
}

impl DiffSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            load: LoadState::Loading,
            title: String::new(),
            before_text: None,
            after_text: None,
            before_lines: Vec::new(),
            after_lines: Vec::new(),
            language: None,
            contents_identical: false,
            before_key: (0, None),
            after_key: (0, None),
            before_highlight: Memo::default(),
            after_highlight: Memo::default(),
            highlight_rev: 0,
            ops: Vec::new(),
            ops_rev: 0,
            selected_line: None,
            gate: SafetyGate::default(),
            rows: Memo::default(),
            cursor_row: 0,
            scroll_offset: 0,
            viewport_height: 20,
            wrap_width: None,
        }
    }

    pub fn begin_load(&mut self, title: String) {
        self.title = title;
        self.load = LoadState::Loading;
    }

    pub fn fail(&mut self, message: String) {
        self.load = LoadState::Failed(message);
    }

    /// Install freshly loaded data. Ranges and selection start over.
    ///
    /// Highlighting waits until the safety gate lets the pair render.
    pub fn apply_file_data(&mut self, data: FileData, path: &Path, engine: &HighlightEngine) {
        self.before_lines = string_as_lines(data.content_a.as_deref());
        self.after_lines = string_as_lines(data.content_b.as_deref());

        let texts_key = hash_of(&(&data.content_a, &data.content_b));
        self.gate.inspect(texts_key, &self.before_lines, &self.after_lines);

        let num_lines = self.before_lines.len().max(self.after_lines.len());
        self.language = self.settings.language_override.or_else(|| {
            choose_language(
                path,
                data.content_a.as_deref(),
                data.content_b.as_deref(),
                num_lines,
                self.settings.max_lines_for_syntax,
            )
        });
        let language = self.language.filter(|_| num_lines <= self.settings.max_lines_for_syntax);
        self.before_key = (hash_of(&data.content_a), language);
        self.after_key = (hash_of(&data.content_b), language);

        self.ops = enforce_min_jump_size(&data.diff_ops, self.settings.min_jump_size);
        self.ops_rev += 1;
        self.selected_line = None;
        self.cursor_row = 0;
        self.scroll_offset = 0;
        self.contents_identical = data.no_changes;
        self.before_text = data.content_a;
        self.after_text = data.content_b;
        self.load = LoadState::Ready;

        tracing::debug!(
            ranges = self.ops.len(),
            rows = total_rows(&self.ops),
            language = self.language.unwrap_or("plain"),
            gated = self.gate.is_armed(),
            "file data applied"
        );
        self.refresh_highlight(engine);
    }

    /// Highlight both sides if the pair may render and the cached fragments
    /// are for other texts. Cheap when nothing changed.
    pub fn refresh_highlight(&mut self, engine: &HighlightEngine) {
        if self.load != LoadState::Ready || self.gate.is_armed() {
            return;
        }
        if self.before_highlight.is_current(&self.before_key)
            && self.after_highlight.is_current(&self.after_key)
        {
            return;
        }
        self.highlight_rev += 1;
        let before_text = self.before_text.as_deref();
        let after_text = self.after_text.as_deref();
        let (before_key, after_key) = (self.before_key, self.after_key);
        self.before_highlight
            .get_or_compute(before_key, || highlight_side(engine, before_text, before_key.1));
        self.after_highlight
            .get_or_compute(after_key, || highlight_side(engine, after_text, after_key.1));
    }

    pub fn ops(&self) -> &[DiffRange] {
        &self.ops
    }

    pub fn has_no_changes(&self) -> bool {
        has_no_changes(&self.ops)
    }

    pub fn no_changes(&self) -> Option<NoChanges> {
        if self.contents_identical {
            Some(NoChanges::Identical)
        } else if self.has_no_changes() {
            Some(NoChanges::IdenticalAfterNormalization)
        } else {
            None
        }
    }

    /// True when either present side is shown without highlighting.
    pub fn is_plain_text(&self) -> bool {
        let side_plain = |text: &Option<String>, memo: &HighlightMemo, key: &HighlightKey| {
            text.is_some() && current_fragments(memo, key).is_none()
        };
        side_plain(&self.before_text, &self.before_highlight, &self.before_key)
            || side_plain(&self.after_text, &self.after_highlight, &self.after_key)
    }

    /// Display rows for the current ranges. Nothing is laid out while the
    /// safety gate is armed.
    pub fn rows(&mut self) -> &[DisplayRow] {
        if self.gate.is_armed() {
            return &[];
        }
        let key = (self.ops_rev, self.selected_line, self.highlight_rev);
        let ops = &self.ops;
        let selected_line = self.selected_line;
        let before = SideLines::new(
            &self.before_lines,
            current_fragments(&self.before_highlight, &self.before_key),
        );
        let after = SideLines::new(
            &self.after_lines,
            current_fragments(&self.after_highlight, &self.after_key),
        );
        self.rows
            .get_or_compute(key, || build_rows(ops, before, after, selected_line))
    }

    /// Rows as of the last [`rows`](Self::rows) call, for read-only rendering.
    pub fn current_rows(&self) -> &[DisplayRow] {
        if self.gate.is_armed() {
            return &[];
        }
        self.rows.get().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn row_count(&mut self) -> usize {
        self.rows().len()
    }

    /// Screen lines a row takes up; more than one only when wrapping.
    pub fn row_height(&self, index: usize) -> usize {
        let Some(width) = self.wrap_width.filter(|w| *w > 0) else {
            return 1;
        };
        let Some(DisplayRow::Line(row)) = self.current_rows().get(index) else {
            return 1;
        };
        let side = |slot: &Option<LineSlot>, lines: &[String]| {
            slot.as_ref()
                .and_then(|slot| lines.get(slot.index))
                .map_or(1, |line| display_width(line).div_ceil(width).max(1))
        };
        side(&row.before, &self.before_lines).max(side(&row.after, &self.after_lines))
    }

    // ── Cursor ──────────────────────────────────────────────────

    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let target = self.cursor_row.saturating_add_signed(delta);
        self.cursor_row = target.min(count - 1);
        self.ensure_cursor_visible();
    }

    pub fn page(&mut self, down: bool) {
        let step = self.viewport_height.saturating_sub(1).max(1) as isize;
        self.move_cursor(if down { step } else { -step });
    }

    pub fn cursor_to_top(&mut self) {
        self.cursor_row = 0;
        self.ensure_cursor_visible();
    }

    pub fn cursor_to_bottom(&mut self) {
        self.cursor_row = self.row_count().saturating_sub(1);
        self.ensure_cursor_visible();
    }

    pub fn ensure_cursor_visible(&mut self) {
        let height = self.viewport_height.max(1);
        if self.cursor_row < self.scroll_offset {
            self.scroll_offset = self.cursor_row;
            return;
        }
        if self.wrap_width.is_none() {
            if self.cursor_row >= self.scroll_offset + height {
                self.scroll_offset = self.cursor_row + 1 - height;
            }
            return;
        }
        // Walk up from the cursor until the screen is full; the cursor row
        // itself always stays.
        let mut top = self.cursor_row;
        let mut used = 0;
        for index in (0..=self.cursor_row).rev() {
            used += self.row_height(index);
            if used > height {
                break;
            }
            top = index;
        }
        self.scroll_offset = self.scroll_offset.max(top);
    }

    // ── Hunks ───────────────────────────────────────────────────

    /// Move the selection to the next hunk boundary. Returns false at the ends.
    pub fn jump_hunk(&mut self, direction: HunkDirection) -> bool {
        let Some(line) = move_up_down(direction, self.selected_line, &self.ops) else {
            return false;
        };
        self.selected_line = Some(line);
        if let Some(index) = selected_row_index(self.rows()) {
            self.cursor_row = index;
            self.center_cursor();
        }
        true
    }

    fn center_cursor(&mut self) {
        let half = self.viewport_height / 2;
        self.scroll_offset = self.cursor_row.saturating_sub(half);
        self.ensure_cursor_visible();
    }

    // ── Skips ───────────────────────────────────────────────────

    pub fn skip_under_cursor(&mut self) -> Option<SkipRange> {
        let cursor = self.cursor_row;
        self.rows().get(cursor).and_then(DisplayRow::as_skip).cloned()
    }

    /// Reveal rows from one edge of the skip under the cursor.
    pub fn expand_under_cursor(&mut self, edge: ExpandEdge) -> bool {
        let Some(target) = self.skip_under_cursor() else {
            return false;
        };
        let n = expand_step(&target, edge, self.settings.expand_lines);
        self.apply_expansion(&target, n);
        true
    }

    /// Replace the skip under the cursor with all of its rows.
    pub fn show_all_under_cursor(&mut self) -> bool {
        let Some(target) = self.skip_under_cursor() else {
            return false;
        };
        self.apply_expansion(&target, target.num_rows as isize);
        true
    }

    /// The cursor follows whatever is left of the skip. When nothing is
    /// left it stays put, on the first revealed row.
    fn apply_expansion(&mut self, target: &SkipRange, n: isize) {
        self.ops = show_more(&self.ops, target, n);
        self.ops_rev += 1;
        tracing::debug!(before_start = target.before_start_line, n, "expanded skip");

        let shift = if n < 0 { n.unsigned_abs() } else { 0 };
        let remaining = RowKey::Skip {
            before_start: target.before_start_line + shift,
            after_start: target.after_start_line + shift,
        };
        if let Some(index) = row_index(self.rows(), remaining) {
            self.cursor_row = index;
        }
        self.ensure_cursor_visible();
    }

    // ── Clipboard ───────────────────────────────────────────────

    /// Text of one side of the range under the cursor.
    pub fn copy_text(&self, side: Side) -> Option<String> {
        let range = self.range_at_row(self.cursor_row)?;
        let (span, lines) = match side {
            Side::Before => (range.before, &self.before_lines),
            Side::After => (range.after, &self.after_lines),
        };
        if span.is_empty() {
            return None;
        }
        let selected = lines.get(span.as_range())?;
        Some(selected.join("\n"))
    }

    fn range_at_row(&self, row: usize) -> Option<&DiffRange> {
        let mut first_row = 0;
        for range in &self.ops {
            let span = if range.is_skip() { 1 } else { range.num_rows() };
            if row < first_row + span {
                return Some(range);
            }
            first_row += span;
        }
        None
    }
}

fn highlight_side(
    engine: &HighlightEngine,
    text: Option<&str>,
    language: Option<&'static str>,
) -> Option<Vec<String>> {
    let text = text?;
    let language = language?;
    if !engine.supports(language) {
        tracing::debug!(language, "no grammar loaded");
        return None;
    }
    highlight_text(engine, text, language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffRange, RangeKind, SlotContent};
    use crate::source::FileData;

    fn numbered(prefix: &str, n: usize) -> String {
        (0..n).map(|i| format!("{prefix}{i}")).collect::<Vec<_>>().join("\n")
    }

    fn data() -> FileData {
        FileData {
            content_a: Some(numbered("b", 27)),
            content_b: Some(numbered("a", 28)),
            diff_ops: vec![
                DiffRange::new(RangeKind::Equal, (0, 5), (0, 5)),
                DiffRange::new(RangeKind::Skip, (5, 25), (5, 25)),
                DiffRange::new(RangeKind::Replace, (25, 27), (25, 28)),
            ],
            no_changes: false,
        }
    }

    fn session_with(data: FileData) -> DiffSession {
        let engine = HighlightEngine::new();
        let mut session = DiffSession::new(SessionSettings::default());
        session.apply_file_data(data, Path::new("notes.txt"), &engine);
        session
    }

    #[test]
    fn test_rows_from_file_data() {
        let mut session = session_with(data());
        assert_eq!(session.load, LoadState::Ready);
        assert_eq!(session.row_count(), 5 + 1 + 3);
        assert!(session.is_plain_text());
        let rows = session.rows();
        match &rows[0] {
            DisplayRow::Line(row) => {
                assert_eq!(row.before.as_ref().unwrap().content, SlotContent::Text("b0".into()));
            }
            other => panic!("unexpected row {other:?}"),
        }
    }

    #[test]
    fn test_hunk_jumps_move_cursor() {
        let mut session = session_with(data());
        assert!(session.jump_hunk(HunkDirection::Up));
        assert_eq!(session.selected_line, Some(0));
        assert_eq!(session.cursor_row, 0);

        assert!(session.jump_hunk(HunkDirection::Up));
        assert_eq!(session.selected_line, Some(5));
        assert_eq!(session.cursor_row, 5);

        assert!(session.jump_hunk(HunkDirection::Up));
        assert_eq!(session.selected_line, Some(25));
        assert_eq!(session.cursor_row, 6);

        assert!(!session.jump_hunk(HunkDirection::Up));
        assert!(session.jump_hunk(HunkDirection::Down));
        assert_eq!(session.selected_line, Some(5));
    }

    #[test]
    fn test_expand_keeps_selection() {
        let mut session = session_with(data());
        session.jump_hunk(HunkDirection::Up);
        session.jump_hunk(HunkDirection::Up);
        assert_eq!(session.cursor_row, 5);

        session.settings.expand_lines = 5;
        assert!(session.expand_under_cursor(ExpandEdge::Bottom));
        assert_eq!(session.row_count(), 5 + 1 + 5 + 3);
        assert_eq!(session.selected_line, Some(5));
        assert_eq!(session.cursor_row, 5);

        assert!(session.expand_under_cursor(ExpandEdge::Top));
        assert_eq!(session.cursor_row, 10);
        assert_eq!(session.skip_under_cursor().unwrap().num_rows, 10);

        assert!(session.show_all_under_cursor());
        assert!(session.ops().iter().all(|r| !r.is_skip()));
        assert!(!session.expand_under_cursor(ExpandEdge::Top));
    }

    #[test]
    fn test_new_data_resets_selection_and_ops() {
        let mut session = session_with(data());
        session.jump_hunk(HunkDirection::Up);
        session.cursor_row = 5;
        session.show_all_under_cursor();

        let engine = HighlightEngine::new();
        session.apply_file_data(data(), Path::new("notes.txt"), &engine);
        assert_eq!(session.selected_line, None);
        assert_eq!(session.cursor_row, 0);
        assert!(session.ops()[1].is_skip());
    }

    #[test]
    fn test_small_skips_normalized() {
        let mut fd = data();
        fd.diff_ops[1] = DiffRange::new(RangeKind::Skip, (5, 25), (5, 25));
        let engine = HighlightEngine::new();
        let mut session = DiffSession::new(SessionSettings {
            min_jump_size: 25,
            ..SessionSettings::default()
        });
        session.apply_file_data(fd, Path::new("notes.txt"), &engine);
        assert_eq!(session.row_count(), 27 + 1);
        assert!(!session.has_no_changes());
    }

    #[test]
    fn test_copy_text_one_side() {
        let mut session = session_with(data());
        session.cursor_row = 7;
        assert_eq!(session.copy_text(Side::Before).as_deref(), Some("b25\nb26"));
        assert_eq!(session.copy_text(Side::After).as_deref(), Some("a25\na26\na27"));
        session.cursor_row = 5;
        assert_eq!(session.copy_text(Side::After).unwrap().lines().count(), 20);
    }

    #[test]
    fn test_highlighted_rust() {
        let engine = HighlightEngine::new();
        let mut session = DiffSession::new(SessionSettings::default());
        session.apply_file_data(
            FileData {
                content_a: Some("fn a() {}\n".into()),
                content_b: Some("fn b() {}\n".into()),
                diff_ops: vec![
                    DiffRange::new(RangeKind::Replace, (0, 1), (0, 1)),
                    DiffRange::new(RangeKind::Equal, (1, 2), (1, 2)),
                ],
                no_changes: false,
            },
            Path::new("lib.rs"),
            &engine,
        );
        assert_eq!(session.language, Some("rust"));
        assert!(!session.is_plain_text());
        match &session.rows()[0] {
            DisplayRow::Line(row) => {
                assert!(matches!(row.after.as_ref().unwrap().content, SlotContent::Markup(_)));
            }
            other => panic!("unexpected row {other:?}"),
        }
    }

    #[test]
    fn test_gate_rearms_only_for_new_texts() {
        let engine = HighlightEngine::new();
        let minified = FileData {
            content_a: Some("x".repeat(200_001)),
            content_b: Some("y".repeat(200_001)),
            diff_ops: vec![DiffRange::new(RangeKind::Replace, (0, 1), (0, 1))],
            no_changes: false,
        };
        let mut session = DiffSession::new(SessionSettings::default());
        session.apply_file_data(minified.clone(), Path::new("app.min.txt"), &engine);
        assert!(session.gate.is_armed());
        session.gate.bypass();

        session.apply_file_data(minified, Path::new("app.min.txt"), &engine);
        assert!(session.gate.allows_render());

        session.apply_file_data(data(), Path::new("notes.txt"), &engine);
        assert!(session.gate.allows_render());
    }

    fn minified_js() -> FileData {
        FileData {
            content_a: Some("a".repeat(200_001)),
            content_b: Some("b".repeat(200_001)),
            diff_ops: vec![DiffRange::new(RangeKind::Replace, (0, 1), (0, 1))],
            no_changes: false,
        }
    }

    #[test]
    fn test_armed_gate_defers_highlighting_and_layout() {
        let engine = HighlightEngine::new();
        let mut session = DiffSession::new(SessionSettings::default());
        session.apply_file_data(minified_js(), Path::new("bundle.min.js"), &engine);

        assert!(session.gate.is_armed());
        assert_eq!(session.language, Some("javascript"));
        assert!(session.before_highlight.get().is_none());
        assert!(session.after_highlight.get().is_none());
        assert!(session.rows().is_empty());
        assert!(session.rows.get().is_none());
        assert!(session.current_rows().is_empty());
        session.move_cursor(3);
        assert_eq!(session.cursor_row, 0);

        // Nothing happens until the user opts in.
        session.refresh_highlight(&engine);
        assert!(session.before_highlight.get().is_none());

        session.gate.bypass();
        session.refresh_highlight(&engine);
        assert!(session.before_highlight.is_current(&session.before_key));
        assert!(session.after_highlight.is_current(&session.after_key));
        assert!(!session.is_plain_text());
        assert_eq!(session.row_count(), 1);
    }

    #[test]
    fn test_stale_highlights_are_not_reused() {
        let engine = HighlightEngine::new();
        let mut session = DiffSession::new(SessionSettings::default());
        session.apply_file_data(
            FileData {
                content_a: Some("fn a() {}".into()),
                content_b: Some("fn b() {}".into()),
                diff_ops: vec![DiffRange::new(RangeKind::Replace, (0, 1), (0, 1))],
                no_changes: false,
            },
            Path::new("lib.rs"),
            &engine,
        );
        assert!(!session.is_plain_text());

        // The next pair is gated, so the old fragments must not leak into it.
        session.apply_file_data(minified_js(), Path::new("bundle.min.js"), &engine);
        assert!(session.before_highlight.get().is_some());
        assert!(session.is_plain_text());
    }

    #[test]
    fn test_top_expansion_consuming_whole_skip() {
        let mut session = session_with(data());
        session.settings.expand_lines = 50;
        session.cursor_row = 5;
        let skip = session.skip_under_cursor().unwrap();
        assert_eq!(expand_step(&skip, ExpandEdge::Top, 50), -20);

        assert!(session.expand_under_cursor(ExpandEdge::Top));
        assert!(session.ops().iter().all(|r| !r.is_skip()));
        assert_eq!(session.row_count(), 5 + 20 + 3);
        // No skip is left to follow, so the cursor stays on the first
        // revealed row.
        assert_eq!(session.cursor_row, 5);
        match &session.rows()[5] {
            DisplayRow::Line(row) => assert_eq!(row.before.as_ref().unwrap().index, 5),
            other => panic!("unexpected row {other:?}"),
        }
    }

    #[test]
    fn test_no_changes_banner() {
        let all_equal = vec![DiffRange::new(RangeKind::Skip, (0, 12), (0, 12))];
        let identical = FileData {
            content_a: Some(numbered("x", 12)),
            content_b: Some(numbered("x", 12)),
            diff_ops: all_equal.clone(),
            no_changes: true,
        };
        assert_eq!(session_with(identical).no_changes(), Some(NoChanges::Identical));

        let whitespace_only = FileData {
            content_a: Some(numbered("x", 12)),
            content_b: Some(numbered("x", 12).replace('x', "  x")),
            diff_ops: all_equal,
            no_changes: false,
        };
        let session = session_with(whitespace_only);
        assert_eq!(session.no_changes(), Some(NoChanges::IdenticalAfterNormalization));
        assert_eq!(
            session.no_changes().unwrap().message(),
            "(File content is identical after normalization)"
        );

        assert_eq!(session_with(data()).no_changes(), None);
    }

    #[test]
    fn test_wrapped_rows_scroll_by_screen_lines() {
        let long = "z".repeat(25);
        let text = (0..6).map(|_| long.as_str()).collect::<Vec<_>>().join("\n");
        let mut session = session_with(FileData {
            content_a: Some(text.clone()),
            content_b: Some(text),
            diff_ops: vec![DiffRange::new(RangeKind::Equal, (0, 6), (0, 6))],
            no_changes: true,
        });
        session.viewport_height = 6;
        session.rows();

        assert_eq!(session.row_height(0), 1);
        session.wrap_width = Some(10);
        assert_eq!(session.row_height(0), 3);

        // Two rows of three lines fill the screen.
        session.move_cursor(1);
        assert_eq!(session.scroll_offset, 0);
        session.move_cursor(1);
        assert_eq!(session.scroll_offset, 1);
        session.cursor_to_bottom();
        assert_eq!(session.cursor_row, 5);
        assert_eq!(session.scroll_offset, 4);

        session.wrap_width = None;
        session.cursor_to_top();
        session.cursor_to_bottom();
        assert_eq!(session.scroll_offset, 0);
    }
}

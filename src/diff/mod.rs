//! Diff-range engine: turns a sequence of line-range operations into
//! navigable side-by-side rows.

pub mod expand;
pub mod gate;
pub mod hunks;
pub mod jump;
pub mod lines;
pub mod range;
pub mod rows;

pub use expand::{expand_step, show_more, ExpandEdge, SkipRange};
pub use gate::SafetyGate;
pub use hunks::{move_up_down, HunkDirection};
pub use jump::enforce_min_jump_size;
pub use lines::string_as_lines;
pub use range::{DiffRange, LineSpan, RangeKind};
pub use rows::{build_rows, DisplayRow, LineRow, LineSlot, RowKey, SideLines, SkipRow, SlotContent};

pub mod engine;
pub mod languages;
pub mod markup;
pub mod theme;

pub use engine::{highlight_text, HighlightEngine};
pub use languages::{canonical_language, choose_language};
pub use markup::{parse_fragment, MarkupSegment};
pub use theme::style_for_class;

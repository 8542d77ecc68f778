/// Every state change the app can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Lifecycle
    Quit,
    Tick,
    Resize,

    // Cursor
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,
    ScrollToBottom,

    // Hunks
    NextHunk,
    PrevHunk,

    // Skips
    ShowMoreAbove,
    ShowMoreBelow,
    ShowAll,

    // Safety gate
    RenderAnyway,

    // File pairs
    NextPair,
    PrevPair,

    // Diff options
    ToggleWhitespace,
    ToggleSpaceChange,
    ToggleNormalizeJson,
    CycleAlgorithm,
    MoreContext,
    LessContext,

    ToggleWrap,

    // Clipboard
    CopyAfter,
    CopyBefore,

    ToggleHelp,
}

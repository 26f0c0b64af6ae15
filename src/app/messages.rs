use super::editor::{CaseMode, EditOp};

/// All messages that can be sent through the FLTK channel.
/// Each event handler sends one of these; the dispatch loop in main
/// handles them.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    // Editing
    Edit(EditOp),
    SyncCursor,

    // Controls
    FontBigger,
    FontSmaller,
    SetCaseMode(CaseMode),

    // Containment
    CloseRequested,
    WindowFocused,
    WindowUnfocused,
    Terminate,
}

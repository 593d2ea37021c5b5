//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Printable characters are not actions: they are inserted into the note
/// directly by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Caret movement
    /// Move caret one character left. Default: ←
    CursorLeft,
    /// Move caret one character right. Default: →
    CursorRight,
    /// Move caret to the previous line. Default: ↑
    CursorUp,
    /// Move caret to the next line. Default: ↓
    CursorDown,
    /// Move caret to the start of its line. Default: Home
    LineStart,
    /// Move caret to the end of its line. Default: End
    LineEnd,
    /// Move caret to the start of the note. Default: Ctrl+Home
    DocumentStart,
    /// Move caret to the end of the note. Default: Ctrl+End
    DocumentEnd,

    // Viewport
    /// Scroll up by one page height. Default: Page Up
    PageUp,
    /// Scroll down by one page height. Default: Page Down
    PageDown,

    // Editing
    /// Split the line at the caret. Default: Enter
    InsertNewline,
    /// Insert one indentation level. Default: Tab
    InsertIndent,
    /// Delete the character before the caret. Default: Backspace
    DeleteBackward,
    /// Delete the character after the caret. Default: Delete
    DeleteForward,

    // Card navigation
    /// Focus the next rendered card. Default: Ctrl+n
    NextCard,
    /// Focus the previous rendered card. Default: Ctrl+p
    PrevCard,
    /// Drop card focus and return to the text. Default: Esc
    ClearCardFocus,

    // Application
    /// Write the note back to its file. Default: Ctrl+s
    Save,
    /// Exit the application. Default: Ctrl+q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Whether the action moves the caret without touching the text.
    pub fn is_caret_motion(self) -> bool {
        matches!(
            self,
            KeyAction::CursorLeft
                | KeyAction::CursorRight
                | KeyAction::CursorUp
                | KeyAction::CursorDown
                | KeyAction::LineStart
                | KeyAction::LineEnd
                | KeyAction::DocumentStart
                | KeyAction::DocumentEnd
        )
    }

    /// Whether the action edits the note text.
    pub fn is_edit(self) -> bool {
        matches!(
            self,
            KeyAction::InsertNewline
                | KeyAction::InsertIndent
                | KeyAction::DeleteBackward
                | KeyAction::DeleteForward
        )
    }
}

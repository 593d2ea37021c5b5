//! Caret, viewport and editing action handler.
//!
//! Applies a [`KeyAction`] to the editor state and reports which kind of
//! change it made, so the caller can notify the timeline engine.

use crate::model::KeyAction;
use crate::scheduler::Trigger;
use crate::state::EditorState;

/// Handle an editing or motion action.
///
/// # Arguments
/// * `state` - Editor state to transform
/// * `action` - The action to handle
/// * `indent` - Number of spaces `InsertIndent` inserts
///
/// Returns the trigger describing the change, or `None` if nothing changed
/// or the action is not an editing action (card navigation, save, quit).
pub fn handle_edit_action(
    state: &mut EditorState,
    action: KeyAction,
    indent: usize,
) -> Option<Trigger> {
    let cursor_before = state.cursor();
    let scroll_before = state.scroll_top();

    let edited = match action {
        KeyAction::CursorLeft => {
            state.move_left();
            false
        }
        KeyAction::CursorRight => {
            state.move_right();
            false
        }
        KeyAction::CursorUp => {
            state.move_up();
            false
        }
        KeyAction::CursorDown => {
            state.move_down();
            false
        }
        KeyAction::LineStart => {
            state.move_line_start();
            false
        }
        KeyAction::LineEnd => {
            state.move_line_end();
            false
        }
        KeyAction::DocumentStart => {
            state.move_document_start();
            false
        }
        KeyAction::DocumentEnd => {
            state.move_document_end();
            false
        }
        KeyAction::PageUp => {
            state.page(-page_step(state));
            false
        }
        KeyAction::PageDown => {
            state.page(page_step(state));
            false
        }
        KeyAction::InsertNewline => {
            state.insert_char('\n');
            true
        }
        KeyAction::InsertIndent => {
            state.insert_str(&" ".repeat(indent));
            indent > 0
        }
        KeyAction::DeleteBackward => state.delete_backward(),
        KeyAction::DeleteForward => state.delete_forward(),
        KeyAction::NextCard
        | KeyAction::PrevCard
        | KeyAction::ClearCardFocus
        | KeyAction::Save
        | KeyAction::Quit => return None,
    };

    state.reveal_cursor();
    classify_change(state, edited, cursor_before, scroll_before)
}

/// Insert a typed character.
///
/// Always a document change.
pub fn handle_insert_char(state: &mut EditorState, c: char) -> Trigger {
    state.insert_char(c);
    state.reveal_cursor();
    Trigger::DocumentChanged
}

fn page_step(state: &EditorState) -> isize {
    isize::try_from(state.viewport_height()).unwrap_or(isize::MAX)
}

fn classify_change(
    state: &EditorState,
    edited: bool,
    cursor_before: usize,
    scroll_before: usize,
) -> Option<Trigger> {
    if edited {
        Some(Trigger::DocumentChanged)
    } else if state.scroll_top() != scroll_before {
        Some(Trigger::ViewportChanged)
    } else if state.cursor() != cursor_before {
        Some(Trigger::SelectionChanged)
    } else {
        None
    }
}

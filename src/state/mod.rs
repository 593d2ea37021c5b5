//! Editor state machine.
//!
//! State transitions are plain methods and handler functions, testable
//! without a terminal.

pub mod edit_handler;
pub mod editor;
pub mod overlay_state;

pub use edit_handler::{handle_edit_action, handle_insert_char};
pub use editor::EditorState;
pub use overlay_state::OverlayState;

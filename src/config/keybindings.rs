//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Printable characters without Ctrl/Alt are not bound; the editor inserts
/// them as text.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only the code and modifiers take part in the lookup, so release and
    /// repeat events resolve like presses.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let normalized = KeyEvent::new(key.code, normalize_modifiers(key.code, key.modifiers));
        self.bindings.get(&normalized).copied()
    }

    /// Bind `key` to `action`, replacing any earlier binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

/// Some terminals report Shift with uppercase letters and some don't.
fn normalize_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyModifiers {
    match code {
        KeyCode::Char(c) if c.is_uppercase() => modifiers.difference(KeyModifiers::SHIFT),
        _ => modifiers,
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Caret movement
        bindings.bind(KeyCode::Left, KeyModifiers::NONE, KeyAction::CursorLeft);
        bindings.bind(KeyCode::Right, KeyModifiers::NONE, KeyAction::CursorRight);
        bindings.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::CursorUp);
        bindings.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::CursorDown);
        bindings.bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::LineStart);
        bindings.bind(KeyCode::End, KeyModifiers::NONE, KeyAction::LineEnd);
        bindings.bind(KeyCode::Home, KeyModifiers::CONTROL, KeyAction::DocumentStart);
        bindings.bind(KeyCode::End, KeyModifiers::CONTROL, KeyAction::DocumentEnd);

        // Page navigation
        bindings.bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);
        bindings.bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);

        // Editing
        bindings.bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::InsertNewline);
        bindings.bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::InsertIndent);
        bindings.bind(KeyCode::Backspace, KeyModifiers::NONE, KeyAction::DeleteBackward);
        bindings.bind(KeyCode::Delete, KeyModifiers::NONE, KeyAction::DeleteForward);

        // Card navigation
        bindings.bind(KeyCode::Char('n'), KeyModifiers::CONTROL, KeyAction::NextCard);
        bindings.bind(KeyCode::Char('p'), KeyModifiers::CONTROL, KeyAction::PrevCard);
        bindings.bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::ClearCardFocus);

        // Application controls
        bindings.bind(KeyCode::Char('s'), KeyModifiers::CONTROL, KeyAction::Save);
        bindings.bind(KeyCode::Char('q'), KeyModifiers::CONTROL, KeyAction::Quit);
        bindings.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    #[test]
    fn default_bindings_map_ctrl_n_and_ctrl_p_to_card_navigation() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            Some(KeyAction::NextCard)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL)),
            Some(KeyAction::PrevCard)
        );
    }

    #[test]
    fn plain_letters_are_unbound() {
        let bindings = KeyBindings::default();
        for c in ['n', 'q', 's', 'j'] {
            assert_eq!(
                bindings.get(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
                None,
                "'{c}' must be typed, not bound"
            );
        }
    }

    #[test]
    fn ctrl_home_and_end_jump_to_document_edges() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Home, KeyModifiers::CONTROL)),
            Some(KeyAction::DocumentStart)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::End, KeyModifiers::NONE)),
            Some(KeyAction::LineEnd)
        );
    }

    #[test]
    fn both_quit_chords_quit() {
        let bindings = KeyBindings::default();
        for c in ['q', 'c'] {
            assert_eq!(
                bindings.get(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)),
                Some(KeyAction::Quit)
            );
        }
    }

    #[test]
    fn lookup_ignores_event_kind_and_state() {
        let bindings = KeyBindings::default();
        let repeat = KeyEvent {
            code: KeyCode::Char('s'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Repeat,
            state: KeyEventState::CAPS_LOCK,
        };
        assert_eq!(bindings.get(repeat), Some(KeyAction::Save));
    }

    #[test]
    fn bind_overrides_existing_binding() {
        let mut bindings = KeyBindings::default();
        bindings.bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::NextCard);
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            Some(KeyAction::NextCard)
        );
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::keymap::{KeyBinding, Keymap};

/// Rows moved per mouse wheel notch
const WHEEL_ROWS: i32 = 3;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextTab,
    PrevTab,
    SelectTab(usize),
    Search,
    Back,
    /// Wheel scroll in terminal rows, positive is down
    Wheel(i32),
    Click { column: u16, row: u16 },
    None,
}

/// Map a key event to an action through the keymap
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    let binding = KeyBinding::new(key.code, normalize_modifiers(key.code, key.modifiers));

    if keymap.is_g_prefix(&binding) {
        return if app.pending_key == Some('g') {
            keymap
                .get_pending_g_action()
                .cloned()
                .unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

/// Terminals differ on whether shifted characters carry the SHIFT modifier
fn normalize_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyModifiers {
    match code {
        KeyCode::Char(c) if c.is_ascii_uppercase() => modifiers.union(KeyModifiers::SHIFT),
        KeyCode::Char(c) if !c.is_ascii_alphabetic() => modifiers.difference(KeyModifiers::SHIFT),
        KeyCode::BackTab => modifiers.union(KeyModifiers::SHIFT),
        _ => modifiers,
    }
}

pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::Wheel(WHEEL_ROWS),
        MouseEventKind::ScrollUp => Action::Wheel(-WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => Action::Click {
            column: mouse.column,
            row: mouse.row,
        },
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_symbols_match_plain_bindings() {
        assert_eq!(
            normalize_modifiers(KeyCode::Char(']'), KeyModifiers::SHIFT),
            KeyModifiers::NONE
        );
        assert_eq!(
            normalize_modifiers(KeyCode::Char('G'), KeyModifiers::NONE),
            KeyModifiers::SHIFT
        );
        assert_eq!(
            normalize_modifiers(KeyCode::BackTab, KeyModifiers::NONE),
            KeyModifiers::SHIFT
        );
    }

    #[test]
    fn test_mouse_actions() {
        let event = |kind| MouseEvent {
            kind,
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(handle_mouse_event(event(MouseEventKind::ScrollDown)), Action::Wheel(3));
        assert_eq!(
            handle_mouse_event(event(MouseEventKind::Down(MouseButton::Left))),
            Action::Click { column: 4, row: 7 }
        );
        assert_eq!(handle_mouse_event(event(MouseEventKind::Moved)), Action::None);
    }
}

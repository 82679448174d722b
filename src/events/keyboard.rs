//! Keyboard event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::MultiSelect;

use super::Action;

/// Handle keyboard events and return the appropriate action.
pub fn handle_key_event(control: &MultiSelect, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('d') => Action::ToggleDisabled,
            KeyCode::Char('u') if control.is_open() => Action::SearchClear,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Enter | KeyCode::Tab => Action::ToggleOpen,
        _ if control.is_open() => handle_open(control, key),
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

fn handle_open(control: &MultiSelect, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::OutsideClick,
        KeyCode::Up => Action::HighlightPrev,
        KeyCode::Down => Action::HighlightNext,
        // Space toggles until the user starts typing a term
        KeyCode::Char(' ') if control.search_text().is_empty() => Action::ToggleHighlighted,
        KeyCode::Char(c) => Action::SearchChar(c),
        KeyCode::Backspace => Action::SearchBackspace,
        _ => Action::None,
    }
}

//! Mouse event handling.
//!
//! Clicks inside the control resolve through the interaction registry,
//! which render repopulates every frame. Clicks outside resolve through the
//! control's outside-click listener.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::controller::MultiSelect;
use crate::pointer::{InteractionRegistry, PointerRegistry};

use super::Action;

/// Handle mouse events and return the appropriate action.
pub fn handle_mouse_event(
    control: &MultiSelect,
    interactions: &InteractionRegistry,
    pointers: &PointerRegistry,
    mouse: MouseEvent,
) -> Action {
    let x = mouse.column;
    let y = mouse.row;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let outside = control
                .listener_id()
                .is_some_and(|id| pointers.outside(x, y).contains(&id));
            if outside {
                Action::OutsideClick
            } else {
                interactions.handle_click(x, y)
            }
        }
        MouseEventKind::ScrollUp if control.is_open() => Action::HighlightPrev,
        MouseEventKind::ScrollDown if control.is_open() => Action::HighlightNext,
        _ => Action::None,
    }
}

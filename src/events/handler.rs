//! Central event handler that coordinates keyboard and mouse events.

use crossterm::event::{Event, KeyEventKind};

use crate::controller::MultiSelect;
use crate::pointer::{InteractionRegistry, PointerRegistry};

use super::Action;
use super::keyboard::handle_key_event;
use super::mouse::handle_mouse_event;

/// Central event handler for the host.
pub struct EventHandler;

impl EventHandler {
    /// Handle a crossterm event (keyboard, mouse, paste) and return an action.
    pub fn handle_event(
        control: &MultiSelect,
        interactions: &InteractionRegistry,
        pointers: &PointerRegistry,
        event: &Event,
    ) -> Action {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(control, *key),
            Event::Mouse(mouse) => handle_mouse_event(control, interactions, pointers, *mouse),
            _ => Action::None,
        }
    }
}

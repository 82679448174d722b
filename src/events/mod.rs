//! Event handling for keyboard and mouse input.
//!
//! Terminal events are mapped to `Action`s here; the control applies them
//! through `MultiSelect::apply`, and the host handles the rest.

mod action;
mod handler;
mod keyboard;
mod mouse;

pub use action::Action;
pub use handler::EventHandler;

//! Terminal rendering for the multi-select control and its demo host.

pub mod components;
pub mod theme;
pub mod ui;

use ratatui::layout::Rect;

use crate::pointer::Bounds;

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Bounds::new(rect.x, rect.y, rect.width, rect.height)
    }
}

//! UI components for the TUI.
//!
//! - `value_box` - Closed-state summary ("Selected N" / "All")
//! - `dropdown` - Search line and checkbox list
//! - `details` - Names of the selected items

mod details;
mod dropdown;
mod value_box;

pub use details::render_details;
pub use dropdown::{render_dropdown, dropdown_height};
pub use value_box::{render_value_box, summary_text};

/// Truncate to `max` characters, marking the cut with "...".
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

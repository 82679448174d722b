//! Selected item names, shown while the dropdown is closed.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::controller::MultiSelect;
use crate::tui::theme::*;

pub fn render_details(frame: &mut Frame, area: Rect, control: &MultiSelect) {
    let details = control.selected_details();
    if details.is_empty() {
        return;
    }

    let mut spans = vec![Span::styled("Selected: ", Style::new().fg(TEXT_DIM))];
    for (i, item) in details.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(", ", Style::new().fg(TEXT_DIM)));
        }
        let name = if item.name.is_empty() { item.id.as_str() } else { item.name.as_str() };
        spans.push(Span::styled(name.to_string(), Style::new().fg(ACCENT_MINT)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

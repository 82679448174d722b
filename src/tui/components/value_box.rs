//! Value box: the always-visible part of the control.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::controller::MultiSelect;
use crate::events::Action;
use crate::pointer::InteractionRegistry;
use crate::tui::theme::*;

/// Summary shown in the value box.
pub fn summary_text(control: &MultiSelect) -> String {
    match control.selected_ids().len() {
        0 => "All".to_string(),
        n => format!("Selected {}", n),
    }
}

pub fn render_value_box(
    frame: &mut Frame,
    area: Rect,
    control: &MultiSelect,
    interactions: &mut InteractionRegistry,
) {
    let disabled = control.props().disabled;
    let border_color = if control.is_open() { ACCENT_BLUE } else { BORDER };

    let text_style = if disabled || control.selected_ids().is_empty() {
        Style::new().fg(TEXT_DIM)
    } else {
        Style::new().fg(TEXT_WHITE)
    };

    let summary = summary_text(control);
    let arrow = if control.is_open() { "▴" } else { "▾" };
    let inner_width = area.width.saturating_sub(2) as usize;
    let padding = inner_width.saturating_sub(summary.chars().count() + 2);

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(summary, text_style),
        Span::raw(" ".repeat(padding)),
        Span::styled(arrow, Style::new().fg(TEXT_DIM)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(border_color));

    frame.render_widget(Paragraph::new(line).block(block), area);
    interactions.register_click("value_box", area.into(), Action::ToggleOpen);
}

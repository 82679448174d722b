//! Dropdown: search line plus the checkbox list of candidates.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::controller::MultiSelect;
use crate::events::Action;
use crate::picker::Picker;
use crate::pointer::{Bounds, InteractionRegistry, InteractiveRegion};
use crate::tui::theme::*;

use super::truncate;

/// Most list rows shown at once.
const MAX_VISIBLE_ROWS: u16 = 10;

/// Outer height for the current candidate count (borders + search + rows).
pub fn dropdown_height(control: &MultiSelect) -> u16 {
    let rows = u16::try_from(control.candidates().len())
        .unwrap_or(u16::MAX)
        .clamp(1, MAX_VISIBLE_ROWS);
    rows + 3
}

pub fn render_dropdown(
    frame: &mut Frame,
    area: Rect,
    control: &MultiSelect,
    interactions: &mut InteractionRegistry,
) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(ACCENT_BLUE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let mut lines: Vec<Line> = vec![];

    // Search line
    let search = control.search_text();
    if search.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("/ ", Style::new().fg(TEXT_DIM)),
            Span::styled("Search...", Style::new().fg(TEXT_DIM).italic()),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::styled("/ ", Style::new().fg(ACCENT_GOLD)),
            Span::styled(search.to_string(), Style::new().fg(TEXT_WHITE)),
        ]));
    }

    let list_top = inner.y + 1;
    let available = inner.height.saturating_sub(1) as usize;

    if control.is_loading() {
        lines.push(Line::styled("  Loading...", Style::new().fg(TEXT_DIM).italic()));
    } else if control.candidates().is_empty() {
        lines.push(Line::styled("  Nothing found", Style::new().fg(TEXT_DIM)));
    } else {
        // Keep the highlighted row visible
        let highlighted = control.selected_index();
        let scroll_offset = if highlighted >= available {
            highlighted + 1 - available
        } else {
            0
        };

        let name_width = inner.width.saturating_sub(12) as usize;

        for (row, (i, item)) in control
            .candidates()
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(available)
            .enumerate()
        {
            let is_highlighted = i == highlighted;
            let checked = control.is_checked(&item.id);

            let cursor = if is_highlighted { "> " } else { "  " };
            let checkbox = if checked { "[x] " } else { "[ ] " };
            let check_style = if checked {
                Style::new().fg(ACCENT_MINT)
            } else {
                Style::new().fg(TEXT_DIM)
            };
            let name_style = if is_highlighted {
                Style::new().fg(TEXT_WHITE).bold()
            } else {
                Style::new().fg(TEXT_WHITE)
            };

            let mut spans = vec![
                Span::styled(cursor, Style::new().fg(ACCENT_CORAL)),
                Span::styled(checkbox, check_style),
            ];
            if !control.props().hide_ids {
                spans.push(Span::styled(format!("{}. ", i), Style::new().fg(TEXT_DIM)));
            }
            spans.push(Span::styled(truncate(&item.name, name_width), name_style));
            lines.push(Line::from(spans));

            let row_bounds = Bounds::new(inner.x, list_top + row as u16, inner.width, 1);
            interactions.register(
                InteractiveRegion::clickable("candidate_row", row_bounds, Action::ToggleItem(i))
                    .with_priority(10),
            );
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::pointer::Bounds;
use super::components::{dropdown_height, render_details, render_dropdown, render_value_box};
use super::theme::*;

/// Width of the control column.
const CONTROL_WIDTH: u16 = 48;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.interactions.clear();

    // Main vertical layout: title, content, status, hotkeys
    let main_layout = Layout::vertical([
        Constraint::Length(2), // Title + spacing
        Constraint::Min(0),    // Control
        Constraint::Length(1), // Status
        Constraint::Length(1), // Hotkeys
    ])
    .split(area);

    render_title(frame, main_layout[0], app);

    let content = main_layout[1];
    let width = CONTROL_WIDTH.min(content.width.saturating_sub(2));
    let value_area = Rect::new(content.x + 1, content.y, width, 3.min(content.height));
    render_value_box(frame, value_area, &app.control, &mut app.interactions);

    let below = Rect::new(
        value_area.x,
        value_area.y + value_area.height,
        width,
        content.height.saturating_sub(value_area.height),
    );

    let mut bounds: Bounds = value_area.into();
    if app.control.is_open() {
        let dropdown_area = Rect::new(
            below.x,
            below.y,
            below.width,
            dropdown_height(&app.control).min(below.height),
        );
        render_dropdown(frame, dropdown_area, &app.control, &mut app.interactions);
        bounds = bounds.union(&dropdown_area.into());
    } else {
        render_details(frame, below, &app.control);
    }
    app.control.set_bounds(bounds);

    render_status(frame, main_layout[2], app);
    render_hotkeys(frame, main_layout[3], app);
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let endpoint = app.control.props().endpoint().unwrap_or_else(|| "(no endpoint)".to_string());
    let mut spans = vec![
        Span::raw(" "),
        Span::styled("rmselect", Style::new().fg(ACCENT_CORAL).bold()),
        Span::styled("  ", Style::new()),
        Span::styled(endpoint, Style::new().fg(TEXT_DIM)),
    ];
    if app.control.props().disabled {
        spans.push(Span::styled("  disabled", Style::new().fg(ACCENT_GOLD)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(app.status.clone(), Style::new().fg(ACCENT_MINT)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_hotkeys(frame: &mut Frame, area: Rect, app: &App) {
    let keys: &[(&str, &str)] = if app.control.is_open() {
        &[
            ("enter", "close"),
            ("↑↓", "move"),
            ("space", "toggle"),
            ("#id", "by id"),
            ("esc", "click outside"),
        ]
    } else {
        &[("enter", "open"), ("^d", "disable"), ("q", "quit")]
    };

    let mut spans = vec![Span::raw(" ")];
    for (key, label) in keys {
        spans.push(Span::styled(*key, Style::new().fg(ACCENT_BLUE)));
        spans.push(Span::styled(format!(" {}  ", label), Style::new().fg(TEXT_DIM)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

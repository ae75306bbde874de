//! Restaurant detail screen rendering
//!
//! Shows every field of the restaurant passed in the route, including the
//! passthrough fields, as pretty-printed JSON.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::Restaurant;

/// Renders the detail screen for `restaurant`
pub fn render(frame: &mut Frame, app: &App, restaurant: &Restaurant) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name and image
            Constraint::Min(3),    // JSON body
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_header(frame, restaurant, chunks[0]);
    render_body(frame, app, restaurant, chunks[1]);
    render_help(frame, chunks[2]);
}

fn render_header(frame: &mut Frame, restaurant: &Restaurant, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            restaurant.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("image: ", Style::default().fg(Color::DarkGray)),
            Span::raw(restaurant.image_url.clone()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// JSON lines, scrolled by the app's offset clamped to the content
fn render_body(frame: &mut Frame, app: &App, restaurant: &Restaurant, area: Rect) {
    let json = restaurant.to_pretty_json();
    let lines: Vec<Line> = json.lines().map(|l| Line::from(l.to_string())).collect();

    let visible = area.height.saturating_sub(2);
    let line_count = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_scroll = line_count.saturating_sub(visible);
    let scroll = app.detail_scroll_offset.min(max_scroll);

    let block = Block::default()
        .title(format!(" {} ", app.navigation.breadcrumbs().join(" › ")))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help_text = Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Scroll  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Back  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ]);
    frame.render_widget(
        Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

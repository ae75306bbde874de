//! Restaurant list screen rendering
//!
//! Renders the listing with a header describing where the data came from
//! (cache, network, or a failed fetch) and the selected row highlighted.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::list_state::ListState;

/// Color for the data source label
fn state_color(state: &ListState) -> Color {
    match state {
        ListState::Empty => Color::Gray,
        ListState::CachedOnly(_) => Color::Yellow,
        ListState::Fresh(_) => Color::Green,
        ListState::Error { .. } => Color::Red,
    }
}

/// Human-readable age of the fresh data
fn freshness_text(app: &App) -> Option<String> {
    let updated = app.controller.last_updated()?;
    let elapsed = Local::now() - updated;
    let mins_ago = elapsed.num_minutes();
    Some(if mins_ago < 1 {
        "updated just now".to_string()
    } else if mins_ago < 60 {
        format!("updated {}m ago", mins_ago)
    } else {
        format!("updated {}h ago", elapsed.num_hours())
    })
}

/// Renders the restaurant list screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(3),    // List
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_help(frame, chunks[2]);
}

/// Renders the source/loading status line and any fetch error
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();

    let mut status = vec![
        Span::styled(
            app.navigation.breadcrumbs().join(" › "),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", state.label()),
            Style::default().fg(state_color(state)),
        ),
        Span::raw(format!("  {} items", state.len())),
    ];
    if app.controller.is_loading() {
        status.push(Span::styled(
            "  loading…",
            Style::default().fg(Color::Cyan),
        ));
    }
    if let Some(text) = freshness_text(app) {
        status.push(Span::styled(
            format!("  {}", text),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let second = match app.controller.last_error() {
        Some(error) => Line::from(Span::styled(
            format!("Fetch failed: {}", error),
            Style::default().fg(Color::Red),
        )),
        None if app.controller.is_offline() => Line::from(Span::styled(
            "Offline mode: showing saved listing",
            Style::default().fg(Color::DarkGray),
        )),
        None => Line::from(""),
    };

    frame.render_widget(Paragraph::new(vec![Line::from(status), second]), area);
}

/// Renders one row per restaurant, or a placeholder
fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Restaurants ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(restaurants) = app.controller.restaurants().filter(|list| !list.is_empty()) else {
        let placeholder = if app.controller.is_loading() {
            "Loading restaurants..."
        } else {
            "No restaurants to show"
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    // Keep the selected row visible
    let visible = area.height.saturating_sub(2) as usize;
    let offset = if visible > 0 && app.selected_index >= visible {
        app.selected_index + 1 - visible
    } else {
        0
    };

    let lines: Vec<Line> = restaurants
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(index, restaurant)| {
            let is_selected = index == app.selected_index;
            let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸ or space
            let name_style = if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let name = if restaurant.name.is_empty() {
                "(unnamed)"
            } else {
                restaurant.name.as_str()
            };

            Line::from(vec![
                Span::styled(cursor, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:<28}", name), name_style),
                Span::raw(" "),
                Span::styled(
                    restaurant.image_url.clone(),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the key hints at the bottom of the screen
fn render_help(frame: &mut Frame, area: Rect) {
    let help_text = Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Navigate  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Details  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" Refresh  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Back  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ]);
    let paragraph = Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

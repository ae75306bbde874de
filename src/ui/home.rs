//! Entry screen rendering

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::help_overlay::centered_rect;
use crate::app::App;

/// Renders the entry screen with a single call to action
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(36, 7, frame.area());

    let status = if app.controller.is_offline() {
        "offline: showing saved listing"
    } else {
        "press Enter to browse"
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Go To Restaurants ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(status, Style::default().fg(Color::DarkGray))),
    ];

    let block = Block::default()
        .title(" dinecache ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

//! Number check tab rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use super::helpers::input_paragraph;
use crate::tui::app::App;

/// Renders the number check tab
pub fn render_number_check(f: &mut Frame, app: &App, area: Rect) {
    let screen = &app.number_check;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Phone
            Constraint::Length(3), // Result
            Constraint::Min(0),
        ])
        .split(area);

    f.render_widget(input_paragraph("Phone number", &screen.phone, true), chunks[0]);

    let (text, color) = match (&screen.last_result, screen.checking) {
        (_, true) => ("Checking...".to_string(), Color::Yellow),
        (Some(result), false) if result.exists => {
            (format!("✓ {} is on WhatsApp", result.phone), Color::Green)
        }
        (Some(result), false) => (format!("✗ {} is not on WhatsApp", result.phone), Color::Red),
        (None, false) => ("Enter a number and press Enter".to_string(), Color::DarkGray),
    };

    let result = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Result"));
    f.render_widget(result, chunks[1]);
}

//! Quick send tab rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use super::helpers::input_paragraph;
use crate::phone::chat_id;
use crate::templates::EMOJIS;
use crate::tui::app::App;
use crate::tui::screens::{EmojiPicker, QuickSendField};

/// Renders the quick send tab
pub fn render_quick_send(f: &mut Frame, app: &App, area: Rect) {
    let screen = &app.quick_send;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Phone
            Constraint::Min(5),    // Message
            Constraint::Length(3), // Status
        ])
        .split(area);

    f.render_widget(
        input_paragraph("Phone", &screen.phone, screen.focus == QuickSendField::Phone),
        chunks[0],
    );
    f.render_widget(
        input_paragraph("Message", &screen.message, screen.focus == QuickSendField::Message),
        chunks[1],
    );

    let (status, color) = if screen.sending {
        ("Sending...".to_string(), Color::Yellow)
    } else if screen.phone.is_blank() {
        ("Enter a phone number".to_string(), Color::DarkGray)
    } else {
        (format!("Chat: {}", chat_id(&screen.phone.value)), Color::Green)
    };
    let status_widget = Paragraph::new(status)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status_widget, chunks[2]);
    if screen.emoji.open {
        render_emoji_picker(f, &screen.emoji, chunks[1]);
    }
}

fn render_emoji_picker(f: &mut Frame, picker: &EmojiPicker, area: Rect) {
    let popup_width = 44;
    let popup_height = 6;
    let popup_area = Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width.min(area.width),
        height: popup_height.min(area.height),
    };

    let lines: Vec<Line> = EMOJIS
        .chunks(EmojiPicker::COLUMNS)
        .enumerate()
        .map(|(row, emojis)| {
            let spans = emojis.iter().enumerate().map(|(col, emoji)| {
                let style = if row * EmojiPicker::COLUMNS + col == picker.selected_index {
                    Style::default().bg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Span::styled(format!(" {} ", emoji), style)
            });
            Line::from(spans.collect::<Vec<_>>())
        })
        .collect();

    let mut text = lines;
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Arrows: Move | Enter: Insert | Esc: Close",
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Emoji"),
    );
    f.render_widget(popup, popup_area);
}

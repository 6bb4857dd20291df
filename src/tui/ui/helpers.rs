//! UI helper functions

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use crate::queue::ItemStatus;
use crate::tui::screens::InputField;

/// Color used for a queue item status
pub fn status_color(status: ItemStatus) -> Color {
    match status {
        ItemStatus::Pending => Color::Yellow,
        ItemStatus::Sending => Color::Cyan,
        ItemStatus::Sent => Color::Green,
        ItemStatus::Failed => Color::Red,
    }
}

/// Bottom-right overlay area for `count` toasts
pub fn toast_area(size: Rect, count: usize) -> Rect {
    let width = size.width.min(48);
    let height = (count as u16).saturating_add(2).min(size.height);
    Rect {
        x: size.x + size.width.saturating_sub(width),
        y: size.y + size.height.saturating_sub(height),
        width,
        height,
    }
}

/// Bordered text field; the focused field gets a yellow border and a cursor
pub(crate) fn input_paragraph<'a>(title: &'a str, field: &'a InputField, focused: bool) -> Paragraph<'a> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines: Vec<Line> = field
        .value
        .split('\n')
        .map(|line| Line::from(Span::raw(line)))
        .collect();
    if focused {
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(
                "▏",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
            ));
        }
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        )
}

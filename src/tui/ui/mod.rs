//! UI rendering module - tab-specific rendering functions
//!
//! The frame is split into a header (session status), the tab bar, the
//! active tab's body and a key hint line. Toasts are drawn last, on top.

mod bulk_send;
mod favorites;
mod helpers;
mod number_check;
mod quick_send;
mod templates;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};
use crate::toast::ToastKind;
use crate::tui::app::App;
use crate::tui::types::Tab;

// Re-export render functions
pub use bulk_send::render_bulk_send;
pub use favorites::render_favorites;
pub use number_check::render_number_check;
pub use quick_send::render_quick_send;
pub use templates::render_templates;

// Re-export helper functions
pub use helpers::{status_color, toast_area};

/// Main UI rendering function - dispatches to tab-specific render functions
pub fn ui(f: &mut Frame, app: &App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(8),    // Body
            Constraint::Length(3), // Help
        ])
        .split(size);

    render_header(f, app, chunks[0]);
    render_tab_bar(f, app, chunks[1]);

    match app.current_tab {
        Tab::QuickSend => render_quick_send(f, app, chunks[2]),
        Tab::Favorites => render_favorites(f, app, chunks[2]),
        Tab::BulkSend => render_bulk_send(f, app, chunks[2]),
        Tab::Templates => render_templates(f, app, chunks[2]),
        Tab::NumberCheck => render_number_check(f, app, chunks[2]),
    }

    let help = Paragraph::new(format!("{} | F1-F5: Tabs | Esc: Quit", app.current_tab.help()))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);

    render_toasts(f, app, size);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let status_style = if app.is_connected() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };

    let mut spans = vec![
        Span::styled(
            "wapanel ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("| "),
        Span::styled(format!("● {}", app.session_label()), status_style),
    ];
    if let Some(name) = app.push_name() {
        spans.push(Span::raw(" as "));
        spans.push(Span::styled(name, Style::default().fg(Color::White)));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Session"));
    f.render_widget(header, area);
}

fn render_tab_bar(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("F{} {}", i + 1, tab.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, area);
}

fn render_toasts(f: &mut Frame, app: &App, size: Rect) {
    let toasts = app.toasts.visible();
    if toasts.is_empty() {
        return;
    }

    let area = toast_area(size, toasts.len());
    let lines: Vec<Line> = toasts
        .iter()
        .map(|toast| {
            let (icon, color) = match toast.kind {
                ToastKind::Success => ("✓ ", Color::Green),
                ToastKind::Error => ("✗ ", Color::Red),
            };
            Line::from(vec![
                Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(toast.message.clone(), Style::default().fg(color)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Notifications"));
    f.render_widget(Clear, area);
    f.render_widget(widget, area);
}

//! Bulk send tab rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};
use super::helpers::{input_paragraph, status_color};
use crate::queue::ItemStatus;
use crate::tui::app::App;
use crate::tui::screens::BulkField;

/// Renders the bulk send tab
pub fn render_bulk_send(f: &mut Frame, app: &App, area: Rect) {
    let screen = &app.bulk_send;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let form = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Recipients
            Constraint::Length(5), // Message
            Constraint::Length(3), // Delays
            Constraint::Length(3), // Mode
        ])
        .split(columns[0]);

    let recipients_title = format!("Recipients, one per line ({})", screen.recipient_count());
    f.render_widget(
        input_paragraph(
            &recipients_title,
            &screen.recipients,
            screen.focus == BulkField::Recipients,
        ),
        form[0],
    );
    f.render_widget(
        input_paragraph("Message", &screen.message, screen.focus == BulkField::Message),
        form[1],
    );

    let delays = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(form[2]);
    f.render_widget(
        input_paragraph("Min delay (s)", &screen.min_delay, screen.focus == BulkField::MinDelay),
        delays[0],
    );
    f.render_widget(
        input_paragraph("Max delay (s)", &screen.max_delay, screen.focus == BulkField::MaxDelay),
        delays[1],
    );

    let mode = if screen.sending {
        Span::styled("Sending immediately...", Style::default().fg(Color::Yellow))
    } else if screen.use_queue {
        Span::styled("Queue mode: random delays", Style::default().fg(Color::Green))
    } else {
        Span::styled("Immediate mode: no delays", Style::default().fg(Color::Yellow))
    };
    let mode_widget =
        Paragraph::new(Line::from(mode)).block(Block::default().borders(Borders::ALL).title("Mode"));
    f.render_widget(mode_widget, form[3]);

    render_queue(f, app, columns[1]);
}

fn render_queue(f: &mut Frame, app: &App, area: Rect) {
    let stats = app.queue.stats();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Progress
            Constraint::Length(3), // Stats
            Constraint::Min(3),    // Items
        ])
        .split(area);

    let state_label = if app.queue.is_running() { "Running" } else { "Idle" };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!("Queue - {}", state_label)))
        .gauge_style(
            Style::default()
                .fg(if stats.total > 0 && stats.pending == 0 { Color::Green } else { Color::Cyan })
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .percent(stats.progress_percentage())
        .label(format!(
            "{} of {} done",
            stats.sent + stats.failed,
            stats.total
        ));
    f.render_widget(gauge, chunks[0]);

    let stats_line = Line::from(vec![
        Span::styled(format!("Total {}  ", stats.total), Style::default().fg(Color::White)),
        Span::styled(
            format!("Pending {}  ", stats.pending),
            Style::default().fg(status_color(ItemStatus::Pending)),
        ),
        Span::styled(
            format!("Sent {}  ", stats.sent),
            Style::default().fg(status_color(ItemStatus::Sent)),
        ),
        Span::styled(
            format!("Failed {}", stats.failed),
            Style::default().fg(status_color(ItemStatus::Failed)),
        ),
    ]);
    f.render_widget(
        Paragraph::new(stats_line).block(Block::default().borders(Borders::ALL).title("Statistics")),
        chunks[1],
    );

    let items: Vec<ListItem> = app
        .queue
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let color = status_color(item.status);
            let mut spans = vec![
                Span::styled(format!("{:>3}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(item.phone.clone(), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  {}", item.status.as_str()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ];
            if item.status == ItemStatus::Pending && item.delay > 0 {
                spans.push(Span::styled(
                    format!("  ⏱ {}s", item.delay),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Items"));
    f.render_widget(list, chunks[2]);
}

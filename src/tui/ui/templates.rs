//! Templates tab rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use crate::templates;
use crate::tui::app::App;

/// Renders the templates tab
pub fn render_templates(f: &mut Frame, app: &App, area: Rect) {
    let all = templates::all();
    let selected = app.templates_screen.selected_index.min(all.len().saturating_sub(1));

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items: Vec<ListItem> = all
        .iter()
        .map(|template| {
            let accent = template
                .rgb()
                .map(|(r, g, b)| Color::Rgb(r, g, b))
                .unwrap_or(Color::White);
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(format!("{} ", template.emoji)),
                    Span::styled(
                        template.name,
                        Style::default().fg(accent).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("   {}", template.preview),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Templates"))
        .highlight_symbol("→ ");
    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_stateful_widget(list, columns[0], &mut state);

    if let Some(template) = all.get(selected) {
        let preview = Paragraph::new(template.text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Preview"));
        f.render_widget(preview, columns[1]);
    }
}

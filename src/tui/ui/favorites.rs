//! Favorites tab rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use super::helpers::input_paragraph;
use crate::tui::app::App;
use crate::tui::screens::FavoritesField;

/// Renders the favorites tab
pub fn render_favorites(f: &mut Frame, app: &App, area: Rect) {
    let screen = &app.favorites_screen;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let form = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Phone
            Constraint::Min(0),
        ])
        .split(columns[0]);

    f.render_widget(
        input_paragraph("Name (optional)", &screen.name, screen.focus == FavoritesField::Name),
        form[0],
    );
    f.render_widget(
        input_paragraph("Phone", &screen.phone, screen.focus == FavoritesField::Phone),
        form[1],
    );

    let favorites = app.favorites.list();
    let list_focused = screen.focus == FavoritesField::List;
    let border = if list_focused { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!("Favorites ({})", favorites.len()));

    if favorites.is_empty() {
        let empty = Paragraph::new("No favorites yet. Add one on the left.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, columns[1]);
        return;
    }

    let items: Vec<ListItem> = favorites
        .iter()
        .map(|fav| {
            ListItem::new(Line::from(vec![
                Span::styled("★ ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    fav.name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", fav.phone), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    let mut state = ListState::default();
    if list_focused {
        state.select(Some(screen.selected_index.min(favorites.len() - 1)));
    }
    f.render_stateful_widget(list, columns[1], &mut state);
}

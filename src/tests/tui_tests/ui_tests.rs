// UI Tests - rendering with a test backend

use super::{app_for, ctrl, key, wait_until};
use crate::queue::ItemStatus;
use crate::tests::mock_server::MockServer;
use crate::tui::ui::{status_color, toast_area, ui};
use crate::tui::{App, Tab};
use crossterm::event::KeyCode;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::Terminal;

fn render(app: &App) -> String {
    let backend = TestBackend::new(160, 40);
    let mut terminal = Terminal::new(backend).expect("Failed to create terminal");
    terminal.draw(|f| ui(f, app)).expect("Failed to draw");
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_status_colors() {
    assert_eq!(status_color(ItemStatus::Pending), Color::Yellow);
    assert_eq!(status_color(ItemStatus::Sent), Color::Green);
    assert_eq!(status_color(ItemStatus::Failed), Color::Red);
    assert_ne!(status_color(ItemStatus::Sending), status_color(ItemStatus::Pending));
}

#[test]
fn test_toast_area_bottom_right() {
    let screen = Rect::new(0, 0, 100, 30);
    let area = toast_area(screen, 2);
    assert_eq!(area.height, 4);
    assert_eq!(area.x + area.width, 100);
    assert_eq!(area.y + area.height, 30);

    let tiny = toast_area(Rect::new(0, 0, 20, 3), 5);
    assert_eq!(tiny.width, 20);
    assert_eq!(tiny.height, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_every_tab_renders() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);

    for tab in Tab::all() {
        app.show_tab(tab);
        let screen = render(&app);
        assert!(screen.contains(tab.label()), "tab bar missing {}", tab.label());
        assert!(screen.contains("Esc: Quit"));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_header_offline_when_gateway_fails() {
    let server = MockServer::start().await;
    server.respond("GET", "/api/sessions", 500, "{}");
    let mut app = app_for(&server);
    assert!(wait_until(&mut app, |_| !server.requests_to("/api/sessions").is_empty()).await);

    assert!(render(&app).contains("Offline"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_header_shows_connected_session() {
    let server = MockServer::start().await;
    server.respond(
        "GET",
        "/api/sessions",
        200,
        r#"[{"status": "WORKING", "me": {"pushName": "Desk"}}]"#,
    );
    let mut app = app_for(&server);
    assert!(wait_until(&mut app, |app| app.is_connected()).await);

    let screen = render(&app);
    assert!(screen.contains("Connected"));
    assert!(screen.contains("Desk"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_toasts_are_drawn() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);
    app.handle_key(key(KeyCode::F(5)));
    app.handle_key(key(KeyCode::Enter));

    let screen = render(&app);
    assert!(screen.contains("Notifications"));
    assert!(screen.contains("Please enter a phone number"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_bulk_tab_shows_queue() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);
    app.show_tab(Tab::BulkSend);
    app.bulk_send.recipients.set("111\n222\n333");
    app.bulk_send.message.set("hi");
    app.start_bulk_send();

    let screen = render(&app);
    assert!(screen.contains("0 of 3 done"));
    assert!(screen.contains("pending"));
    assert!(screen.contains("Pending 3"));
    assert!(screen.contains("Queue mode"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_templates_tab_shows_preview() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);
    app.show_tab(Tab::Templates);

    let screen = render(&app);
    assert!(screen.contains("Welcome"));
    assert!(screen.contains("Preview"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_quick_send_renders_message_lines_and_emoji_popup() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);
    app.quick_send.message.set("first line\nsecond line");

    let screen = render(&app);
    assert!(screen.contains("first line"));
    assert!(screen.contains("second line"));
    assert!(!screen.contains("Arrows: Move"));

    app.handle_key(ctrl('e'));
    let screen = render(&app);
    assert!(screen.contains("Emoji"));
    assert!(screen.contains("Arrows: Move | Enter: Insert | Esc: Close"));
}

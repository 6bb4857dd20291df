// App Tests - key handling and user actions

use super::{app_for, ctrl, has_toast, key, toast_messages, type_text, wait_until, FAVORITES_JSON};
use crate::queue::{ItemStatus, SendQueue};
use crate::templates::{self, EMOJIS};
use crate::tests::mock_server::MockServer;
use crate::tui::screens::{BulkField, FavoritesField, QuickSendField};
use crate::tui::Tab;
use crossterm::event::KeyCode;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tab_navigation_and_quit() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);
    assert_eq!(app.current_tab, Tab::QuickSend);

    app.handle_key(key(KeyCode::F(3)));
    assert_eq!(app.current_tab, Tab::BulkSend);

    app.handle_key(crossterm::event::KeyEvent::new(
        KeyCode::Right,
        crossterm::event::KeyModifiers::CONTROL,
    ));
    assert_eq!(app.current_tab, Tab::Templates);

    app.handle_key(key(KeyCode::F(9)));
    assert_eq!(app.current_tab, Tab::Templates);

    app.handle_key(key(KeyCode::Esc));
    assert!(app.should_quit);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_ctrl_q_quits() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);
    app.handle_key(ctrl('q'));
    assert!(app.should_quit);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_quick_send_requires_phone_and_message() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);

    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.quick_send.focus, QuickSendField::Message);
    type_text(&mut app, "hello");
    app.handle_key(ctrl('s'));

    assert!(has_toast(&app, "Please enter phone and message"));
    assert!(!app.quick_send.sending);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(server.requests_to("/api/sendText").is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_quick_send_success() {
    let server = MockServer::start().await;
    server.respond("POST", "/api/sendText", 201, "{}");
    server.respond("POST", "/api/history", 201, "{}");
    let mut app = app_for(&server);

    type_text(&mut app, "+1 555 1234");
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.quick_send.focus, QuickSendField::Message);
    type_text(&mut app, "Hi there");
    app.handle_key(ctrl('s'));
    assert!(app.quick_send.sending);

    assert!(wait_until(&mut app, |app| !app.quick_send.sending).await);
    assert!(has_toast(&app, "Message sent! 🚀"));
    assert!(app.quick_send.message.is_blank());
    assert_eq!(app.quick_send.phone.value, "+1 555 1234");

    let sends = server.requests_to("/api/sendText");
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].json()["chatId"], "15551234@c.us");
    assert_eq!(
        sends[0].headers.get("x-api-key").map(String::as_str),
        Some("test-key")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_quick_send_failure_keeps_message() {
    let server = MockServer::start().await;
    server.respond("POST", "/api/sendText", 500, "{}");
    let mut app = app_for(&server);

    type_text(&mut app, "123");
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "draft");
    app.handle_key(ctrl('s'));

    assert!(wait_until(&mut app, |app| !app.quick_send.sending).await);
    assert!(has_toast(&app, "Failed to send message"));
    assert_eq!(app.quick_send.message.value, "draft");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_quick_send_rejects_phone_without_digits() {
    let server = MockServer::start().await;
    server.respond("POST", "/api/sendText", 201, "{}");
    let mut app = app_for(&server);

    type_text(&mut app, "abc");
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "hello");
    app.handle_key(ctrl('s'));

    assert!(has_toast(&app, "Please enter phone and message"));
    assert!(!app.quick_send.sending);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(server.requests_to("/api/sendText").is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_quick_send_keeps_line_breaks() {
    let server = MockServer::start().await;
    server.respond("POST", "/api/sendText", 201, "{}");
    server.respond("POST", "/api/history", 201, "{}");
    let mut app = app_for(&server);

    type_text(&mut app, "555");
    app.handle_key(key(KeyCode::Enter));
    type_text(&mut app, "Hi team,");
    app.handle_key(key(KeyCode::Enter));
    assert!(!app.quick_send.sending);
    type_text(&mut app, "meeting at 5");
    assert_eq!(app.quick_send.message.value, "Hi team,\nmeeting at 5");

    app.quick_send.message.set("Hi team,\nmeeting at 5\nBring laptops");
    app.handle_key(ctrl('s'));

    assert!(wait_until(&mut app, |app| !app.quick_send.sending).await);
    let sends = server.requests_to("/api/sendText");
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].json()["text"], "Hi team,\nmeeting at 5\nBring laptops");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_emoji_picker_appends_to_message() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);

    type_text(&mut app, "555");
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "Great job ");
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.quick_send.focus, QuickSendField::Phone);

    app.handle_key(ctrl('e'));
    assert!(app.quick_send.emoji.open);
    type_text(&mut app, "x");
    assert_eq!(app.quick_send.phone.value, "555");

    app.handle_key(key(KeyCode::Right));
    app.handle_key(key(KeyCode::Enter));

    assert!(!app.quick_send.emoji.open);
    assert_eq!(app.quick_send.message.value, format!("Great job {}", EMOJIS[1]));
    assert_eq!(app.quick_send.focus, QuickSendField::Message);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_emoji_picker_escape_closes_without_quitting() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);

    app.handle_key(ctrl('e'));
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.quick_send.emoji.selected(), EMOJIS[8]);
    app.handle_key(key(KeyCode::Esc));

    assert!(!app.quick_send.emoji.open);
    assert!(!app.should_quit);
    assert!(app.quick_send.message.is_blank());

    app.handle_key(key(KeyCode::Esc));
    assert!(app.should_quit);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_favorites_loaded_and_used() {
    let server = MockServer::start().await;
    server.respond("GET", "/api/favorites", 200, FAVORITES_JSON);
    let mut app = app_for(&server);
    assert!(wait_until(&mut app, |app| app.favorites.len() == 2).await);

    app.handle_key(key(KeyCode::F(2)));
    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.favorites_screen.focus, FavoritesField::List);
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.current_tab, Tab::QuickSend);
    assert_eq!(app.quick_send.phone.value, "222");
    assert_eq!(app.quick_send.focus, QuickSendField::Message);
    assert!(has_toast(&app, "Selected B"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_add_favorite_success_and_conflict() {
    let server = MockServer::start().await;
    server.respond("POST", "/api/favorites", 201, r#"{"phone": "333", "name": "Ann"}"#);
    let mut app = app_for(&server);

    app.handle_key(key(KeyCode::F(2)));
    type_text(&mut app, "Ann");
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "333");
    app.handle_key(key(KeyCode::Enter));

    assert!(wait_until(&mut app, |app| has_toast(app, "Added to favorites! ⭐")).await);
    assert!(wait_until(&mut app, |app| app.favorites_screen.phone.is_blank()).await);
    assert_eq!(app.favorites.len(), 1);
    assert!(app.favorites_screen.name.is_blank());

    server.respond("POST", "/api/favorites", 409, "{}");
    type_text(&mut app, "333");
    app.handle_key(key(KeyCode::Enter));
    assert!(
        wait_until(&mut app, |app| has_toast(app, "This number is already in favorites")).await
    );
    assert_eq!(app.favorites.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_add_current_phone_to_favorites() {
    let server = MockServer::start().await;
    server.respond("POST", "/api/favorites", 409, "{}");
    let mut app = app_for(&server);

    app.handle_key(ctrl('f'));
    assert!(has_toast(&app, "Enter a phone number first"));

    type_text(&mut app, "111");
    app.handle_key(ctrl('f'));
    assert!(wait_until(&mut app, |app| has_toast(app, "Already in favorites!")).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_remove_selected_favorite() {
    let server = MockServer::start().await;
    server.respond("GET", "/api/favorites", 200, FAVORITES_JSON);
    server.respond("DELETE", "/api/favorites/111", 200, "{}");
    let mut app = app_for(&server);
    assert!(wait_until(&mut app, |app| app.favorites.len() == 2).await);

    app.handle_key(key(KeyCode::F(2)));
    app.handle_key(key(KeyCode::BackTab));
    assert_eq!(app.favorites_screen.focus, FavoritesField::List);
    app.handle_key(key(KeyCode::Char('d')));

    assert!(wait_until(&mut app, |app| app.favorites.len() == 1).await);
    assert!(has_toast(&app, "Removed from favorites"));
    assert_eq!(app.favorites.list()[0].phone, "222");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_load_favorites_into_bulk() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);
    app.handle_key(key(KeyCode::F(3)));

    app.handle_key(ctrl('l'));
    assert!(has_toast(&app, "No favorites saved"));

    server.respond("GET", "/api/favorites", 200, FAVORITES_JSON);
    app.favorites.load().await.unwrap();
    app.handle_key(ctrl('l'));
    assert_eq!(app.bulk_send.recipients.value, "111\n222");
    assert!(has_toast(&app, "Loaded 2 favorites!"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_bulk_validation() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);
    app.handle_key(key(KeyCode::F(3)));

    app.handle_key(ctrl('b'));
    assert!(has_toast(&app, "Please enter phones and message"));

    app.handle_key(ctrl('s'));
    assert!(has_toast(&app, "Queue is empty"));

    app.bulk_send.recipients.set("111");
    app.bulk_send.message.set("hi");
    app.bulk_send.min_delay.set("9");
    app.bulk_send.max_delay.set("2");
    app.handle_key(ctrl('b'));
    assert!(app.queue.is_empty());
    assert!(toast_messages(&app).iter().any(|m| m.contains("exceeds")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_bulk_queue_flow() {
    let server = MockServer::start().await;
    server.respond("POST", "/api/sendText", 200, "{}");
    server.respond("POST", "/api/history", 201, "{}");
    let mut app = app_for(&server).with_queue(SendQueue::with_delay_unit(Duration::from_millis(1)));

    app.handle_key(key(KeyCode::F(3)));
    type_text(&mut app, "111");
    app.handle_key(key(KeyCode::Enter));
    type_text(&mut app, "222");
    app.handle_key(key(KeyCode::Enter));
    type_text(&mut app, "333");
    assert_eq!(app.bulk_send.recipient_count(), 3);

    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.bulk_send.focus, BulkField::Message);
    type_text(&mut app, "Promo");
    app.handle_key(ctrl('b'));

    assert!(has_toast(&app, "Queue created with 3 messages! 🚀"));
    assert_eq!(app.queue.len(), 3);
    assert_eq!(app.queue.stats().pending, 3);

    app.handle_key(ctrl('s'));
    assert!(
        wait_until(&mut app, |app| toast_messages(app)
            .iter()
            .any(|m| m.starts_with("Queue completed! 🎉")))
        .await
    );
    assert!(app.queue.items().iter().all(|i| i.status == ItemStatus::Sent));
    assert_eq!(server.requests_to("/api/sendText").len(), 3);

    app.handle_key(ctrl('s'));
    assert!(has_toast(&app, "No pending messages in queue"));

    app.handle_key(ctrl('x'));
    assert!(app.queue.is_empty());
    assert!(has_toast(&app, "Queue cleared"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_bulk_message_keeps_line_breaks() {
    let server = MockServer::start().await;
    server.respond("POST", "/api/sendText", 200, "{}");
    server.respond("POST", "/api/history", 201, "{}");
    let mut app = app_for(&server).with_queue(SendQueue::with_delay_unit(Duration::from_millis(1)));
    app.handle_key(key(KeyCode::F(3)));
    app.bulk_send.recipients.set("111\n222");
    app.bulk_send.focus = BulkField::Message;

    type_text(&mut app, "Line one");
    app.handle_key(key(KeyCode::Enter));
    type_text(&mut app, "Line two");
    assert!(app.queue.is_empty());
    assert!(!app.bulk_send.sending);

    app.handle_key(ctrl('b'));
    assert_eq!(app.queue.len(), 2);
    assert_eq!(app.bulk_send.message.value, "Line one\nLine two");

    app.handle_key(ctrl('s'));
    assert!(wait_until(&mut app, |app| server.requests_to("/api/sendText").len() == 2).await);
    assert!(server
        .requests_to("/api/sendText")
        .iter()
        .all(|r| r.json()["text"] == "Line one\nLine two"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_start_queue_requires_message() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);
    app.handle_key(key(KeyCode::F(3)));
    app.bulk_send.recipients.set("111");
    app.bulk_send.message.set("hi");
    app.handle_key(ctrl('b'));
    app.bulk_send.message.clear();

    app.handle_key(ctrl('s'));
    assert!(has_toast(&app, "Please enter a message"));
    assert!(!app.queue.is_running());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_pause_queue() {
    let server = MockServer::start().await;
    server.respond("POST", "/api/sendText", 200, "{}");
    let mut app = app_for(&server);
    app.handle_key(key(KeyCode::F(3)));
    app.bulk_send.recipients.set("111\n222");
    app.bulk_send.message.set("hi");
    app.bulk_send.min_delay.set("30");
    app.bulk_send.max_delay.set("30");
    app.handle_key(ctrl('b'));

    app.handle_key(ctrl('s'));
    assert!(wait_until(&mut app, |app| app.queue.stats().sent == 1).await);

    app.handle_key(ctrl('p'));
    assert!(has_toast(&app, "Queue paused ⏸️"));
    assert!(wait_until(&mut app, |app| !app.queue.is_running()).await);
    assert_eq!(app.queue.stats().pending, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_bulk_immediate_mode() {
    let server = MockServer::start().await;
    server.respond("POST", "/api/sendText", 200, "{}");
    server.respond_when("POST", "/api/sendText", "333@c.us", 500, "{}");
    let mut app = app_for(&server);
    app.handle_key(key(KeyCode::F(3)));

    app.handle_key(ctrl('t'));
    assert!(!app.bulk_send.use_queue);

    app.bulk_send.recipients.set("111\n222\n333");
    app.bulk_send.message.set("Now");
    app.handle_key(ctrl('b'));
    assert!(app.bulk_send.sending);

    assert!(wait_until(&mut app, |app| !app.bulk_send.sending).await);
    assert!(has_toast(&app, "Sent to 2/3 contacts! 🎉"));
    assert!(app.queue.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_use_template() {
    let server = MockServer::start().await;
    let mut app = app_for(&server);

    app.handle_key(key(KeyCode::F(4)));
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));

    let template = templates::all()[1];
    assert_eq!(app.current_tab, Tab::QuickSend);
    assert_eq!(app.quick_send.message.value, template.text);
    assert!(has_toast(&app, &format!("Loaded \"{}\" template! ✨", template.name)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_number_check() {
    let server = MockServer::start().await;
    server.respond("GET", "/api/contacts/check-exists", 200, r#"{"numberExists": true}"#);
    let mut app = app_for(&server);
    app.handle_key(key(KeyCode::F(5)));

    app.handle_key(key(KeyCode::Enter));
    assert!(has_toast(&app, "Please enter a phone number"));

    type_text(&mut app, "+1 555");
    app.handle_key(key(KeyCode::Enter));
    assert!(app.number_check.checking);

    assert!(wait_until(&mut app, |app| !app.number_check.checking).await);
    assert!(has_toast(&app, "Number exists! ✅"));
    let result = app.number_check.last_result.clone().expect("no result");
    assert!(result.exists);
    assert_eq!(result.phone, "+1 555");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_number_check_failure() {
    let server = MockServer::start().await;
    server.respond("GET", "/api/contacts/check-exists", 502, "{}");
    let mut app = app_for(&server);
    app.handle_key(key(KeyCode::F(5)));

    type_text(&mut app, "123");
    app.handle_key(key(KeyCode::Enter));

    assert!(wait_until(&mut app, |app| !app.number_check.checking).await);
    assert!(has_toast(&app, "Failed to check number"));
    assert!(app.number_check.last_result.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_session_header_follows_poller() {
    let server = MockServer::start().await;
    server.respond(
        "GET",
        "/api/sessions",
        200,
        r#"[{"name": "default", "status": "WORKING", "me": {"pushName": "Desk"}}]"#,
    );
    let mut app = app_for(&server);

    assert!(wait_until(&mut app, |app| app.is_connected()).await);
    assert_eq!(app.session_label(), "Connected");
    assert_eq!(app.push_name().as_deref(), Some("Desk"));
}

// TUI Tests Module - Testing the public tui module
// - app_tests: App key handling and actions against a mock gateway/backend
// - screens_tests: tab state structs and input fields
// - types_tests: Tab enum
// - ui_tests: rendering with a test backend

mod app_tests;
mod ui_tests;

use super::mock_server::MockServer;
use crate::config::Settings;
use crate::tui::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::runtime::Handle;

pub(super) const FAVORITES_JSON: &str =
    r#"[{"phone": "111", "name": "A"}, {"phone": "222", "name": "B"}]"#;

pub(super) fn settings_for(server: &MockServer) -> Settings {
    Settings {
        gateway_url: server.url(),
        backend_url: server.url(),
        api_key: "test-key".to_string(),
        ..Settings::default()
    }
}

/// App wired to `server`; must run inside a tokio runtime
pub(super) fn app_for(server: &MockServer) -> App {
    App::new(settings_for(server), Handle::current())
}

pub(super) fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub(super) fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub(super) fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

pub(super) fn toast_messages(app: &App) -> Vec<String> {
    app.toasts.visible().into_iter().map(|t| t.message).collect()
}

pub(super) fn has_toast(app: &App, message: &str) -> bool {
    toast_messages(app).iter().any(|m| m == message)
}

/// Tick the app until `condition` holds (about two seconds at most)
pub(super) async fn wait_until<F: Fn(&App) -> bool>(app: &mut App, condition: F) -> bool {
    for _ in 0..100 {
        app.tick();
        if condition(app) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

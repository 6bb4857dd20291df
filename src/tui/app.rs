//! Main TUI application state and logic

use crate::backend::BackendClient;
use crate::config::Settings;
use crate::favorites::FavoritesBook;
use crate::gateway::GatewayClient;
use crate::messaging::Messenger;
use crate::phone::digits_only;
use crate::poller::SessionPoller;
use crate::queue::{DelayRange, RunOutcome, RunSummary, SendQueue};
use crate::templates;
use crate::toast::Toasts;
use crate::tui::screens::*;
use crate::tui::types::Tab;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

/// Results reported back to the UI by background tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Quick send finished
    QuickSendFinished {
        /// Whether the message was sent
        ok: bool,
    },
    /// A favorite was created from the favorites tab
    FavoriteAdded,
    /// Number check finished (`None` on failure)
    NumberChecked(Option<CheckOutcome>),
    /// Immediate bulk send finished
    BulkImmediateFinished,
    /// A queue run returned
    QueueFinished(RunSummary),
}

/// Application state
pub struct App {
    /// Current tab
    pub current_tab: Tab,
    /// Should quit
    pub should_quit: bool,
    /// Loaded settings
    pub settings: Settings,
    /// Quick send tab
    pub quick_send: QuickSendScreen,
    /// Favorites tab
    pub favorites_screen: FavoritesScreen,
    /// Bulk send tab
    pub bulk_send: BulkSendScreen,
    /// Templates tab
    pub templates_screen: TemplatesScreen,
    /// Number check tab
    pub number_check: NumberCheckScreen,
    /// Favorites cache
    pub favorites: FavoritesBook,
    /// Bulk send queue
    pub queue: SendQueue,
    /// Notification board
    pub toasts: Toasts,
    messenger: Messenger,
    poller: SessionPoller,
    runtime: Handle,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl App {
    /// Create the application and start background work on `runtime`
    ///
    /// Starts the session poller and the initial favorites load.
    pub fn new(settings: Settings, runtime: Handle) -> Self {
        let gateway = GatewayClient::new(settings.gateway_url.clone(), settings.api_key.clone());
        let backend = BackendClient::new(settings.backend_url.clone());
        let messenger = Messenger::new(gateway.clone(), backend.clone(), settings.session.clone());
        let favorites = FavoritesBook::new(backend);
        let poller = SessionPoller::spawn(&runtime, gateway, settings.poll_interval());
        let toasts = Toasts::new(settings.toast_ttl());
        let (events_tx, events_rx) = unbounded_channel();

        let app = Self {
            current_tab: Tab::QuickSend,
            should_quit: false,
            quick_send: QuickSendScreen::new(),
            favorites_screen: FavoritesScreen::new(),
            bulk_send: BulkSendScreen::new(settings.default_min_delay, settings.default_max_delay),
            templates_screen: TemplatesScreen::new(),
            number_check: NumberCheckScreen::new(),
            favorites,
            queue: SendQueue::new(),
            toasts,
            messenger,
            poller,
            runtime,
            events_tx,
            events_rx,
            settings,
        };

        app.load_favorites();
        app
    }

    /// Replace the queue (tests use a shorter delay unit)
    pub fn with_queue(mut self, queue: SendQueue) -> Self {
        self.queue = queue;
        self
    }

    /// Header label for the gateway session
    pub fn session_label(&self) -> String {
        self.poller.status_label()
    }

    /// Display name of the connected account
    pub fn push_name(&self) -> Option<String> {
        self.poller
            .session()
            .and_then(|s| s.push_name().map(str::to_string))
    }

    /// Whether the gateway session is connected
    pub fn is_connected(&self) -> bool {
        self.poller.is_connected()
    }

    /// Apply background results and expire old toasts; call once per frame
    pub fn tick(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
        self.toasts.prune();
        self.favorites_screen.clamp_selection(self.favorites.len());
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::QuickSendFinished { ok } => {
                self.quick_send.sending = false;
                if ok {
                    self.quick_send.message.clear();
                }
            }
            AppEvent::FavoriteAdded => {
                self.favorites_screen.name.clear();
                self.favorites_screen.phone.clear();
            }
            AppEvent::NumberChecked(outcome) => {
                self.number_check.checking = false;
                if outcome.is_some() {
                    self.number_check.last_result = outcome;
                }
            }
            AppEvent::BulkImmediateFinished => {
                self.bulk_send.sending = false;
            }
            AppEvent::QueueFinished(summary) => {
                info!("Queue run reported: {:?}", summary);
            }
        }
    }

    /// Switch to `tab`
    pub fn show_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }

    /// Dispatch a key press to the current tab
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if self.current_tab == Tab::QuickSend && self.quick_send.emoji.open {
            self.handle_emoji_key(key, ctrl);
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::F(n) => {
                if let Some(tab) = usize::from(n).checked_sub(1).and_then(Tab::from_index) {
                    self.show_tab(tab);
                }
                return;
            }
            KeyCode::Right if ctrl => {
                self.show_tab(self.current_tab.next());
                return;
            }
            KeyCode::Left if ctrl => {
                self.show_tab(self.current_tab.previous());
                return;
            }
            _ => {}
        }

        match self.current_tab {
            Tab::QuickSend => self.handle_quick_send_key(key, ctrl),
            Tab::Favorites => self.handle_favorites_key(key, ctrl),
            Tab::BulkSend => self.handle_bulk_send_key(key, ctrl),
            Tab::Templates => self.handle_templates_key(key),
            Tab::NumberCheck => self.handle_number_check_key(key, ctrl),
        }
    }

    fn handle_quick_send_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('f') if ctrl => self.add_current_to_favorites(),
            KeyCode::Char('v') if ctrl => self.paste_into_focused(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.quick_send.toggle_focus();
            }
            KeyCode::Char('s') if ctrl => self.send_message(),
            KeyCode::Char('e') if ctrl => self.quick_send.emoji.toggle(),
            KeyCode::Enter => match self.quick_send.focus {
                QuickSendField::Phone => self.quick_send.focus = QuickSendField::Message,
                QuickSendField::Message => self.quick_send.message.newline(),
            },
            KeyCode::Backspace => self.quick_send.focused_mut().backspace(),
            KeyCode::Char(c) if !ctrl => self.quick_send.focused_mut().add_char(c),
            _ => {}
        }
    }

    fn handle_emoji_key(&mut self, key: KeyEvent, ctrl: bool) {
        let picker = &mut self.quick_send.emoji;
        match key.code {
            KeyCode::Esc => picker.open = false,
            KeyCode::Char('e') if ctrl => picker.toggle(),
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Left | KeyCode::BackTab => picker.move_by(-1),
            KeyCode::Right | KeyCode::Tab => picker.move_by(1),
            KeyCode::Up => picker.move_by(-(EmojiPicker::COLUMNS as isize)),
            KeyCode::Down => picker.move_by(EmojiPicker::COLUMNS as isize),
            KeyCode::Enter => self.quick_send.insert_selected_emoji(),
            _ => {}
        }
    }

    fn handle_favorites_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Tab => {
                self.favorites_screen.next_focus();
                return;
            }
            KeyCode::BackTab => {
                self.favorites_screen.previous_focus();
                return;
            }
            _ => {}
        }

        if self.favorites_screen.focus == FavoritesField::List {
            let len = self.favorites.len();
            match key.code {
                KeyCode::Down | KeyCode::Char('j') => self.favorites_screen.next(len),
                KeyCode::Up | KeyCode::Char('k') => self.favorites_screen.previous(len),
                KeyCode::Enter => self.use_selected_favorite(),
                KeyCode::Delete | KeyCode::Char('d') => self.remove_selected_favorite(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('v') if ctrl => self.paste_into_focused(),
            KeyCode::Enter => self.add_favorite(),
            KeyCode::Backspace => {
                if let Some(field) = self.favorites_screen.focused_mut() {
                    field.backspace();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(field) = self.favorites_screen.focused_mut() {
                    field.add_char(c);
                }
            }
            _ => {}
        }
    }

    fn handle_bulk_send_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('b') if ctrl => self.start_bulk_send(),
            KeyCode::Char('s') if ctrl => self.start_queue(),
            KeyCode::Char('p') if ctrl => self.pause_queue(),
            KeyCode::Char('x') if ctrl => self.clear_queue(),
            KeyCode::Char('l') if ctrl => self.load_favorites_to_bulk(),
            KeyCode::Char('t') if ctrl => self.toggle_queue_mode(),
            KeyCode::Char('v') if ctrl => self.paste_into_focused(),
            KeyCode::Tab => self.bulk_send.next_focus(),
            KeyCode::BackTab => self.bulk_send.previous_focus(),
            KeyCode::Enter => {
                if self.bulk_send.focused_mut().is_multiline() {
                    self.bulk_send.focused_mut().newline();
                } else {
                    self.start_bulk_send();
                }
            }
            KeyCode::Backspace => self.bulk_send.focused_mut().backspace(),
            KeyCode::Char(c) if !ctrl => self.bulk_send.focused_mut().add_char(c),
            _ => {}
        }
    }

    fn handle_templates_key(&mut self, key: KeyEvent) {
        let len = templates::all().len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.templates_screen.next(len),
            KeyCode::Up | KeyCode::Char('k') => self.templates_screen.previous(len),
            KeyCode::Enter => self.use_selected_template(),
            _ => {}
        }
    }

    fn handle_number_check_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('v') if ctrl => self.paste_into_focused(),
            KeyCode::Enter => self.check_number(),
            KeyCode::Backspace => self.number_check.phone.backspace(),
            KeyCode::Char(c) if !ctrl => self.number_check.phone.add_char(c),
            _ => {}
        }
    }

    /// Paste clipboard text into the focused field of the current tab
    pub fn paste_into_focused(&mut self) {
        let field = match self.current_tab {
            Tab::QuickSend => Some(self.quick_send.focused_mut()),
            Tab::Favorites => self.favorites_screen.focused_mut(),
            Tab::BulkSend => Some(self.bulk_send.focused_mut()),
            Tab::NumberCheck => Some(&mut self.number_check.phone),
            Tab::Templates => None,
        };

        if let Some(field) = field {
            if let Err(e) = field.paste_from_clipboard() {
                self.toasts.error(e);
            }
        }
    }

    fn load_favorites(&self) {
        let favorites = self.favorites.clone();
        self.runtime.spawn(async move {
            if let Err(e) = favorites.load().await {
                warn!("Failed to load favorites: {}", e);
            }
        });
    }

    /// Send the quick send message
    pub fn send_message(&mut self) {
        let phone = self.quick_send.phone.value.trim().to_string();
        let message = self.quick_send.message.value.clone();
        if digits_only(&phone).is_empty() || message.is_empty() {
            self.toasts.error("Please enter phone and message");
            return;
        }
        if self.quick_send.sending {
            return;
        }
        self.quick_send.sending = true;

        let messenger = self.messenger.clone();
        let toasts = self.toasts.clone();
        let events = self.events_tx.clone();
        self.runtime.spawn(async move {
            let ok = match messenger.send_message(&phone, &message).await {
                Ok(()) => {
                    toasts.success("Message sent! 🚀");
                    true
                }
                Err(e) => {
                    warn!("Quick send to {} failed: {}", phone, e);
                    toasts.error("Failed to send message");
                    false
                }
            };
            let _ = events.send(AppEvent::QuickSendFinished { ok });
        });
    }

    /// Save the favorite typed on the favorites tab
    pub fn add_favorite(&mut self) {
        let phone = self.favorites_screen.phone.value.trim().to_string();
        if phone.is_empty() {
            self.toasts.error("Please enter a phone number");
            return;
        }
        let name = self.favorites_screen.name.value.trim().to_string();

        let favorites = self.favorites.clone();
        let toasts = self.toasts.clone();
        let events = self.events_tx.clone();
        self.runtime.spawn(async move {
            let name = (!name.is_empty()).then_some(name);
            match favorites.add(&phone, name.as_deref()).await {
                Ok(_) => {
                    toasts.success("Added to favorites! ⭐");
                    let _ = events.send(AppEvent::FavoriteAdded);
                }
                Err(e) if e.is_conflict() => {
                    toasts.error("This number is already in favorites");
                }
                Err(e) => {
                    warn!("Failed to add favorite {}: {}", phone, e);
                    toasts.error("Failed to add favorite");
                }
            }
        });
    }

    /// Save the quick send phone as a favorite
    pub fn add_current_to_favorites(&mut self) {
        let phone = self.quick_send.phone.value.trim().to_string();
        if phone.is_empty() {
            self.toasts.error("Enter a phone number first");
            return;
        }

        let favorites = self.favorites.clone();
        let toasts = self.toasts.clone();
        self.runtime.spawn(async move {
            match favorites.add(&phone, None).await {
                Ok(_) => {
                    toasts.success("Added to favorites! ⭐");
                }
                Err(e) if e.is_conflict() => {
                    toasts.error("Already in favorites!");
                }
                Err(e) => {
                    warn!("Failed to add favorite {}: {}", phone, e);
                    toasts.error("Failed to add favorite");
                }
            }
        });
    }

    /// Delete the selected favorite
    pub fn remove_selected_favorite(&mut self) {
        let Some(favorite) = self.favorites.get(self.favorites_screen.selected_index) else {
            return;
        };

        let favorites = self.favorites.clone();
        let toasts = self.toasts.clone();
        self.runtime.spawn(async move {
            match favorites.remove(&favorite.phone).await {
                Ok(()) => {
                    toasts.success("Removed from favorites");
                }
                Err(e) => {
                    warn!("Failed to remove favorite {}: {}", favorite.phone, e);
                    toasts.error("Failed to remove favorite");
                }
            }
        });
    }

    /// Copy the selected favorite's phone into quick send
    pub fn use_selected_favorite(&mut self) {
        let Some(favorite) = self.favorites.get(self.favorites_screen.selected_index) else {
            return;
        };

        self.quick_send.phone.set(favorite.phone);
        self.quick_send.focus = QuickSendField::Message;
        self.show_tab(Tab::QuickSend);
        self.toasts.success(format!("Selected {}", favorite.name));
    }

    /// Switch between paced queue and immediate bulk sending
    pub fn toggle_queue_mode(&mut self) {
        self.bulk_send.use_queue = !self.bulk_send.use_queue;
        let mode = if self.bulk_send.use_queue {
            "Queue mode on: random delays between messages"
        } else {
            "Queue mode off: messages are sent immediately"
        };
        self.toasts.success(mode);
    }

    /// Build the queue (queue mode) or send to everyone right away
    pub fn start_bulk_send(&mut self) {
        let recipients = self.bulk_send.recipients.value.clone();
        let message = self.bulk_send.message.value.clone();
        let count = self.bulk_send.recipient_count();
        if count == 0 || message.is_empty() {
            self.toasts.error("Please enter phones and message");
            return;
        }

        if self.bulk_send.use_queue {
            let range = match self.delay_range() {
                Ok(range) => range,
                Err(e) => {
                    self.toasts.error(e.to_string());
                    return;
                }
            };
            match self.queue.build(&recipients, range) {
                Ok(built) => {
                    self.toasts
                        .success(format!("Queue created with {} messages! 🚀", built));
                }
                Err(e) => {
                    self.toasts.error(e.to_string());
                }
            }
            return;
        }

        if self.bulk_send.sending {
            return;
        }
        self.bulk_send.sending = true;

        let messenger = self.messenger.clone();
        let toasts = self.toasts.clone();
        let events = self.events_tx.clone();
        self.runtime.spawn(async move {
            match messenger.send_bulk_immediate(&recipients, &message).await {
                Ok(report) => {
                    toasts.success(format!(
                        "Sent to {}/{} contacts! 🎉",
                        report.sent, report.total
                    ));
                }
                Err(e) => {
                    toasts.error(e.to_string());
                }
            }
            let _ = events.send(AppEvent::BulkImmediateFinished);
        });
    }

    fn delay_range(&self) -> crate::Result<DelayRange> {
        let min = self.bulk_send.min_delay.as_u64().ok_or_else(|| {
            crate::Error::Validation("Minimum delay must be a number".to_string())
        })?;
        let max = self.bulk_send.max_delay.as_u64().ok_or_else(|| {
            crate::Error::Validation("Maximum delay must be a number".to_string())
        })?;
        DelayRange::new(min, max)
    }

    /// Start or resume dispatching the queue
    pub fn start_queue(&mut self) {
        if self.queue.is_empty() {
            self.toasts.error("Queue is empty");
            return;
        }
        if self.queue.stats().pending == 0 {
            self.toasts.error("No pending messages in queue");
            return;
        }
        let message = self.bulk_send.message.value.clone();
        if message.is_empty() {
            self.toasts.error("Please enter a message");
            return;
        }

        let queue = self.queue.clone();
        let messenger = self.messenger.clone();
        let toasts = self.toasts.clone();
        let events = self.events_tx.clone();
        self.runtime.spawn(async move {
            let summary = queue.run(&messenger, &message).await;
            if summary.outcome == RunOutcome::Completed && summary.dispatched() > 0 {
                toasts.success(format!(
                    "Queue completed! 🎉 {} sent, {} failed",
                    summary.sent, summary.failed
                ));
            }
            let _ = events.send(AppEvent::QueueFinished(summary));
        });
    }

    /// Stop the queue after the in-flight message
    pub fn pause_queue(&mut self) {
        self.queue.pause();
        self.toasts.success("Queue paused ⏸️");
    }

    /// Stop the queue and discard all items
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.toasts.success("Queue cleared");
    }

    /// Fill the bulk recipient list with all favorites
    pub fn load_favorites_to_bulk(&mut self) {
        match self.favorites.recipients_text() {
            Some(text) => {
                self.bulk_send.recipients.set(text);
                self.toasts
                    .success(format!("Loaded {} favorites!", self.favorites.len()));
            }
            None => {
                self.toasts.error("No favorites saved");
            }
        }
    }

    /// Check whether the typed number is on WhatsApp
    pub fn check_number(&mut self) {
        let phone = self.number_check.phone.value.trim().to_string();
        if phone.is_empty() {
            self.toasts.error("Please enter a phone number");
            return;
        }
        self.number_check.checking = true;

        let messenger = self.messenger.clone();
        let toasts = self.toasts.clone();
        let events = self.events_tx.clone();
        self.runtime.spawn(async move {
            let outcome = match messenger.check_number(&phone).await {
                Ok(check) => {
                    if check.number_exists {
                        toasts.success("Number exists! ✅");
                    } else {
                        toasts.error("Number not found ❌");
                    }
                    Some(CheckOutcome {
                        phone,
                        exists: check.number_exists,
                    })
                }
                Err(e) => {
                    warn!("Number check for {} failed: {}", phone, e);
                    toasts.error("Failed to check number");
                    None
                }
            };
            let _ = events.send(AppEvent::NumberChecked(outcome));
        });
    }

    /// Copy the selected template into the quick send message
    pub fn use_selected_template(&mut self) {
        let Some(template) = templates::all().get(self.templates_screen.selected_index) else {
            return;
        };

        self.quick_send.message.set(template.text);
        self.quick_send.focus = QuickSendField::Message;
        self.show_tab(Tab::QuickSend);
        self.toasts
            .success(format!("Loaded \"{}\" template! ✨", template.name));
    }
}

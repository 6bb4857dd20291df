//! Transient notifications
//!
//! Every user-facing event becomes a toast. Toasts are append-only, never
//! deduplicated, and each one expires on its own once the display window
//! has passed.

use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Toast flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Positive outcome
    Success,
    /// Failure or validation problem
    Error,
}

/// A single notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Creation timestamp in milliseconds, unique per board
    pub id: i64,
    /// Text shown to the user
    pub message: String,
    /// Flavour
    pub kind: ToastKind,
    created: Instant,
}

impl Toast {
    /// Whether the toast is past its display window at `now`
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= ttl
    }
}

#[derive(Debug, Default)]
struct BoardState {
    entries: Vec<Toast>,
    last_id: i64,
}

/// Shared notification board
///
/// Cheap to clone; background tasks push to the same board the UI renders.
#[derive(Debug, Clone)]
pub struct Toasts {
    state: Arc<Mutex<BoardState>>,
    ttl: Duration,
}

impl Toasts {
    /// Create a board whose toasts live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(BoardState::default())),
            ttl,
        }
    }

    /// Display window
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Add a success toast
    pub fn success(&self, message: impl Into<String>) -> i64 {
        self.push(message, ToastKind::Success)
    }

    /// Add an error toast
    pub fn error(&self, message: impl Into<String>) -> i64 {
        self.push(message, ToastKind::Error)
    }

    /// Add a toast and return its id
    pub fn push(&self, message: impl Into<String>, kind: ToastKind) -> i64 {
        self.push_at(message, kind, Instant::now())
    }

    /// Add a toast created at `created`
    pub fn push_at(&self, message: impl Into<String>, kind: ToastKind, created: Instant) -> i64 {
        let mut state = self.state.lock();
        // Two toasts in the same millisecond still get distinct ids
        let id = Utc::now().timestamp_millis().max(state.last_id + 1);
        state.last_id = id;
        state.entries.push(Toast {
            id,
            message: message.into(),
            kind,
            created,
        });
        id
    }

    /// Toasts still inside their display window, oldest first
    pub fn visible(&self) -> Vec<Toast> {
        self.visible_at(Instant::now())
    }

    /// [`visible`](Self::visible) evaluated at `now`
    pub fn visible_at(&self, now: Instant) -> Vec<Toast> {
        self.state
            .lock()
            .entries
            .iter()
            .filter(|t| !t.is_expired(self.ttl, now))
            .cloned()
            .collect()
    }

    /// Drop expired toasts; returns how many were removed
    pub fn prune(&self) -> usize {
        self.prune_at(Instant::now())
    }

    /// [`prune`](Self::prune) evaluated at `now`
    pub fn prune_at(&self, now: Instant) -> usize {
        let mut state = self.state.lock();
        let before = state.entries.len();
        let ttl = self.ttl;
        state.entries.retain(|t| !t.is_expired(ttl, now));
        before - state.entries.len()
    }

    /// Remove a toast before it expires
    pub fn dismiss(&self, id: i64) {
        self.state.lock().entries.retain(|t| t.id != id);
    }

    /// Number of stored toasts, expired or not
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Whether no toast is stored
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

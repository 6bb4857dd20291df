//! Gateway session poller
//!
//! Fetches the session list once at startup and then on a fixed interval
//! for as long as the poller lives. Failed fetches are logged and skipped;
//! there is no backoff.

use crate::gateway::{GatewayClient, Session};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Background session status poller
///
/// Polling stops when the poller is dropped.
#[derive(Debug)]
pub struct SessionPoller {
    latest: Arc<RwLock<Option<Session>>>,
    task: JoinHandle<()>,
}

impl SessionPoller {
    /// Start polling `gateway` every `every` on `runtime`
    pub fn spawn(runtime: &Handle, gateway: GatewayClient, every: Duration) -> Self {
        let latest = Arc::new(RwLock::new(None));
        let shared = latest.clone();

        let task = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match gateway.list_sessions().await {
                    Ok(sessions) => match sessions.into_iter().next() {
                        Some(session) => {
                            debug!("Session status: {}", session.status);
                            *shared.write() = Some(session);
                        }
                        None => debug!("Gateway returned no sessions"),
                    },
                    Err(e) => warn!("Failed to fetch session: {}", e),
                }
            }
        });

        Self { latest, task }
    }

    /// Most recently fetched session
    pub fn session(&self) -> Option<Session> {
        self.latest.read().clone()
    }

    /// Whether the last fetched session is connected
    pub fn is_connected(&self) -> bool {
        self.latest.read().as_ref().is_some_and(Session::is_working)
    }

    /// Header label: `Connected`, the raw status, or `Offline`
    pub fn status_label(&self) -> String {
        status_label(self.latest.read().as_ref())
    }
}

impl Drop for SessionPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Label for a (possibly missing) session
pub fn status_label(session: Option<&Session>) -> String {
    match session {
        Some(s) if s.is_working() => "Connected".to_string(),
        Some(s) if !s.status.is_empty() => s.status.clone(),
        _ => "Offline".to_string(),
    }
}

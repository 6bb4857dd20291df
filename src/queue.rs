//! Bulk send queue
//!
//! This module handles paced bulk delivery:
//! - Building a queue from a newline-separated recipient list
//! - Randomized per-item delays within a configurable range
//! - Sequential dispatch with pause, resume and clear
//! - Live per-item status (`pending → sending → sent | failed`)
//!
//! Items are dispatched strictly one at a time. Cancellation is cooperative:
//! the run-control flag is checked between items and around each delay, and
//! an in-flight send is always allowed to finish.

use crate::phone::parse_recipients;
use crate::{Error, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

/// Delivery status of a queue item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Waiting to be sent
    Pending,
    /// Send request in flight
    Sending,
    /// Gateway accepted the message
    Sent,
    /// Send failed; never retried
    Failed,
}

impl ItemStatus {
    /// Lowercase wire/display name
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Sending => "sending",
            ItemStatus::Sent => "sent",
            ItemStatus::Failed => "failed",
        }
    }

    /// Whether no further transition is possible
    pub fn is_final(&self) -> bool {
        matches!(self, ItemStatus::Sent | ItemStatus::Failed)
    }

    fn can_become(&self, next: ItemStatus) -> bool {
        matches!(
            (self, next),
            (ItemStatus::Pending, ItemStatus::Sending)
                | (ItemStatus::Sending, ItemStatus::Sent)
                | (ItemStatus::Sending, ItemStatus::Failed)
        )
    }
}

/// One recipient of a bulk send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Digits-only recipient
    pub phone: String,
    /// Current delivery status
    pub status: ItemStatus,
    /// Seconds to wait before sending this item (0 for the first item)
    pub delay: u64,
}

/// Inclusive range of per-item delays, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: u64,
    max: u64,
}

impl DelayRange {
    /// Create a range; both bounds must be at least 1 and `min <= max`
    pub fn new(min: u64, max: u64) -> Result<Self> {
        if min == 0 {
            return Err(Error::Validation(
                "Minimum delay must be at least 1 second".to_string(),
            ));
        }
        if min > max {
            return Err(Error::Validation(format!(
                "Minimum delay ({}s) exceeds maximum delay ({}s)",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Lower bound
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Draw a uniformly distributed delay from the range
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Build queue items from a recipient list
///
/// One `pending` item per non-blank line, in input order. The first item has
/// delay 0, every other item an independent draw from `range`.
pub fn build_items<R: Rng + ?Sized>(input: &str, range: DelayRange, rng: &mut R) -> Vec<QueueItem> {
    parse_recipients(input)
        .into_iter()
        .enumerate()
        .map(|(idx, phone)| QueueItem {
            phone,
            status: ItemStatus::Pending,
            delay: if idx == 0 { 0 } else { range.sample(rng) },
        })
        .collect()
}

/// Per-status item counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// All items
    pub total: usize,
    /// Items waiting to be sent
    pub pending: usize,
    /// Items in flight
    pub sending: usize,
    /// Items sent
    pub sent: usize,
    /// Items that failed
    pub failed: usize,
}

impl QueueStats {
    fn from_items(items: &[QueueItem]) -> Self {
        items.iter().fold(
            Self {
                total: items.len(),
                ..Self::default()
            },
            |mut stats, item| {
                match item.status {
                    ItemStatus::Pending => stats.pending += 1,
                    ItemStatus::Sending => stats.sending += 1,
                    ItemStatus::Sent => stats.sent += 1,
                    ItemStatus::Failed => stats.failed += 1,
                }
                stats
            },
        )
    }

    /// Percentage of items that reached a final status
    pub fn progress_percentage(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        (((self.sent + self.failed) * 100) / self.total) as u16
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No pending item left
    Completed,
    /// Paused, cleared or replaced before the end
    Stopped,
}

/// Result of one [`SendQueue::run`] invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Items sent during this run
    pub sent: usize,
    /// Items that failed during this run
    pub failed: usize,
    /// How the run ended
    pub outcome: RunOutcome,
}

impl RunSummary {
    /// Number of items dispatched during this run
    pub fn dispatched(&self) -> usize {
        self.sent + self.failed
    }
}

/// Delivery side of the queue
///
/// Implemented by [`Messenger`](crate::messaging::Messenger) in production.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Send `text` to the digits-only `phone`
    async fn deliver(&self, phone: &str, text: &str) -> Result<()>;

    /// Record a send outcome in the history (best-effort)
    async fn record(&self, phone: &str, text: &str, status: ItemStatus) -> Result<()>;
}

#[derive(Debug, Default)]
struct QueueState {
    items: Vec<QueueItem>,
    /// Bumped on every build/clear so a running loop notices its queue is gone
    generation: u64,
}

/// Sequential bulk send queue
///
/// Cheap to clone; clones share the same queue.
#[derive(Debug, Clone)]
pub struct SendQueue {
    state: Arc<Mutex<QueueState>>,
    running: Arc<AtomicBool>,
    wake: Arc<Notify>,
    run_lock: Arc<tokio::sync::Mutex<()>>,
    delay_unit: Duration,
}

impl SendQueue {
    /// Create an empty queue whose delays are measured in seconds
    pub fn new() -> Self {
        Self::with_delay_unit(Duration::from_secs(1))
    }

    /// Create an empty queue with a custom delay unit
    pub fn with_delay_unit(delay_unit: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState::default())),
            running: Arc::new(AtomicBool::new(false)),
            wake: Arc::new(Notify::new()),
            run_lock: Arc::new(tokio::sync::Mutex::new(())),
            delay_unit,
        }
    }

    /// Replace the queue with items built from `recipients`
    ///
    /// Stops any running dispatch. Returns the number of items.
    pub fn build(&self, recipients: &str, range: DelayRange) -> Result<usize> {
        self.build_with_rng(recipients, range, &mut rand::thread_rng())
    }

    /// [`build`](Self::build) with a caller-provided random source
    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        recipients: &str,
        range: DelayRange,
        rng: &mut R,
    ) -> Result<usize> {
        let items = build_items(recipients, range, rng);
        if items.is_empty() {
            return Err(Error::Validation("No recipients to queue".to_string()));
        }

        let count = items.len();
        self.replace(items);
        info!(
            "Queue built with {} item(s), delays {}-{}s",
            count,
            range.min(),
            range.max()
        );
        Ok(count)
    }

    fn replace(&self, items: Vec<QueueItem>) {
        self.running.store(false, Ordering::SeqCst);
        {
            let mut state = self.state.lock();
            state.items = items;
            state.generation += 1;
        }
        self.wake.notify_waiters();
    }

    /// Dispatch every pending item in order
    ///
    /// Scans from the first item, skipping anything no longer pending, so
    /// sent and failed items are never retried. Only one run dispatches at a
    /// time; a concurrent call waits for the active run to finish first.
    pub async fn run<D: Dispatcher + ?Sized>(&self, dispatcher: &D, text: &str) -> RunSummary {
        self.running.store(true, Ordering::SeqCst);
        let _active = self.run_lock.lock().await;

        let generation = self.state.lock().generation;
        let mut summary = RunSummary {
            sent: 0,
            failed: 0,
            outcome: RunOutcome::Stopped,
        };
        let mut next_index = 0;
        let mut dispatched_any = false;

        loop {
            if !self.is_running() {
                debug!("Queue stopped before item {}", next_index);
                break;
            }

            let Some((index, phone, delay)) = self.next_pending(generation, next_index) else {
                if self.state.lock().generation == generation {
                    summary.outcome = RunOutcome::Completed;
                    self.running.store(false, Ordering::SeqCst);
                }
                break;
            };

            if dispatched_any && !self.pace(delay).await {
                debug!("Queue stopped while waiting before item {}", index);
                break;
            }

            if !self.transition(generation, index, ItemStatus::Sending) {
                break;
            }

            let status = match dispatcher.deliver(&phone, text).await {
                Ok(()) => ItemStatus::Sent,
                Err(e) => {
                    warn!("Queue item {} ({}) failed: {}", index, phone, e);
                    ItemStatus::Failed
                }
            };

            if !self.transition(generation, index, status) {
                debug!("Queue replaced while item {} was in flight", index);
            }

            match status {
                ItemStatus::Sent => {
                    summary.sent += 1;
                    info!("Queue item {} sent to {}", index, phone);
                    if let Err(e) = dispatcher.record(&phone, text, status).await {
                        debug!("History append failed for {}: {}", phone, e);
                    }
                }
                _ => summary.failed += 1,
            }

            dispatched_any = true;
            next_index = index + 1;
        }

        info!(
            "Queue run finished: {} sent, {} failed, {:?}",
            summary.sent, summary.failed, summary.outcome
        );
        summary
    }

    /// Continue with the remaining pending items
    pub async fn resume<D: Dispatcher + ?Sized>(&self, dispatcher: &D, text: &str) -> RunSummary {
        self.run(dispatcher, text).await
    }

    /// Stop after the in-flight item (if any) finishes
    pub fn pause(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.wake.notify_waiters();
        info!("Queue paused");
    }

    /// Stop dispatching and discard all items
    pub fn clear(&self) {
        self.replace(Vec::new());
        info!("Queue cleared");
    }

    /// Whether the run-control flag is set
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Snapshot of all items
    pub fn items(&self) -> Vec<QueueItem> {
        self.state.lock().items.clone()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    /// Whether the queue has no items
    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    /// Per-status counts
    pub fn stats(&self) -> QueueStats {
        QueueStats::from_items(&self.state.lock().items)
    }

    fn next_pending(&self, generation: u64, from: usize) -> Option<(usize, String, u64)> {
        let state = self.state.lock();
        if state.generation != generation {
            return None;
        }
        state
            .items
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, item)| item.status == ItemStatus::Pending)
            .map(|(idx, item)| (idx, item.phone.clone(), item.delay))
    }

    /// Move item `index` to `next` if the queue is unchanged and the move is legal
    fn transition(&self, generation: u64, index: usize, next: ItemStatus) -> bool {
        let mut state = self.state.lock();
        if state.generation != generation {
            return false;
        }
        match state.items.get_mut(index) {
            Some(item) if item.status.can_become(next) => {
                item.status = next;
                true
            }
            _ => false,
        }
    }

    /// Wait `delay` units unless stopped; returns whether dispatch may continue
    ///
    /// The flag is checked before and after the wait, and pause/clear wake the
    /// wait early. A pause followed by a resume during the wait does not
    /// shorten it.
    async fn pace(&self, delay: u64) -> bool {
        if delay == 0 {
            return self.is_running();
        }

        let wait = self
            .delay_unit
            .saturating_mul(u32::try_from(delay).unwrap_or(u32::MAX));
        let deadline = tokio::time::Instant::now() + wait;

        loop {
            let notified = self.wake.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if !self.is_running() {
                return false;
            }

            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => return self.is_running(),
                _ = &mut notified => {
                    if !self.is_running() {
                        return false;
                    }
                }
            }
        }
    }
}

impl Default for SendQueue {
    fn default() -> Self {
        Self::new()
    }
}

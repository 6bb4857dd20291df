//! Messaging actions
//!
//! Combines the gateway and backend clients into the panel's user actions:
//! single sends, immediate bulk sends and number checks. [`Messenger`] is also
//! the [`Dispatcher`] driving the bulk send queue.

use crate::backend::BackendClient;
use crate::gateway::{ContactCheck, GatewayClient};
use crate::phone::{chat_id, digits_only, parse_recipients};
use crate::queue::{Dispatcher, ItemStatus};
use crate::{Error, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Outcome of an immediate (unpaced) bulk send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkReport {
    /// Messages accepted by the gateway
    pub sent: usize,
    /// Recipients attempted
    pub total: usize,
}

/// Sends messages through the gateway and records them in the backend
#[derive(Debug, Clone)]
pub struct Messenger {
    gateway: GatewayClient,
    backend: BackendClient,
    session: String,
}

impl Messenger {
    /// Create a messenger sending through `session`
    pub fn new(gateway: GatewayClient, backend: BackendClient, session: impl Into<String>) -> Self {
        Self {
            gateway,
            backend,
            session: session.into(),
        }
    }

    /// Gateway client
    pub fn gateway(&self) -> &GatewayClient {
        &self.gateway
    }

    /// Backend client
    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    /// Gateway session name
    pub fn session(&self) -> &str {
        &self.session
    }

    /// Send a single message
    ///
    /// Empty phone or text fails with [`Error::Validation`] before any request.
    /// The history append after a successful send is best-effort.
    pub async fn send_message(&self, phone: &str, text: &str) -> Result<()> {
        if digits_only(phone).is_empty() || text.is_empty() {
            return Err(Error::Validation(
                "Please enter phone and message".to_string(),
            ));
        }

        let phone = digits_only(phone);
        self.deliver(&phone, text).await?;
        if let Err(e) = self.record(&phone, text, ItemStatus::Sent).await {
            debug!("History append failed for {}: {}", phone, e);
        }
        Ok(())
    }

    /// Check whether `phone` is registered on WhatsApp
    pub async fn check_number(&self, phone: &str) -> Result<ContactCheck> {
        let phone = digits_only(phone);
        if phone.is_empty() {
            return Err(Error::Validation("Please enter a phone number".to_string()));
        }

        self.gateway.check_contact_exists(&phone, &self.session).await
    }

    /// Send `text` to every recipient right away, without pacing
    ///
    /// Failures are skipped; the report counts successful sends.
    pub async fn send_bulk_immediate(&self, recipients: &str, text: &str) -> Result<BulkReport> {
        let phones = parse_recipients(recipients);
        if phones.is_empty() || text.is_empty() {
            return Err(Error::Validation(
                "Please enter phones and message".to_string(),
            ));
        }

        let mut report = BulkReport {
            sent: 0,
            total: phones.len(),
        };

        for phone in &phones {
            match self.deliver(phone, text).await {
                Ok(()) => {
                    report.sent += 1;
                    if let Err(e) = self.record(phone, text, ItemStatus::Sent).await {
                        debug!("History append failed for {}: {}", phone, e);
                    }
                }
                Err(e) => warn!("Immediate send to {} failed: {}", phone, e),
            }
        }

        info!("Immediate bulk send: {}/{} sent", report.sent, report.total);
        Ok(report)
    }
}

#[async_trait]
impl Dispatcher for Messenger {
    async fn deliver(&self, phone: &str, text: &str) -> Result<()> {
        self.gateway
            .send_text(&self.session, &chat_id(phone), text)
            .await
    }

    async fn record(&self, phone: &str, text: &str, status: ItemStatus) -> Result<()> {
        self.backend
            .append_history(phone, text, status.as_str())
            .await
    }
}

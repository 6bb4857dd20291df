//! WhatsApp gateway client
//!
//! Thin wrapper over the WAHA-compatible HTTP API:
//! - session listing (connectivity display)
//! - plain text sending
//! - contact existence checks
//!
//! Every call is a single attempt. Non-2xx responses become
//! [`Error::Status`](crate::Error::Status) without parsing the body.

use crate::http::{ensure_success, join};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Header carrying the static gateway key
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Session status reported while the account is connected
pub const STATUS_WORKING: &str = "WORKING";

const SESSIONS_PATH: &str = "/api/sessions";
const SEND_TEXT_PATH: &str = "/api/sendText";
const CHECK_EXISTS_PATH: &str = "/api/contacts/check-exists";

/// Account details of a connected session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionMe {
    /// WhatsApp id of the account
    #[serde(default)]
    pub id: Option<String>,
    /// Display name of the account
    #[serde(default, rename = "pushName")]
    pub push_name: Option<String>,
}

/// Gateway session as returned by `GET /api/sessions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Session name
    #[serde(default)]
    pub name: Option<String>,
    /// Raw status string (`WORKING`, `SCAN_QR_CODE`, `STOPPED`, ...)
    pub status: String,
    /// Account details, present once paired
    #[serde(default)]
    pub me: Option<SessionMe>,
}

impl Session {
    /// Whether the session is connected and able to send
    pub fn is_working(&self) -> bool {
        self.status == STATUS_WORKING
    }

    /// Display name of the paired account
    pub fn push_name(&self) -> Option<&str> {
        self.me.as_ref().and_then(|me| me.push_name.as_deref())
    }
}

/// Body of `POST /api/sendText`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTextRequest {
    /// Gateway session
    pub session: String,
    /// Target chat (`<digits>@c.us`)
    pub chat_id: String,
    /// Message body
    pub text: String,
}

/// Result of `GET /api/contacts/check-exists`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCheck {
    /// Whether the number is registered on WhatsApp
    pub number_exists: bool,
    /// Resolved chat id, when the gateway reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

/// HTTP client for the WhatsApp gateway
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GatewayClient {
    /// Create a client for the gateway at `base_url`
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Gateway base address
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List all sessions, in gateway order
    pub async fn list_sessions(&self) -> Result<Vec<Session>> {
        let response = self
            .client
            .get(join(&self.base_url, SESSIONS_PATH))
            .query(&[("all", "true")])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let sessions: Vec<Session> = ensure_success(response, SESSIONS_PATH)?.json().await?;
        debug!("Gateway reported {} session(s)", sessions.len());
        Ok(sessions)
    }

    /// The first session, which the panel treats as "the" session
    pub async fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.list_sessions().await?.into_iter().next())
    }

    /// Send a text message to `chat_id` through `session`
    ///
    /// Succeeds only on a 2xx response; the response body is ignored.
    pub async fn send_text(&self, session: &str, chat_id: &str, text: &str) -> Result<()> {
        info!("Sending text to {} via session {}", chat_id, session);

        let body = SendTextRequest {
            session: session.to_string(),
            chat_id: chat_id.to_string(),
            text: text.to_string(),
        };

        let response = self
            .client
            .post(join(&self.base_url, SEND_TEXT_PATH))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        ensure_success(response, SEND_TEXT_PATH)?;
        info!("Text delivered to gateway for {}", chat_id);
        Ok(())
    }

    /// Check whether `phone` is registered on WhatsApp
    pub async fn check_contact_exists(&self, phone: &str, session: &str) -> Result<ContactCheck> {
        let response = self
            .client
            .get(join(&self.base_url, CHECK_EXISTS_PATH))
            .query(&[("phone", phone), ("session", session)])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let check: ContactCheck = ensure_success(response, CHECK_EXISTS_PATH)?.json().await?;
        debug!("Number {} exists: {}", phone, check.number_exists);
        Ok(check)
    }
}

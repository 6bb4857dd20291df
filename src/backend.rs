//! Persistence backend client
//!
//! The backend owns two collections: favorites (keyed by phone) and the
//! append-only send history. No authentication header is sent.

use crate::http::{ensure_success, join};
use crate::phone::digits_only;
use crate::{Error, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const FAVORITES_PATH: &str = "/api/favorites";
const HISTORY_PATH: &str = "/api/history";

/// Saved recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Phone as entered; unique across the collection
    pub phone: String,
    /// Display label
    #[serde(default)]
    pub name: String,
}

impl Favorite {
    /// Create a favorite, defaulting a missing or blank name to the digits-only phone
    pub fn new(phone: impl Into<String>, name: Option<&str>) -> Self {
        let phone = phone.into();
        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => digits_only(&phone),
        };
        Self { phone, name }
    }
}

/// Body of `POST /api/history`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Digits-only recipient
    pub phone: String,
    /// Message body
    pub message: String,
    /// Send outcome (`sent` / `failed`)
    pub status: String,
}

/// HTTP client for the favorites/history backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Backend base address
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all favorites, in backend order
    pub async fn list_favorites(&self) -> Result<Vec<Favorite>> {
        let response = self
            .client
            .get(join(&self.base_url, FAVORITES_PATH))
            .send()
            .await?;

        let favorites: Vec<Favorite> = ensure_success(response, FAVORITES_PATH)?.json().await?;
        debug!("Loaded {} favorite(s)", favorites.len());
        Ok(favorites)
    }

    /// Create a favorite
    ///
    /// Returns [`Error::Conflict`] when the phone is already saved.
    pub async fn create_favorite(&self, phone: &str, name: &str) -> Result<Favorite> {
        let body = Favorite {
            phone: phone.to_string(),
            name: name.to_string(),
        };

        let response = self
            .client
            .post(join(&self.base_url, FAVORITES_PATH))
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(Error::Conflict(format!("{} is already a favorite", phone)));
        }

        let created: Favorite = ensure_success(response, FAVORITES_PATH)?.json().await?;
        info!("Created favorite {}", created.phone);
        Ok(created)
    }

    /// Delete the favorite with `phone`
    pub async fn delete_favorite(&self, phone: &str) -> Result<()> {
        let mut url = reqwest::Url::parse(&join(&self.base_url, FAVORITES_PATH))
            .map_err(|e| Error::Config(format!("Invalid backend url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Backend url cannot be a base: {}", self.base_url)))?
            .push(phone);

        let response = self.client.delete(url).send().await?;
        ensure_success(response, FAVORITES_PATH)?;
        info!("Deleted favorite {}", phone);
        Ok(())
    }

    /// Append a send record to the history collection
    pub async fn append_history(&self, phone: &str, message: &str, status: &str) -> Result<()> {
        let body = HistoryEntry {
            phone: phone.to_string(),
            message: message.to_string(),
            status: status.to_string(),
        };

        let response = self
            .client
            .post(join(&self.base_url, HISTORY_PATH))
            .json(&body)
            .send()
            .await?;

        ensure_success(response, HISTORY_PATH)?;
        debug!("Recorded history for {} ({})", phone, status);
        Ok(())
    }
}

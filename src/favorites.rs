//! Favorites address book
//!
//! A local cache of the backend's favorites collection. The backend is the
//! source of truth; the cache is refreshed on [`FavoritesBook::load`] and
//! updated on explicit add/remove only.

use crate::backend::{BackendClient, Favorite};
use crate::{Error, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Cached favorites backed by the backend collection
///
/// Cheap to clone; clones share the same cache.
#[derive(Debug, Clone)]
pub struct FavoritesBook {
    backend: BackendClient,
    entries: Arc<RwLock<Vec<Favorite>>>,
}

impl FavoritesBook {
    /// Create an empty book
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Replace the cache with the backend's collection
    pub async fn load(&self) -> Result<usize> {
        let favorites = self.backend.list_favorites().await?;
        let count = favorites.len();
        *self.entries.write() = favorites;
        info!("Favorites loaded: {}", count);
        Ok(count)
    }

    /// Save a new favorite
    ///
    /// `name` defaults to the digits-only phone. A duplicate phone fails with
    /// [`Error::Conflict`] and leaves the cache unchanged.
    pub async fn add(&self, phone: &str, name: Option<&str>) -> Result<Favorite> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(Error::Validation("Please enter a phone number".to_string()));
        }

        let draft = Favorite::new(phone, name);
        let created = self.backend.create_favorite(&draft.phone, &draft.name).await?;

        let mut entries = self.entries.write();
        if !entries.iter().any(|f| f.phone == created.phone) {
            entries.push(created.clone());
        }
        Ok(created)
    }

    /// Delete the favorite with `phone`
    pub async fn remove(&self, phone: &str) -> Result<()> {
        self.backend.delete_favorite(phone).await?;
        self.entries.write().retain(|f| f.phone != phone);
        Ok(())
    }

    /// Snapshot of the cached favorites
    pub fn list(&self) -> Vec<Favorite> {
        self.entries.read().clone()
    }

    /// Favorite at `index`
    pub fn get(&self, index: usize) -> Option<Favorite> {
        self.entries.read().get(index).cloned()
    }

    /// Number of cached favorites
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Newline-joined phones, ready for the bulk recipient list
    pub fn recipients_text(&self) -> Option<String> {
        let entries = self.entries.read();
        if entries.is_empty() {
            return None;
        }
        Some(
            entries
                .iter()
                .map(|f| f.phone.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

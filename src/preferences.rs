//! The persisted preference store.
//!
//! Typed access to the two keys the shell keeps in storage: the auth token and
//! the JSON-encoded favorites array. Reads never fail (bad or missing data reads
//! as absent/empty); writes hand storage errors back so callers can report them.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::StorageConfig;
use crate::models::FavoriteSet;
use crate::storage::{Storage, StorageError};

#[derive(Clone)]
pub struct PreferenceStore {
    storage: Arc<dyn Storage>,
    token_key: String,
    favorites_key: String,
}

impl PreferenceStore {
    pub fn new(storage: Arc<dyn Storage>, config: &StorageConfig) -> Self {
        Self {
            storage,
            token_key: config.token_key.clone(),
            favorites_key: config.favorites_key.clone(),
        }
    }

    pub fn read_token(&self) -> Option<String> {
        match self.storage.get_item(&self.token_key) {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                warn!("Could not read auth token from {} storage: {}", self.storage.name(), e);
                None
            }
        }
    }

    pub fn write_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_item(&self.token_key, token)
    }

    pub fn clear_token(&self) -> Result<(), StorageError> {
        debug!("Clearing stored auth token");
        self.storage.remove_item(&self.token_key)
    }

    pub fn read_favorites(&self) -> FavoriteSet {
        let raw = match self.storage.get_item(&self.favorites_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return FavoriteSet::new(),
            Err(e) => {
                warn!("Could not read favorites from {} storage: {}", self.storage.name(), e);
                return FavoriteSet::new();
            }
        };
        match serde_json::from_str::<FavoriteSet>(&raw) {
            Ok(set) => set,
            Err(e) => {
                warn!("Stored favorites are malformed, starting empty: {}", e);
                FavoriteSet::new()
            }
        }
    }

    pub fn write_favorites(&self, favorites: &FavoriteSet) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(favorites)?;
        self.storage.set_item(&self.favorites_key, &encoded)
    }
}

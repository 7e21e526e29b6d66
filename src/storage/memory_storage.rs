use std::collections::HashMap;
use std::sync::Mutex;

use super::{Storage, StorageError};
use crate::config::MemoryStorageConfig;

/// A process-local storage area, optionally bounded by a byte quota.
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new(config: &MemoryStorageConfig) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            quota_bytes: config.quota_bytes,
        }
    }
}

fn usage(items: &HashMap<String, String>) -> usize {
    items.iter().map(|(k, v)| k.len() + v.len()).sum()
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        if let Some(quota) = self.quota_bytes {
            let current = items.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let used = usage(&items) - current + key.len() + value.len();
            if used > quota {
                return Err(StorageError::QuotaExceeded { used, quota });
            }
        }
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_round_trip() {
        let storage = MemoryStorage::default();
        storage.set_item("auth_token", "abc").unwrap();
        assert_eq!(storage.get_item("auth_token").unwrap().as_deref(), Some("abc"));
        storage.remove_item("auth_token").unwrap();
        storage.remove_item("auth_token").unwrap();
        assert_eq!(storage.get_item("auth_token").unwrap(), None);
    }

    #[test]
    fn test_quota_exceeded_leaves_previous_value() {
        let storage = MemoryStorage::new(&MemoryStorageConfig {
            quota_bytes: Some(16),
        });
        // "favorites" + "[1]" = 12 bytes
        storage.set_item("favorites", "[1]").unwrap();

        let err = storage.set_item("favorites", "[1,2,3,4]").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded { used: 18, quota: 16 }
        ));
        assert_eq!(storage.get_item("favorites").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_quota_counts_replacement_not_addition() {
        let storage = MemoryStorage::new(&MemoryStorageConfig {
            quota_bytes: Some(12),
        });
        storage.set_item("favorites", "[1]").unwrap();
        storage.set_item("favorites", "[2]").unwrap();
        assert_eq!(storage.get_item("favorites").unwrap().as_deref(), Some("[2]"));
    }
}

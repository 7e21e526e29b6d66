use std::sync::Arc;

use tracing::info;

use super::{file_storage::FileStorage, memory_storage::MemoryStorage};
use crate::config::{StorageBackend, StorageConfig};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage document could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage quota exceeded: {used} of {quota} bytes")]
    QuotaExceeded { used: usize, quota: usize },
    #[error("storage lock poisoned")]
    Poisoned,
}

/// The Storage trait abstracts a synchronous string key/value area,
/// the same contract a browser's local storage offers.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn name(&self) -> &str;
}

/// Creates a concrete storage implementation based on the StorageConfig.
pub fn create_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>, StorageError> {
    match &config.backend {
        StorageBackend::File(file_config) => {
            let storage = FileStorage::open(file_config)?;
            info!("Using file storage at {}", file_config.path.display());
            Ok(Arc::new(storage))
        }
        StorageBackend::Memory(memory_config) => {
            info!(
                "Using in-memory storage (quota: {:?} bytes)",
                memory_config.quota_bytes
            );
            Ok(Arc::new(MemoryStorage::new(memory_config)))
        }
    }
}

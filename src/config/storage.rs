use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the preference store keeps its data, and under which keys.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct StorageConfig {
    #[serde(default = "default_token_key")]
    pub token_key: String,
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
    #[serde(flatten)]
    pub backend: StorageBackend,
}

/// The existing storage backends. We differentiate them via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(tag = "type")]
pub enum StorageBackend {
    #[serde(rename = "file")]
    File(FileStorageConfig),
    #[serde(rename = "memory")]
    Memory(MemoryStorageConfig),
}

/// A single JSON document on disk holding every key.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct FileStorageConfig {
    pub path: PathBuf,
}

/// Process-local storage, lost on restart. Mostly useful for tests and demos.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct MemoryStorageConfig {
    /// Upper bound on the summed size of keys and values, like a browser quota.
    pub quota_bytes: Option<usize>,
}

pub fn default_token_key() -> String {
    "auth_token".to_string()
}

pub fn default_favorites_key() -> String {
    "favorites".to_string()
}

impl StorageConfig {
    /// An unbounded in-memory store with the default keys.
    pub fn in_memory() -> Self {
        Self {
            token_key: default_token_key(),
            favorites_key: default_favorites_key(),
            backend: StorageBackend::Memory(MemoryStorageConfig::default()),
        }
    }
}

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use super::{Storage, StorageError};
use crate::config::FileStorageConfig;

type Document = BTreeMap<String, String>;

/// Keeps every key in one JSON object on disk.
///
/// Each mutation rewrites the whole document into a sibling temporary file and
/// renames it over the original, so a crash never leaves a half-written file.
/// A document that does not parse is read as empty and replaced on the next write.
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn open(config: &FileStorageConfig) -> Result<Self, StorageError> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path: config.path.clone(),
            lock: Mutex::new(()),
        })
    }

    fn load(&self) -> Result<Document, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Document::new());
        }
        match serde_json::from_str::<Document>(&raw) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                warn!(
                    "Storage document {} is corrupt, treating it as empty: {}",
                    self.path.display(),
                    e
                );
                Ok(Document::new())
            }
        }
    }

    fn save(&self, doc: &Document) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec_pretty(doc)?;
        let tmp = temp_path(&self.path);
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&encoded)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        debug!("Wrote {} keys to {}", doc.len(), self.path.display());
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut doc = self.load()?;
        if doc.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        doc.insert(key.to_string(), value.to_string());
        self.save(&doc)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut doc = self.load()?;
        if doc.remove(key).is_none() {
            return Ok(());
        }
        self.save(&doc)
    }

    fn name(&self) -> &str {
        "file"
    }
}

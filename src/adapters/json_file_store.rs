//! Key-value store backed by a single JSON object file.

use crate::domain::error::PricingError;
use crate::ports::store_port::KeyValueStore;
use directories::BaseDirs;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".print3d-pricing";
const STORE_FILE: &str = "store.json";

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at `~/.print3d-pricing/store.json`.
    pub fn default_location() -> Result<Self, PricingError> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf, PricingError> {
        let base_dirs = BaseDirs::new().ok_or_else(|| PricingError::Store {
            reason: "cannot determine home directory".into(),
        })?;
        Ok(base_dirs.home_dir().join(APP_DIR).join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PricingError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| PricingError::Store {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| PricingError::Store {
            reason: format!("corrupt store {}: {}", self.path.display(), e),
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), PricingError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content).map_err(|e| PricingError::Store {
            reason: format!("failed to write {}: {}", self.path.display(), e),
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PricingError> {
        let mut entries = self.read_all()?;
        Ok(entries.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PricingError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)?;
        tracing::debug!(path = %self.path.display(), key, "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PricingError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
            tracing::debug!(path = %self.path.display(), key, "removed value");
        }
        Ok(())
    }
}

//! Persistence of the input record as one JSON blob under a fixed key.
//!
//! Saving is an explicit step: callers invoke [`InputStore::save`] after each
//! mutation. Nothing in the pricing engine touches storage.

use crate::domain::error::PricingError;
use crate::domain::inputs::PricingInputs;
use crate::ports::store_port::KeyValueStore;

/// Namespace key the record lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "calc_preco_3d_v1";

pub struct InputStore<'a> {
    store: &'a dyn KeyValueStore,
    key: String,
}

impl<'a> InputStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: &'a dyn KeyValueStore, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    /// The persisted record, or `None` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<PricingInputs>, PricingError> {
        match self.store.get(&self.key)? {
            Some(blob) => {
                let inputs = serde_json::from_str(&blob)?;
                tracing::debug!(key = %self.key, "loaded persisted inputs");
                Ok(Some(inputs))
            }
            None => Ok(None),
        }
    }

    /// The persisted record, falling back to `defaults`.
    ///
    /// A blob that no longer parses is logged and replaced by `defaults`;
    /// store failures still propagate.
    pub fn load_or(&self, defaults: PricingInputs) -> Result<PricingInputs, PricingError> {
        match self.load() {
            Ok(Some(inputs)) => Ok(inputs),
            Ok(None) => Ok(defaults),
            Err(PricingError::Serialization { reason }) => {
                tracing::warn!(key = %self.key, %reason, "ignoring unreadable saved inputs");
                Ok(defaults)
            }
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, inputs: &PricingInputs) -> Result<(), PricingError> {
        let blob = serde_json::to_string(inputs)?;
        self.store.set(&self.key, &blob)
    }

    pub fn clear(&self) -> Result<(), PricingError> {
        self.store.remove(&self.key)
    }
}

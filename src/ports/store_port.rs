//! Local key-value store port trait.

use crate::domain::error::PricingError;

/// A flat map of text blobs, like a browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PricingError>;

    fn set(&self, key: &str, value: &str) -> Result<(), PricingError>;

    /// Removing a key that is not present is not an error.
    fn remove(&self, key: &str) -> Result<(), PricingError>;
}

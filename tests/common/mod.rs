#![allow(dead_code)]

use print3d_pricing::domain::error::PricingError;
use print3d_pricing::domain::inputs::{InputField, PricingInputs};
use print3d_pricing::ports::store_port::KeyValueStore;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::process::ExitCode;

/// In-memory stand-in for a local key-value store.
#[derive(Default)]
pub struct MemoryStore {
    pub entries: RefCell<HashMap<String, String>>,
    pub fail_with: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            fail_with: Some(reason.to_string()),
        }
    }

    fn check(&self) -> Result<(), PricingError> {
        match &self.fail_with {
            Some(reason) => Err(PricingError::Store {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PricingError> {
        self.check()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PricingError> {
        self.check()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PricingError> {
        self.check()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

pub fn inputs_with(changes: &[(InputField, f64)]) -> PricingInputs {
    let mut inputs = PricingInputs::defaults();
    for &(field, value) in changes {
        inputs.set(field, value);
    }
    inputs
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// ExitCode has no PartialEq; compare through Debug.
pub fn same_exit(a: ExitCode, b: ExitCode) -> bool {
    format!("{a:?}") == format!("{b:?}")
}

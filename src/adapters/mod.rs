//! Concrete adapter implementations for ports.

#[cfg(feature = "sqlite")]
pub mod sqlite_store;
pub mod file_config_adapter;
pub mod input_store;
pub mod json_file_store;
pub mod summary_report;

//! SQLite key-value store adapter.

use crate::domain::error::PricingError;
use crate::ports::store_port::KeyValueStore;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension, params};
use std::path::Path;

pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    pub fn open(db_path: &Path, pool_size: u32) -> Result<Self, PricingError> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .build(manager)
            .map_err(|e: r2d2::Error| PricingError::Store {
                reason: e.to_string(),
            })?;

        let store = Self { pool };
        store.initialize_schema()?;
        tracing::debug!(path = %db_path.display(), "opened sqlite store");
        Ok(store)
    }

    pub fn in_memory() -> Result<Self, PricingError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e: r2d2::Error| PricingError::Store {
                reason: e.to_string(),
            })?;

        let store = Self { pool };
        store.initialize_schema()?;
        Ok(store)
    }

    pub fn initialize_schema(&self) -> Result<(), PricingError> {
        let conn = self.conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );",
        )
        .map_err(|e: rusqlite::Error| PricingError::StoreQuery {
            reason: e.to_string(),
        })?;
        Ok(())
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, PricingError> {
        self.pool.get().map_err(|e: r2d2::Error| PricingError::Store {
            reason: e.to_string(),
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, PricingError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e: rusqlite::Error| PricingError::StoreQuery {
            reason: e.to_string(),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PricingError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|e: rusqlite::Error| PricingError::StoreQuery {
            reason: e.to_string(),
        })?;
        tracing::debug!(key, "stored value in sqlite");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PricingError> {
        let conn = self.conn()?;
        let removed = conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(|e: rusqlite::Error| PricingError::StoreQuery {
                reason: e.to_string(),
            })?;
        tracing::debug!(key, removed, "removed value from sqlite");
        Ok(())
    }
}

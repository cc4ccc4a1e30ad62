// Key-value persistence adapter
// Mirrors the device key-value store: one string value per key
use chrono::Utc;
use rusqlite::params;
use thiserror::Error;

use super::db::DbConnection;
use super::models::NameError;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),
    #[error("Stored compositions could not be read: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("Compositions could not be encoded: {0}")]
    Serialization(String),
    #[error("Composition not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidName(#[from] NameError),
}

pub type PersistResult<T> = Result<T, PersistError>;

/// String-valued store addressed by key
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> PersistResult<Option<String>>;

    /// Replace the value for `key` in a single write
    fn set_item(&self, key: &str, value: &str) -> PersistResult<()>;
}

impl KeyValueStore for DbConnection {
    fn get_item(&self, key: &str) -> PersistResult<Option<String>> {
        let conn = self.lock();
        let result = conn.query_row(
            "SELECT value FROM key_value WHERE key = ?1",
            [key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> PersistResult<()> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO key_value (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

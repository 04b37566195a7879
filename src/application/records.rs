use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::{AppError, AppResult, Storage};
use crate::domain::RecordKey;

/// Typed access to records in the shared key-value storage.
///
/// `update` is one logical read-modify-write, not an atomic one: a concurrent
/// writer between the read and the write is overwritten (last write wins).
pub struct RecordStore<'a> {
    storage: &'a dyn Storage,
}

impl<'a> RecordStore<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &RecordKey<T>) -> AppResult<Option<T>> {
        let Some(value) = self.storage.get_item(key.name()).await? else {
            return Ok(None);
        };
        // chrome storage reports a removed key as null
        if value.is_null() {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| AppError::Storage(format!("corrupt record {}: {e}", key.name())))
    }

    pub async fn put<T: Serialize>(&self, key: &RecordKey<T>, record: &T) -> AppResult<()> {
        let value = serde_json::to_value(record)
            .map_err(|e| AppError::Storage(format!("encode {}: {e}", key.name())))?;
        self.storage.set_item(key.name(), value).await
    }

    /// Get, default if absent, mutate, put. Returns the record as written.
    pub async fn update<T, D, F>(&self, key: &RecordKey<T>, default: D, mutate: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        D: FnOnce() -> T,
        F: FnOnce(&mut T),
    {
        let mut record = self.get(key).await?.unwrap_or_else(default);
        mutate(&mut record);
        self.put(key, &record).await?;
        Ok(record)
    }
}

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::application::{AppError, AppResult, Storage};

/// Process-local storage. Clones share the same entries.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    initialized: bool,
    items: HashMap<String, Value>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with `items`; still needs `init` before use.
    pub fn with_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let store = Self::default();
        if let Ok(mut inner) = store.inner.lock() {
            inner.items.extend(items);
        }
        store
    }

    /// Current entries regardless of initialization.
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.inner
            .lock()
            .map(|inner| inner.items.clone())
            .unwrap_or_default()
    }

    fn with_ready<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> AppResult<T> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| AppError::Storage("lock poisoned".into()))?;
        if !inner.initialized {
            return Err(AppError::Storage("storage used before init".into()));
        }
        Ok(f(&mut inner))
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn init(&self) -> AppResult<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| AppError::Storage("lock poisoned".into()))?;
        inner.initialized = true;
        Ok(())
    }

    async fn get_item(&self, key: &str) -> AppResult<Option<Value>> {
        self.with_ready(|inner| inner.items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: Value) -> AppResult<()> {
        self.with_ready(|inner| {
            inner.items.insert(key.to_string(), value);
        })
    }
}

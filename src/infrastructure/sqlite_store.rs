use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::application::{AppError, AppResult, Storage};

/// Key-value storage in a single SQLite table, values stored as JSON text.
pub struct SqliteStorage {
    pool: SqlitePool,
    initialized: AtomicBool,
}

impl SqliteStorage {
    /// db_url examples
    /// - "sqlite:/data/prompt.db"
    /// - "sqlite:./prompt.db"
    ///
    /// The database file is created if missing. Tables are created by `init`.
    pub async fn connect(db_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(db_url)
            .map_err(|e| AppError::Storage(e.to_string()))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        Ok(Self {
            pool,
            initialized: AtomicBool::new(false),
        })
    }

    fn ensure_ready(&self) -> AppResult<()> {
        if self.initialized.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(AppError::Storage("storage used before init".into()))
        }
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn init(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
              key TEXT PRIMARY KEY,
              value TEXT NOT NULL,
              updated_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    async fn get_item(&self, key: &str) -> AppResult<Option<Value>> {
        self.ensure_ready()?;
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv WHERE key = ? LIMIT 1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        row.map(|(raw,)| {
            serde_json::from_str(&raw)
                .map_err(|e| AppError::Storage(format!("corrupt value for {key}: {e}")))
        })
        .transpose()
    }

    async fn set_item(&self, key: &str, value: Value) -> AppResult<()> {
        self.ensure_ready()?;
        sqlx::query(
            r#"
            INSERT INTO kv(key, value, updated_at) VALUES(?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value.to_string())
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

        Ok(())
    }
}

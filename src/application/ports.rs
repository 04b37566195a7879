use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{AnalyticsEvent, CreateWindowOptions, ReadyState, WindowHandle, WindowId};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("feature flag error: {0}")]
    FeatureFlag(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("window error: {0}")]
    Window(String),
    #[error("view error: {0}")]
    View(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Prefix carried by every diagnostic this prompt reports.
pub const LOG_PREFIX: &str = "Error in Local File Prompt";

/// A developer-facing diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorEntry {
    pub message: String,
    pub error: Option<String>,
}

impl ErrorEntry {
    /// Standard entry: the shared prefix as message, `detail` as error.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            message: LOG_PREFIX.to_string(),
            error: Some(detail.into()),
        }
    }

    /// Entry whose message is the prefix followed by `detail`, with no error.
    pub fn message_only(detail: &str) -> Self {
        Self {
            message: format!("{LOG_PREFIX}{detail}"),
            error: None,
        }
    }
}

/// Extension key-value storage.
///
/// `init` must complete before any other call is issued.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn init(&self) -> AppResult<()>;
    async fn get_item(&self, key: &str) -> AppResult<Option<Value>>;
    async fn set_item(&self, key: &str, value: Value) -> AppResult<()>;
}

/// Remote feature-flag service; returns the feature's JSON-encoded metadata.
#[async_trait]
pub trait FeatureFlags: Send + Sync {
    async fn get_feature_meta(&self, feature: &str) -> AppResult<String>;
}

/// Host window manager.
#[async_trait]
pub trait WindowManager: Send + Sync {
    async fn create_window(&self, options: &CreateWindowOptions) -> AppResult<WindowHandle>;
    async fn close_window(&self, id: WindowId) -> AppResult<()>;
}

/// Fire-and-forget analytics.
pub trait Analytics: Send + Sync {
    fn send(&self, event: AnalyticsEvent);
}

/// Fire-and-forget error reporting.
pub trait ErrorLog: Send + Sync {
    fn log_error(&self, entry: ErrorEntry);
}

pub type ClickFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
pub type ClickHandler = Arc<dyn Fn() -> ClickFuture + Send + Sync>;

/// The prompt page's document.
#[async_trait]
pub trait PromptView: Send + Sync {
    fn ready_state(&self) -> ReadyState;
    /// Resolves once the document has finished loading.
    async fn ready(&self);
    fn translate_elements(&self, selector: &str) -> AppResult<()>;
    /// Returns false when no element with `element_id` exists.
    fn set_background_image(&self, element_id: &str, url: &str) -> bool;
    fn add_click_listener(&self, element_id: &str, handler: ClickHandler) -> AppResult<()>;
}

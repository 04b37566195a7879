#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use local_file_prompt::application::usecases::{PromptController, SettingsClickHandler};
use local_file_prompt::application::{
    Analytics, AppError, AppResult, ErrorEntry, ErrorLog, FeatureFlags, Storage, WindowManager,
};
use local_file_prompt::domain::{
    AnalyticsEvent, CreateWindowOptions, ReadyState, TabHandle, WindowHandle, WindowId,
};
use local_file_prompt::infrastructure::headless_view::HeadlessView;
use local_file_prompt::infrastructure::memory_store::InMemoryStorage;

pub const SETTINGS_URL: &str = "https://example.com/settings";

/// Shared, ordered record of host calls across fakes.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// In-memory storage that records every write.
#[derive(Clone)]
pub struct RecordingStorage {
    pub inner: InMemoryStorage,
    pub calls: CallLog,
}

impl RecordingStorage {
    pub fn new(inner: InMemoryStorage, calls: CallLog) -> Self {
        Self { inner, calls }
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn init(&self) -> AppResult<()> {
        self.inner.init().await
    }

    async fn get_item(&self, key: &str) -> AppResult<Option<Value>> {
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: Value) -> AppResult<()> {
        self.calls.push(format!("set:{key}"));
        self.inner.set_item(key, value).await
    }
}

/// Storage whose writes always fail.
pub struct ReadOnlyStorage(pub InMemoryStorage);

#[async_trait]
impl Storage for ReadOnlyStorage {
    async fn init(&self) -> AppResult<()> {
        self.0.init().await
    }

    async fn get_item(&self, key: &str) -> AppResult<Option<Value>> {
        self.0.get_item(key).await
    }

    async fn set_item(&self, _key: &str, _value: Value) -> AppResult<()> {
        Err(AppError::Storage("quota exceeded".into()))
    }
}

/// Storage whose reads always fail.
pub struct UnreadableStorage(pub InMemoryStorage);

#[async_trait]
impl Storage for UnreadableStorage {
    async fn init(&self) -> AppResult<()> {
        self.0.init().await
    }

    async fn get_item(&self, _key: &str) -> AppResult<Option<Value>> {
        Err(AppError::Storage("storage unavailable".into()))
    }

    async fn set_item(&self, key: &str, value: Value) -> AppResult<()> {
        self.0.set_item(key, value).await
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateBehavior {
    Succeed,
    Fail,
    NoTabs,
}

#[derive(Clone)]
pub struct FakeWindowManager {
    pub calls: CallLog,
    pub created: Arc<Mutex<Vec<CreateWindowOptions>>>,
    pub behavior: CreateBehavior,
    pub fail_close: bool,
    pub tab_id: i64,
}

impl FakeWindowManager {
    pub fn new(calls: CallLog, behavior: CreateBehavior) -> Self {
        Self {
            calls,
            created: Arc::default(),
            behavior,
            fail_close: false,
            tab_id: 4242,
        }
    }

    pub fn created(&self) -> Vec<CreateWindowOptions> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl WindowManager for FakeWindowManager {
    async fn create_window(&self, options: &CreateWindowOptions) -> AppResult<WindowHandle> {
        self.calls.push("create");
        self.created.lock().unwrap().push(options.clone());
        match self.behavior {
            CreateBehavior::Succeed => Ok(WindowHandle {
                id: 99,
                tabs: vec![TabHandle { id: self.tab_id }],
            }),
            CreateBehavior::NoTabs => Ok(WindowHandle {
                id: 99,
                tabs: vec![],
            }),
            CreateBehavior::Fail => Err(AppError::Window("host refused".into())),
        }
    }

    async fn close_window(&self, id: WindowId) -> AppResult<()> {
        self.calls.push(format!("close:{id}"));
        if self.fail_close {
            return Err(AppError::Window(format!("no window with id {id}")));
        }
        Ok(())
    }
}

/// Feature flags returning a fixed answer for any feature.
pub struct FakeFeatureFlags(pub Option<String>);

impl FakeFeatureFlags {
    pub fn payload(raw: &str) -> Self {
        Self(Some(raw.to_string()))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

#[async_trait]
impl FeatureFlags for FakeFeatureFlags {
    async fn get_feature_meta(&self, feature: &str) -> AppResult<String> {
        self.0
            .clone()
            .ok_or_else(|| AppError::FeatureFlag(format!("{feature} unavailable")))
    }
}

#[derive(Clone, Default)]
pub struct RecordingErrorLog(Arc<Mutex<Vec<ErrorEntry>>>);

impl RecordingErrorLog {
    pub fn entries(&self) -> Vec<ErrorEntry> {
        self.0.lock().unwrap().clone()
    }

    /// message and error joined, for substring assertions
    pub fn lines(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|e| format!("{} {}", e.message, e.error.unwrap_or_default()))
            .collect()
    }
}

impl ErrorLog for RecordingErrorLog {
    fn log_error(&self, entry: ErrorEntry) {
        self.0.lock().unwrap().push(entry);
    }
}

#[derive(Clone, Default)]
pub struct CountingAnalytics(Arc<Mutex<Vec<AnalyticsEvent>>>);

impl CountingAnalytics {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.0.lock().unwrap().clone()
    }
}

impl Analytics for CountingAnalytics {
    fn send(&self, event: AnalyticsEvent) {
        self.0.lock().unwrap().push(event);
    }
}

/// A prompt page wired to fakes, with handles kept for assertions.
pub struct Harness {
    pub storage: InMemoryStorage,
    pub calls: CallLog,
    pub windows: FakeWindowManager,
    pub errors: RecordingErrorLog,
    pub analytics: CountingAnalytics,
    pub view: HeadlessView,
    pub controller: PromptController,
}

impl Harness {
    pub fn new(storage: InMemoryStorage, flags: FakeFeatureFlags, behavior: CreateBehavior) -> Self {
        Self::with_view(
            storage,
            flags,
            behavior,
            HeadlessView::prompt_page(ReadyState::Complete),
        )
    }

    pub fn with_view(
        storage: InMemoryStorage,
        flags: FakeFeatureFlags,
        behavior: CreateBehavior,
        view: HeadlessView,
    ) -> Self {
        let calls = CallLog::default();
        let windows = FakeWindowManager::new(calls.clone(), behavior);
        let errors = RecordingErrorLog::default();
        let analytics = CountingAnalytics::default();

        let controller = PromptController {
            view: Arc::new(view.clone()),
            click: SettingsClickHandler {
                storage: Arc::new(RecordingStorage::new(storage.clone(), calls.clone())),
                flags: Arc::new(flags),
                windows: Arc::new(windows.clone()),
                analytics: Arc::new(analytics.clone()),
                errors: Arc::new(errors.clone()),
                settings_url: Arc::from(SETTINGS_URL),
            },
        };

        Self {
            storage,
            calls,
            windows,
            errors,
            analytics,
            view,
            controller,
        }
    }
}

pub fn fte_window_item(id: i64) -> (String, Value) {
    (
        "localFteWindow".to_string(),
        serde_json::json!({ "id": id, "height": 600, "width": 800, "left": 10, "top": 10 }),
    )
}

mod common;

use serde_json::json;

use local_file_prompt::application::Storage;
use local_file_prompt::application::usecases::{HandoffOutcome, ReplaceWithSettingsWindowUseCase};
use local_file_prompt::domain::{CreateWindowOptions, WindowType};
use local_file_prompt::infrastructure::memory_store::InMemoryStorage;

use common::{
    CallLog, CreateBehavior, FakeWindowManager, ReadOnlyStorage, RecordingErrorLog,
    RecordingStorage, SETTINGS_URL, fte_window_item,
};

struct Setup {
    storage: InMemoryStorage,
    recording: RecordingStorage,
    windows: FakeWindowManager,
    errors: RecordingErrorLog,
    calls: CallLog,
}

async fn setup(items: Vec<(String, serde_json::Value)>, behavior: CreateBehavior) -> Setup {
    let storage = InMemoryStorage::with_items(items);
    storage.init().await.unwrap();
    let calls = CallLog::default();
    Setup {
        recording: RecordingStorage::new(storage.clone(), calls.clone()),
        windows: FakeWindowManager::new(calls.clone(), behavior),
        errors: RecordingErrorLog::default(),
        storage,
        calls,
    }
}

async fn run(s: &Setup) -> HandoffOutcome {
    ReplaceWithSettingsWindowUseCase {
        storage: &s.recording,
        windows: &s.windows,
        errors: &s.errors,
        settings_url: SETTINGS_URL,
    }
    .execute()
    .await
}

#[tokio::test]
async fn missing_descriptor_creates_nothing_and_logs_once() {
    let s = setup(vec![], CreateBehavior::Succeed).await;

    assert_eq!(run(&s).await, HandoffOutcome::MissingWindowDescriptor);
    assert!(s.calls.calls().is_empty());

    let lines = s.errors.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Window configuration not found in storage"));
}

#[tokio::test]
async fn new_window_is_recorded_before_old_one_closes() {
    let s = setup(vec![fte_window_item(7)], CreateBehavior::Succeed).await;

    assert_eq!(
        run(&s).await,
        HandoffOutcome::Replaced {
            settings_tab_id: 4242,
            closed_window_id: 7
        }
    );
    assert_eq!(s.calls.calls(), vec!["create", "set:settingsWindow", "close:7"]);
    assert_eq!(s.storage.snapshot()["settingsWindow"], json!({ "id": 4242 }));
    assert!(s.errors.entries().is_empty());

    assert_eq!(
        s.windows.created(),
        vec![CreateWindowOptions {
            height: 600,
            width: 800,
            left: 10,
            top: 10,
            focused: true,
            window_type: WindowType::Popup,
            url: SETTINGS_URL.to_string(),
        }]
    );
}

#[tokio::test]
async fn failed_creation_keeps_old_window() {
    let s = setup(vec![fte_window_item(7)], CreateBehavior::Fail).await;

    assert_eq!(run(&s).await, HandoffOutcome::CreateFailed);
    assert_eq!(s.calls.calls(), vec!["create"]);
    assert!(!s.storage.snapshot().contains_key("settingsWindow"));

    let lines = s.errors.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Error creating window"));
}

#[tokio::test]
async fn window_without_tab_counts_as_failed_creation() {
    let s = setup(vec![fte_window_item(7)], CreateBehavior::NoTabs).await;

    assert_eq!(run(&s).await, HandoffOutcome::CreateFailed);
    assert_eq!(s.calls.calls(), vec!["create"]);
}

#[tokio::test]
async fn close_failure_leaves_record_in_place() {
    let mut s = setup(vec![fte_window_item(7)], CreateBehavior::Succeed).await;
    s.windows.fail_close = true;

    assert_eq!(
        run(&s).await,
        HandoffOutcome::OldWindowLingering {
            settings_tab_id: 4242,
            window_id: 7
        }
    );
    assert_eq!(s.storage.snapshot()["settingsWindow"], json!({ "id": 4242 }));
    assert!(s.errors.lines()[0].contains("Error closing window 7"));
}

#[tokio::test]
async fn unsaved_record_keeps_old_window() {
    let storage = InMemoryStorage::with_items(vec![fte_window_item(7)]);
    let read_only = ReadOnlyStorage(storage);
    read_only.init().await.unwrap();
    let calls = CallLog::default();
    let windows = FakeWindowManager::new(calls.clone(), CreateBehavior::Succeed);
    let errors = RecordingErrorLog::default();

    let outcome = ReplaceWithSettingsWindowUseCase {
        storage: &read_only,
        windows: &windows,
        errors: &errors,
        settings_url: SETTINGS_URL,
    }
    .execute()
    .await;

    assert_eq!(
        outcome,
        HandoffOutcome::RecordFailed {
            settings_tab_id: 4242
        }
    );
    assert_eq!(calls.calls(), vec!["create"]);
    assert_eq!(errors.entries().len(), 1);
}

#[tokio::test]
async fn corrupt_descriptor_is_not_used() {
    let s = setup(
        vec![("localFteWindow".to_string(), json!({ "id": "seven" }))],
        CreateBehavior::Succeed,
    )
    .await;

    assert_eq!(run(&s).await, HandoffOutcome::DescriptorUnreadable);
    assert!(s.calls.calls().is_empty());
    assert_eq!(s.errors.entries().len(), 1);
}

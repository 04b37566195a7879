use std::convert::Infallible;
use std::sync::Arc;

use async_stream::stream as async_stream;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{
        IntoResponse,
        sse::{Event as SseEvent, Sse},
    },
    routing::{get, post, put},
};
use serde::Serialize;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use crate::application::usecases::CheckEligibilityUseCase;
use crate::application::usecases::prompt_controller::CONTINUE_BUTTON_ID;
use crate::application::{AppResult, FeatureFlags, RecordStore, Storage};
use crate::domain::{
    LOCAL_FILE_CONFIG, LOCAL_FTE_WINDOW, PromptState, SETTINGS_WINDOW, SettingsWindowRecord,
    WindowDescriptor,
};
use crate::infrastructure::{
    event_bus::EventBus,
    headless_view::HeadlessView,
    headless_window_manager::{BLANK_URL, HeadlessWindowManager},
};

/// Local host surface for the prompt page: inspect storage, seed the FTE
/// window, press the continue button and watch analytics.
#[derive(Clone)]
pub struct ApiState {
    pub storage: Arc<dyn Storage>,
    pub flags: Arc<dyn FeatureFlags>,
    pub view: HeadlessView,
    pub windows: HeadlessWindowManager,
    pub settings_url: Arc<str>,
    pub api_token: Option<String>,
    pub event_bus: Option<EventBus>,
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/state", get(get_state))
        .route("/fte-window", put(put_fte_window))
        .route("/click", post(click))
        .route("/events/stream", get(stream_events))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateView {
    prompt_state: Option<PromptState>,
    fte_window: Option<WindowDescriptor>,
    settings_window: Option<SettingsWindowRecord>,
    eligible: bool,
    open_windows: Vec<i64>,
}

async fn get_state(State(state): State<ApiState>, headers: HeaderMap) -> impl IntoResponse {
    if let Err((code, msg)) = check_auth(&headers, &state.api_token) {
        return (code, msg).into_response();
    }
    match load_state(&state).await {
        Ok(v) => Json(v).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("error: {e}")).into_response(),
    }
}

async fn load_state(state: &ApiState) -> AppResult<StateView> {
    let records = RecordStore::new(state.storage.as_ref());
    let eligible = CheckEligibilityUseCase {
        storage: state.storage.as_ref(),
        flags: state.flags.as_ref(),
    }
    .execute()
    .await?;

    Ok(StateView {
        prompt_state: records.get(&LOCAL_FILE_CONFIG).await?,
        fte_window: records.get(&LOCAL_FTE_WINDOW).await?,
        settings_window: records.get(&SETTINGS_WINDOW).await?,
        eligible,
        open_windows: state.windows.open_windows(),
    })
}

async fn put_fte_window(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(descriptor): Json<WindowDescriptor>,
) -> impl IntoResponse {
    if let Err((code, msg)) = check_auth(&headers, &state.api_token) {
        return (code, msg).into_response();
    }
    let records = RecordStore::new(state.storage.as_ref());
    if let Err(e) = records.put(&LOCAL_FTE_WINDOW, &descriptor).await {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("error: {e}")).into_response();
    }
    if let Err(e) = state.windows.adopt(&descriptor, BLANK_URL) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("error: {e}")).into_response();
    }
    (StatusCode::NO_CONTENT, "").into_response()
}

async fn click(State(state): State<ApiState>, headers: HeaderMap) -> impl IntoResponse {
    if let Err((code, msg)) = check_auth(&headers, &state.api_token) {
        return (code, msg).into_response();
    }
    match state.view.click(CONTINUE_BUTTON_ID) {
        Ok(tasks) if tasks.is_empty() => (
            StatusCode::CONFLICT,
            "continue button has no listener (prompt not initialized)".to_string(),
        )
            .into_response(),
        // fire-and-forget, like a DOM click
        Ok(tasks) => (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({ "dispatched": tasks.len() })),
        )
            .into_response(),
        Err(e) => (StatusCode::NOT_FOUND, format!("error: {e}")).into_response(),
    }
}

async fn stream_events(State(state): State<ApiState>, headers: HeaderMap) -> impl IntoResponse {
    if let Err((code, msg)) = check_auth(&headers, &state.api_token) {
        return (code, msg).into_response();
    }

    let Some(bus) = state.event_bus.clone() else {
        return (
            StatusCode::NOT_IMPLEMENTED,
            "event stream not enabled".to_string(),
        )
            .into_response();
    };

    let live = BroadcastStream::new(bus.subscribe()).filter_map(|msg| {
        // lagged receivers skip what they missed
        let record = msg.ok()?;
        let data = serde_json::to_string(&record).ok()?;
        let id = format!("{}:{}", record.sent_at_epoch_ms, record.event.name());
        Some(Ok::<SseEvent, Infallible>(
            SseEvent::default().event("analytics").id(id).data(data),
        ))
    });

    // current storage snapshot first, then live analytics
    let snapshot = load_state(&state)
        .await
        .ok()
        .and_then(|v| serde_json::to_string(&v).ok());

    let out_stream = async_stream! {
        if let Some(data) = snapshot {
            yield Ok::<SseEvent, Infallible>(SseEvent::default().event("state").data(data));
        }

        tokio::pin!(live);
        while let Some(item) = live.next().await {
            yield item;
        }
    };

    Sse::new(out_stream).into_response()
}

fn check_auth(headers: &HeaderMap, token: &Option<String>) -> Result<(), (StatusCode, String)> {
    let Some(expected) = token else {
        return Ok(());
    };
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if auth == format!("Bearer {}", expected) {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "unauthorized".to_string()))
    }
}

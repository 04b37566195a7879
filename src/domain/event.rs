use serde::{Deserialize, Serialize};

/// Analytics events emitted by the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalyticsEvent {
    #[serde(rename = "LOCAL_FTE_GO_TO_SETTINGS_CLICKED")]
    LocalFteGoToSettingsClicked,
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::LocalFteGoToSettingsClicked => "LOCAL_FTE_GO_TO_SETTINGS_CLICKED",
        }
    }
}

/// An analytics event together with the moment it was sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsRecord {
    pub event: AnalyticsEvent,
    pub sent_at_epoch_ms: i64,
}

impl AnalyticsRecord {
    pub fn now(event: AnalyticsEvent) -> Self {
        Self {
            event,
            sent_at_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

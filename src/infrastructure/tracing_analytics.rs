use crate::application::Analytics;
use crate::domain::AnalyticsEvent;

pub struct TracingAnalytics;

impl TracingAnalytics {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingAnalytics {
    fn default() -> Self {
        Self::new()
    }
}

impl Analytics for TracingAnalytics {
    fn send(&self, event: AnalyticsEvent) {
        tracing::info!(event = event.name(), "analytics");
    }
}

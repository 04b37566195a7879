use crate::application::Analytics;
use crate::domain::{AnalyticsEvent, AnalyticsRecord};
use crate::infrastructure::event_bus::EventBus;

/// Publishes analytics events to live subscribers (the SSE stream).
pub struct BroadcastAnalytics {
    bus: EventBus,
}

impl BroadcastAnalytics {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl Analytics for BroadcastAnalytics {
    fn send(&self, event: AnalyticsEvent) {
        self.bus.publish(AnalyticsRecord::now(event));
    }
}

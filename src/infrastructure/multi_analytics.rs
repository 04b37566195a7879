use crate::application::Analytics;
use crate::domain::AnalyticsEvent;

/// Sends every event to each sink in turn.
pub struct MultiAnalytics {
    sinks: Vec<Box<dyn Analytics>>,
}

impl MultiAnalytics {
    pub fn new(sinks: Vec<Box<dyn Analytics>>) -> Self {
        Self { sinks }
    }
}

impl Analytics for MultiAnalytics {
    fn send(&self, event: AnalyticsEvent) {
        for sink in &self.sinks {
            sink.send(event);
        }
    }
}

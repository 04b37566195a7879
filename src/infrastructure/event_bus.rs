use tokio::sync::broadcast;

use crate::domain::AnalyticsRecord;

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AnalyticsRecord>,
}

impl EventBus {
    pub fn new(buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AnalyticsRecord> {
        self.tx.subscribe()
    }

    pub fn publish(&self, record: AnalyticsRecord) {
        // no subscribers is fine; slow subscribers may miss records
        let _ = self.tx.send(record);
    }
}

use async_trait::async_trait;

use crate::models::DraftEvent;

/// Live fan-out for committed draft events. Distinct from the persisted
/// audit log: a sink implementation (e.g. the websocket connection manager)
/// is only ever handed events after the transaction that produced them has
/// committed, never speculatively.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DraftEventSink: Send + Sync {
    async fn publish(&self, event: DraftEvent);

    async fn publish_all(&self, events: Vec<DraftEvent>) {
        for event in events {
            self.publish(event).await;
        }
    }
}

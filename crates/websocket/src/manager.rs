use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use dashmap::DashMap;
use futures_util::stream::SplitSink;
use futures_util::SinkExt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use domain::models::DraftEvent;
use domain::services::DraftEventSink;

use crate::messages::ServerMessage;

/// The send half of an upgraded axum WebSocket, kept per-connection so
/// `broadcast_to_draft` can push to every subscriber without holding the
/// whole socket.
pub type WsSender = SplitSink<WebSocket, Message>;

/// Represents a WebSocket connection subscribed to one draft's event stream.
#[derive(Debug)]
pub struct Connection {
    pub id: Uuid,
    pub draft_id: Uuid,
}

/// Manages WebSocket connections for live draft subscribers. Doubles as the
/// `DraftEventSink` the state service publishes committed events through:
/// `publish`/`publish_all` fan out to every connection subscribed to the
/// event's draft.
#[derive(Clone)]
pub struct ConnectionManager {
    /// Maps connection ID to its sender
    connections: Arc<DashMap<Uuid, WsSender>>,
    /// Maps draft ID to set of connection IDs
    drafts: Arc<DashMap<Uuid, Vec<Uuid>>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
            drafts: Arc::new(DashMap::new()),
        }
    }

    /// Add a new connection subscribed to a draft.
    pub fn add_connection(&self, connection_id: Uuid, draft_id: Uuid, sender: WsSender) {
        info!(
            connection_id = %connection_id,
            draft_id = %draft_id,
            "Adding WebSocket connection"
        );

        self.connections.insert(connection_id, sender);

        self.drafts
            .entry(draft_id)
            .or_insert_with(Vec::new)
            .push(connection_id);

        debug!(
            draft_id = %draft_id,
            connection_count = self.drafts.get(&draft_id).map(|s| s.len()).unwrap_or(0),
            "Connection added to draft"
        );
    }

    /// Remove a connection
    pub fn remove_connection(&self, connection_id: Uuid) {
        info!(connection_id = %connection_id, "Removing WebSocket connection");

        self.connections.remove(&connection_id);

        self.drafts.iter_mut().for_each(|mut entry| {
            let draft_id = *entry.key();
            entry.value_mut().retain(|id| *id != connection_id);

            if entry.value().is_empty() {
                debug!(draft_id = %draft_id, "Draft has no more connections");
            }
        });

        self.drafts.retain(|_, connections| !connections.is_empty());
    }

    /// Broadcast a message to all connections subscribed to a draft.
    pub async fn broadcast_to_draft(&self, draft_id: Uuid, message: ServerMessage) {
        let json = match message.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Failed to serialize server message");
                return;
            }
        };

        let connection_ids = match self.drafts.get(&draft_id) {
            Some(ids) => ids.clone(),
            None => {
                warn!(draft_id = %draft_id, "No connections for draft");
                return;
            }
        };

        debug!(
            draft_id = %draft_id,
            connection_count = connection_ids.len(),
            message_type = ?message,
            "Broadcasting message to draft"
        );

        let mut failed_connections = Vec::new();

        for connection_id in &connection_ids {
            if let Some(mut sender) = self.connections.get_mut(connection_id) {
                if let Err(e) = sender.send(Message::Text(json.clone().into())).await {
                    error!(
                        connection_id = %connection_id,
                        error = %e,
                        "Failed to send message to connection"
                    );
                    failed_connections.push(*connection_id);
                }
            } else {
                warn!(
                    connection_id = %connection_id,
                    "Connection not found in manager"
                );
                failed_connections.push(*connection_id);
            }
        }

        for connection_id in failed_connections {
            self.remove_connection(connection_id);
        }
    }

    /// Send a message to a specific connection
    pub async fn send_to_connection(&self, connection_id: Uuid, message: ServerMessage) {
        let json = match message.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Failed to serialize server message");
                return;
            }
        };

        if let Some(mut sender) = self.connections.get_mut(&connection_id) {
            if let Err(e) = sender.send(Message::Text(json.into())).await {
                error!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to send message to connection"
                );
                self.remove_connection(connection_id);
            }
        } else {
            warn!(
                connection_id = %connection_id,
                "Connection not found in manager"
            );
        }
    }

    /// Get the number of connections subscribed to a draft
    pub fn draft_connection_count(&self, draft_id: Uuid) -> usize {
        self.drafts.get(&draft_id).map(|s| s.len()).unwrap_or(0)
    }

    /// Get total number of active connections
    pub fn total_connections(&self) -> usize {
        self.connections.len()
    }

    /// Get total number of drafts with at least one subscriber
    pub fn total_drafts(&self) -> usize {
        self.drafts.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftEventSink for ConnectionManager {
    async fn publish(&self, event: DraftEvent) {
        let draft_id = event.draft_id;
        let message = ServerMessage::from_draft_event(&event);
        self.broadcast_to_draft(draft_id, message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: these are limited unit tests since we can't easily create a
    // WsSender in tests. Full coverage lives in the api crate's integration
    // tests, which drive real connections.

    #[test]
    fn test_new_manager() {
        let manager = ConnectionManager::new();
        assert_eq!(manager.total_connections(), 0);
        assert_eq!(manager.total_drafts(), 0);
    }

    #[test]
    fn test_draft_connection_count_empty() {
        let manager = ConnectionManager::new();
        let draft_id = Uuid::new_v4();
        assert_eq!(manager.draft_connection_count(draft_id), 0);
    }

    #[tokio::test]
    async fn test_publish_with_no_subscribers_does_not_panic() {
        let manager = ConnectionManager::new();
        let event = DraftEvent::new(
            Uuid::new_v4(),
            domain::models::EventType::DraftStarted,
            serde_json::json!({}),
        );
        manager.publish(event).await;
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain::models::{DraftEvent, EventType};

/// Messages sent from client to server over a draft's WebSocket connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to a draft's live event stream.
    Subscribe { draft_id: Uuid },
    /// Ping to keep the connection alive.
    Ping,
}

/// Messages sent from server to client. Most variants mirror a `DraftEvent`
/// one-to-one; `Subscribed`, `Error`, and `Pong` have no event-log
/// counterpart because they never outlive the connection that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Subscribed {
        draft_id: Uuid,
    },
    DraftCreated {
        draft_id: Uuid,
        payload: serde_json::Value,
    },
    DraftStarted {
        draft_id: Uuid,
        payload: serde_json::Value,
    },
    DraftPaused {
        draft_id: Uuid,
        payload: serde_json::Value,
    },
    DraftResumed {
        draft_id: Uuid,
        payload: serde_json::Value,
    },
    DraftCompleted {
        draft_id: Uuid,
        payload: serde_json::Value,
    },
    DraftSettingsUpdated {
        draft_id: Uuid,
        payload: serde_json::Value,
    },
    DraftNextPick {
        draft_id: Uuid,
        payload: serde_json::Value,
    },
    /// Enriched with player_name/player_position/player_team by the handler
    /// layer before publication; this crate only carries the payload along.
    DraftPick {
        draft_id: Uuid,
        payload: serde_json::Value,
    },
    DraftPickUndone {
        draft_id: Uuid,
        payload: serde_json::Value,
    },
    DraftQueueUpdated {
        draft_id: Uuid,
        payload: serde_json::Value,
    },
    DraftAutodraftToggled {
        draft_id: Uuid,
        payload: serde_json::Value,
    },
    Error {
        message: String,
    },
    Pong,
}

impl ClientMessage {
    pub fn subscribe(draft_id: Uuid) -> Self {
        ClientMessage::Subscribe { draft_id }
    }

    pub fn ping() -> Self {
        ClientMessage::Ping
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ServerMessage {
    pub fn subscribed(draft_id: Uuid) -> Self {
        ServerMessage::Subscribed { draft_id }
    }

    pub fn error(message: String) -> Self {
        ServerMessage::Error { message }
    }

    pub fn pong() -> Self {
        ServerMessage::Pong
    }

    /// Converts a committed `DraftEvent` into the wire message broadcast to
    /// that draft's subscribers. This is the only place an `EventType`
    /// is mapped to a `ServerMessage` variant.
    pub fn from_draft_event(event: &DraftEvent) -> Self {
        let draft_id = event.draft_id;
        let payload = event.payload.clone();
        match event.event_type {
            EventType::DraftCreated => ServerMessage::DraftCreated { draft_id, payload },
            EventType::DraftStarted => ServerMessage::DraftStarted { draft_id, payload },
            EventType::DraftPaused => ServerMessage::DraftPaused { draft_id, payload },
            EventType::DraftResumed => ServerMessage::DraftResumed { draft_id, payload },
            EventType::DraftCompleted => ServerMessage::DraftCompleted { draft_id, payload },
            EventType::DraftSettingsUpdated => {
                ServerMessage::DraftSettingsUpdated { draft_id, payload }
            }
            EventType::DraftNextPick => ServerMessage::DraftNextPick { draft_id, payload },
            EventType::DraftPick => ServerMessage::DraftPick { draft_id, payload },
            EventType::DraftPickUndone => ServerMessage::DraftPickUndone { draft_id, payload },
            EventType::DraftQueueUpdated => ServerMessage::DraftQueueUpdated { draft_id, payload },
            EventType::DraftAutodraftToggled => {
                ServerMessage::DraftAutodraftToggled { draft_id, payload }
            }
        }
    }

    pub fn draft_id(&self) -> Option<Uuid> {
        match self {
            ServerMessage::Subscribed { draft_id }
            | ServerMessage::DraftCreated { draft_id, .. }
            | ServerMessage::DraftStarted { draft_id, .. }
            | ServerMessage::DraftPaused { draft_id, .. }
            | ServerMessage::DraftResumed { draft_id, .. }
            | ServerMessage::DraftCompleted { draft_id, .. }
            | ServerMessage::DraftSettingsUpdated { draft_id, .. }
            | ServerMessage::DraftNextPick { draft_id, .. }
            | ServerMessage::DraftPick { draft_id, .. }
            | ServerMessage::DraftPickUndone { draft_id, .. }
            | ServerMessage::DraftQueueUpdated { draft_id, .. }
            | ServerMessage::DraftAutodraftToggled { draft_id, .. } => Some(*draft_id),
            ServerMessage::Error { .. } | ServerMessage::Pong => None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_subscribe_serialization() {
        let draft_id = Uuid::new_v4();
        let msg = ClientMessage::subscribe(draft_id);

        let json = msg.to_json().unwrap();
        let parsed = ClientMessage::from_json(&json).unwrap();

        assert_eq!(msg, parsed);
        assert!(json.contains("\"type\":\"subscribe\""));
    }

    #[test]
    fn test_client_message_ping_serialization() {
        let msg = ClientMessage::ping();

        let json = msg.to_json().unwrap();
        let parsed = ClientMessage::from_json(&json).unwrap();

        assert_eq!(msg, parsed);
        assert_eq!(json, "{\"type\":\"ping\"}");
    }

    #[test]
    fn test_server_message_subscribed_serialization() {
        let draft_id = Uuid::new_v4();
        let msg = ServerMessage::subscribed(draft_id);

        let json = msg.to_json().unwrap();
        let parsed = ServerMessage::from_json(&json).unwrap();

        assert_eq!(msg, parsed);
        assert!(json.contains("\"type\":\"subscribed\""));
    }

    #[test]
    fn test_from_draft_event_maps_pick_event() {
        let draft_id = Uuid::new_v4();
        let event = DraftEvent::new(
            draft_id,
            EventType::DraftPick,
            serde_json::json!({"pick_number": 3}),
        );
        let msg = ServerMessage::from_draft_event(&event);
        assert_eq!(msg.draft_id(), Some(draft_id));
        match msg {
            ServerMessage::DraftPick { payload, .. } => {
                assert_eq!(payload["pick_number"], 3);
            }
            _ => panic!("expected DraftPick variant"),
        }
    }

    #[test]
    fn test_from_draft_event_maps_next_pick_event() {
        let draft_id = Uuid::new_v4();
        let event = DraftEvent::new(draft_id, EventType::DraftNextPick, serde_json::json!({}));
        let msg = ServerMessage::from_draft_event(&event);
        assert!(matches!(msg, ServerMessage::DraftNextPick { .. }));
    }

    #[test]
    fn test_server_message_error_serialization() {
        let msg = ServerMessage::error("Something went wrong".to_string());

        let json = msg.to_json().unwrap();
        let parsed = ServerMessage::from_json(&json).unwrap();

        assert_eq!(msg, parsed);
        assert!(json.contains("\"type\":\"error\""));
        assert!(json.contains("Something went wrong"));
    }

    #[test]
    fn test_server_message_pong_serialization() {
        let msg = ServerMessage::pong();

        let json = msg.to_json().unwrap();
        let parsed = ServerMessage::from_json(&json).unwrap();

        assert_eq!(msg, parsed);
        assert_eq!(json, "{\"type\":\"pong\"}");
    }

    #[test]
    fn test_invalid_json_parsing() {
        let invalid_json = "{\"invalid\": \"message\"}";
        let result = ClientMessage::from_json(invalid_json);
        assert!(result.is_err());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    DraftCreated,
    DraftStarted,
    DraftPaused,
    DraftResumed,
    DraftCompleted,
    DraftSettingsUpdated,
    DraftNextPick,
    DraftPick,
    DraftPickUndone,
    DraftQueueUpdated,
    DraftAutodraftToggled,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventType::DraftCreated => "draft_created",
            EventType::DraftStarted => "draft_started",
            EventType::DraftPaused => "draft_paused",
            EventType::DraftResumed => "draft_resumed",
            EventType::DraftCompleted => "draft_completed",
            EventType::DraftSettingsUpdated => "draft_settings_updated",
            EventType::DraftNextPick => "draft_next_pick",
            EventType::DraftPick => "draft_pick",
            EventType::DraftPickUndone => "draft_pick_undone",
            EventType::DraftQueueUpdated => "draft_queue_updated",
            EventType::DraftAutodraftToggled => "draft_autodraft_toggled",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft_created" => Ok(EventType::DraftCreated),
            "draft_started" => Ok(EventType::DraftStarted),
            "draft_paused" => Ok(EventType::DraftPaused),
            "draft_resumed" => Ok(EventType::DraftResumed),
            "draft_completed" => Ok(EventType::DraftCompleted),
            "draft_settings_updated" => Ok(EventType::DraftSettingsUpdated),
            "draft_next_pick" => Ok(EventType::DraftNextPick),
            "draft_pick" => Ok(EventType::DraftPick),
            "draft_pick_undone" => Ok(EventType::DraftPickUndone),
            "draft_queue_updated" => Ok(EventType::DraftQueueUpdated),
            "draft_autodraft_toggled" => Ok(EventType::DraftAutodraftToggled),
            _ => Err(DomainError::ValidationError(format!(
                "Invalid event type: {}",
                s
            ))),
        }
    }
}

/// A fan-out event plus the audit-log row it is persisted as in the same
/// transaction that produced it. Built inside a transaction closure and only
/// handed to the event sink after commit succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftEvent {
    pub id: Uuid,
    pub draft_id: Uuid,
    pub event_type: EventType,
    pub payload: JsonValue,
    pub created_at: DateTime<Utc>,
}

impl DraftEvent {
    pub fn new(draft_id: Uuid, event_type: EventType, payload: JsonValue) -> Self {
        Self {
            id: Uuid::new_v4(),
            draft_id,
            event_type,
            payload,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_event_type_round_trips_through_string() {
        for event_type in [
            EventType::DraftCreated,
            EventType::DraftPick,
            EventType::DraftAutodraftToggled,
        ] {
            let s = event_type.to_string();
            assert_eq!(EventType::from_str(&s).unwrap(), event_type);
        }
    }

    #[test]
    fn test_invalid_event_type_string() {
        assert!(EventType::from_str("not_a_real_event").is_err());
    }

    #[test]
    fn test_new_event_carries_payload() {
        let draft_id = Uuid::new_v4();
        let event = DraftEvent::new(draft_id, EventType::DraftPick, serde_json::json!({"pick_number": 3}));
        assert_eq!(event.draft_id, draft_id);
        assert_eq!(event.payload["pick_number"], 3);
    }
}

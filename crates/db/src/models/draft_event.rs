use chrono::{DateTime, Utc};
use sqlx::types::Json;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::{DraftEvent, EventType};

use crate::errors::{DbError, DbResult};

/// Database row for the `draft_events` table: the persisted audit log a
/// reconnecting client replays to catch up on history it missed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DraftEventDb {
    pub id: Uuid,
    pub draft_id: Uuid,
    pub event_type: String,
    pub payload: Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl DraftEventDb {
    pub fn from_domain(event: &DraftEvent) -> Self {
        Self {
            id: event.id,
            draft_id: event.draft_id,
            event_type: event.event_type.to_string(),
            payload: Json(event.payload.clone()),
            created_at: event.created_at,
        }
    }

    pub fn to_domain(&self) -> DbResult<DraftEvent> {
        Ok(DraftEvent {
            id: self.id,
            draft_id: self.draft_id,
            event_type: EventType::from_str(&self.event_type)
                .map_err(|e| DbError::MappingError(e.to_string()))?,
            payload: self.payload.0.clone(),
            created_at: self.created_at,
        })
    }
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Start,
    Pause,
    Resume,
    Complete,
    Delete,
    Undo,
}

/// Idempotency record for non-pick commissioner actions, keyed by
/// (idempotency_key, user_id, operation_type) with a bounded TTL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub idempotency_key: String,
    pub user_id: Uuid,
    pub operation_type: OperationType,
    pub draft_id: Uuid,
    pub result: JsonValue,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub const DEFAULT_OPERATION_TTL_HOURS: i64 = 24;

impl OperationRecord {
    pub fn new(
        idempotency_key: String,
        user_id: Uuid,
        operation_type: OperationType,
        draft_id: Uuid,
        result: JsonValue,
    ) -> Self {
        let now = Utc::now();
        Self {
            idempotency_key,
            user_id,
            operation_type,
            draft_id,
            result,
            created_at: now,
            expires_at: now + Duration::hours(DEFAULT_OPERATION_TTL_HOURS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

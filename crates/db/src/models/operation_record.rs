use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use domain::models::{OperationRecord, OperationType};

use crate::errors::{DbError, DbResult};

/// Database row for the `operation_records` table, the commissioner-action
/// idempotency ledger keyed by (idempotency_key, user_id, operation_type).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OperationRecordDb {
    pub idempotency_key: String,
    pub user_id: Uuid,
    pub operation_type: String,
    pub draft_id: Uuid,
    pub result: Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OperationRecordDb {
    pub fn from_domain(record: &OperationRecord) -> Self {
        Self {
            idempotency_key: record.idempotency_key.clone(),
            user_id: record.user_id,
            operation_type: operation_type_to_string(&record.operation_type),
            draft_id: record.draft_id,
            result: Json(record.result.clone()),
            created_at: record.created_at,
            expires_at: record.expires_at,
        }
    }

    pub fn to_domain(&self) -> DbResult<OperationRecord> {
        Ok(OperationRecord {
            idempotency_key: self.idempotency_key.clone(),
            user_id: self.user_id,
            operation_type: string_to_operation_type(&self.operation_type)?,
            draft_id: self.draft_id,
            result: self.result.0.clone(),
            created_at: self.created_at,
            expires_at: self.expires_at,
        })
    }
}

pub(crate) fn operation_type_to_string(operation_type: &OperationType) -> String {
    match operation_type {
        OperationType::Start => "start",
        OperationType::Pause => "pause",
        OperationType::Resume => "resume",
        OperationType::Complete => "complete",
        OperationType::Delete => "delete",
        OperationType::Undo => "undo",
    }
    .to_string()
}

fn string_to_operation_type(s: &str) -> DbResult<OperationType> {
    match s {
        "start" => Ok(OperationType::Start),
        "pause" => Ok(OperationType::Pause),
        "resume" => Ok(OperationType::Resume),
        "complete" => Ok(OperationType::Complete),
        "delete" => Ok(OperationType::Delete),
        "undo" => Ok(OperationType::Undo),
        _ => Err(DbError::MappingError(format!("Invalid operation type: {}", s))),
    }
}

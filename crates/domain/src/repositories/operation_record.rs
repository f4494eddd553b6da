use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::{OperationRecord, OperationType};

/// Repository trait for the commissioner-action idempotency ledger.
#[async_trait]
pub trait OperationRecordRepository: Send + Sync {
    async fn create(&self, record: &OperationRecord) -> DomainResult<OperationRecord>;

    async fn find(
        &self,
        idempotency_key: &str,
        user_id: Uuid,
        operation_type: OperationType,
    ) -> DomainResult<Option<OperationRecord>>;

    /// Reaps rows past their TTL; called periodically by the tick scheduler.
    async fn delete_expired(&self) -> DomainResult<u64>;
}

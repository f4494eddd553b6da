use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::DraftEvent;

/// Repository trait for the persisted draft event audit log. Distinct from
/// the live fan-out sink: rows here are written in the same transaction as
/// the state change they describe, and are replayed to rebuild history or
/// catch up a client that reconnects after a gap.
#[async_trait]
pub trait DraftEventRepository: Send + Sync {
    async fn append(&self, event: &DraftEvent) -> DomainResult<DraftEvent>;

    async fn find_by_draft_id(&self, draft_id: Uuid) -> DomainResult<Vec<DraftEvent>>;

    async fn find_since(&self, draft_id: Uuid, after: Uuid) -> DomainResult<Vec<DraftEvent>>;
}

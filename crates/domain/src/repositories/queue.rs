use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::QueueEntry;

/// Repository trait for a roster's autodraft/autopick preference queue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueRepository: Send + Sync {
    async fn upsert(&self, entry: &QueueEntry) -> DomainResult<QueueEntry>;

    /// Ordered by queue_position ascending.
    async fn find_by_draft_and_roster(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
    ) -> DomainResult<Vec<QueueEntry>>;

    async fn remove(&self, id: Uuid) -> DomainResult<()>;

    /// Drops the front entry of a roster's queue, used once its target has
    /// been consumed by a pick.
    async fn pop_front(&self, draft_id: Uuid, roster_id: Uuid) -> DomainResult<Option<QueueEntry>>;

    async fn reorder(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        ordered_ids: &[Uuid],
    ) -> DomainResult<Vec<QueueEntry>>;
}

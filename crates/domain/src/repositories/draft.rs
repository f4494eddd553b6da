use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::{Draft, DraftOrderEntry, DraftStatus};

/// Repository trait for Draft data access.
///
/// Concrete implementations live in the `db` crate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DraftRepository: Send + Sync {
    async fn create(&self, draft: &Draft) -> DomainResult<Draft>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Draft>>;

    /// Re-reads the row with `FOR UPDATE` inside the caller's transaction.
    /// Used to get a fresh view of the draft after acquiring the per-draft
    /// advisory lock.
    async fn find_by_id_for_update(&self, id: Uuid) -> DomainResult<Option<Draft>>;

    async fn find_by_league_id(&self, league_id: Uuid) -> DomainResult<Vec<Draft>>;

    async fn find_by_status(&self, status: DraftStatus) -> DomainResult<Vec<Draft>>;

    /// All drafts currently in progress, used by the tick scheduler to
    /// enumerate work each cadence.
    async fn find_in_progress(&self) -> DomainResult<Vec<Draft>>;

    async fn update(&self, draft: &Draft) -> DomainResult<Draft>;

    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

/// Repository trait for the per-draft roster ordering.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DraftOrderRepository: Send + Sync {
    async fn set_order(&self, entries: &[DraftOrderEntry]) -> DomainResult<Vec<DraftOrderEntry>>;

    async fn find_by_draft_id(&self, draft_id: Uuid) -> DomainResult<Vec<DraftOrderEntry>>;

    async fn find_by_draft_and_roster(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
    ) -> DomainResult<Option<DraftOrderEntry>>;

    async fn set_autodraft_enabled(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        enabled: bool,
    ) -> DomainResult<DraftOrderEntry>;

    async fn delete_by_draft_id(&self, draft_id: Uuid) -> DomainResult<()>;
}

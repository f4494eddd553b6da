use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::ChessClockEntry;

/// Repository trait for per-roster chess-clock time banks.
#[async_trait]
pub trait ChessClockRepository: Send + Sync {
    async fn find_by_draft_id(&self, draft_id: Uuid) -> DomainResult<Vec<ChessClockEntry>>;

    async fn find_by_draft_and_roster(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
    ) -> DomainResult<Option<ChessClockEntry>>;

    async fn upsert(&self, entry: &ChessClockEntry) -> DomainResult<ChessClockEntry>;

    async fn initialize_all(
        &self,
        draft_id: Uuid,
        roster_ids: &[Uuid],
        total_seconds: i32,
    ) -> DomainResult<Vec<ChessClockEntry>>;
}

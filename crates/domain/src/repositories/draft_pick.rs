use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::{DraftPick, PickAsset, VetDraftPickAssetSelection};

/// Repository trait for DraftPick data access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DraftPickRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<DraftPick>>;

    async fn find_by_draft_id(&self, draft_id: Uuid) -> DomainResult<Vec<DraftPick>>;

    async fn find_by_draft_and_roster(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
    ) -> DomainResult<Vec<DraftPick>>;

    async fn find_by_pick_number(
        &self,
        draft_id: Uuid,
        pick_number: i32,
    ) -> DomainResult<Option<DraftPick>>;

    /// Picks still awaiting a player, ordered by pick number ascending.
    async fn find_unfilled(&self, draft_id: Uuid) -> DomainResult<Vec<DraftPick>>;

    /// Used to enforce idempotent pick submission on the
    /// (draft_id, roster_id, idempotency_key) uniqueness rule.
    async fn find_by_idempotency_key(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        idempotency_key: &str,
    ) -> DomainResult<Option<DraftPick>>;
}

/// Repository trait for traded pick assets (the "rights to make a future
/// pick" ledger, independent of any particular draft run).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PickAssetRepository: Send + Sync {
    async fn create(&self, asset: &PickAsset) -> DomainResult<PickAsset>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<PickAsset>>;

    async fn find_by_league_and_season(
        &self,
        league_id: Uuid,
        season: i32,
    ) -> DomainResult<Vec<PickAsset>>;

    async fn find_by_current_owner(
        &self,
        league_id: Uuid,
        roster_id: Uuid,
    ) -> DomainResult<Vec<PickAsset>>;

    async fn update(&self, asset: &PickAsset) -> DomainResult<PickAsset>;
}

/// Repository trait for recorded vet-round pick-asset selections (matchups
/// drafts where a pick consumes a traded asset instead of a board slot).
#[async_trait]
pub trait VetPickSelectionRepository: Send + Sync {
    async fn create(
        &self,
        selection: &VetDraftPickAssetSelection,
    ) -> DomainResult<VetDraftPickAssetSelection>;

    async fn find_by_draft_id(
        &self,
        draft_id: Uuid,
    ) -> DomainResult<Vec<VetDraftPickAssetSelection>>;

    async fn find_by_pick_number(
        &self,
        draft_id: Uuid,
        pick_number: i32,
    ) -> DomainResult<Option<VetDraftPickAssetSelection>>;

    async fn delete_by_pick_number(&self, draft_id: Uuid, pick_number: i32) -> DomainResult<()>;
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::{Draft, DraftEvent, DraftPick};
use crate::services::engine::AutopickReason;

/// Outcome of a composite pick operation: the draft row after advancing,
/// the pick that was written, and the events collected inside the
/// transaction for publish-after-commit fan-out.
#[derive(Debug, Clone)]
pub struct PickOutcome {
    pub draft: Draft,
    pub pick: DraftPick,
    pub events: Vec<DraftEvent>,
}

/// Outcome of a lifecycle transition (start/pause/resume/complete).
#[derive(Debug, Clone)]
pub struct LifecycleOutcome {
    pub draft: Draft,
    pub events: Vec<DraftEvent>,
}

/// Outcome of undoing the most recent pick.
#[derive(Debug, Clone)]
pub struct UndoOutcome {
    pub draft: Draft,
    pub removed_pick: DraftPick,
    pub events: Vec<DraftEvent>,
}

/// The atomic, lock-guarded composite operations that mutate draft state.
///
/// Every method here acquires the per-draft Postgres advisory lock, re-reads
/// the draft row with `FOR UPDATE`, performs its writes, and collects the
/// events the change produces, all inside one transaction. Implementations
/// must not hand events to a live sink until the transaction has committed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DraftTransactions: Send + Sync {
    /// `expected_pick_number` is the draft's `current_pick` as the caller
    /// observed it before acquiring the lock; if the freshly locked row no
    /// longer matches, another pick landed first and this one fails with
    /// `PickConflict` rather than silently picking for the wrong slot.
    /// `autopick_reason` is `None` for a human-submitted pick; when it is
    /// `Some(AutopickReason::TimerExpired)` and the picker didn't already
    /// have autodraft on, autodraft is force-enabled as part of this same
    /// transaction.
    async fn make_pick_and_advance(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        player_id: Uuid,
        expected_pick_number: i32,
        autopick_reason: Option<AutopickReason>,
        idempotency_key: Option<String>,
    ) -> DomainResult<PickOutcome>;

    async fn make_pick_asset_selection_and_advance(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        pick_asset_id: Uuid,
        idempotency_key: Option<String>,
    ) -> DomainResult<PickOutcome>;

    async fn make_matchup_pick_and_advance(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        player_id: Uuid,
        week: i32,
        opponent_roster_id: Uuid,
        idempotency_key: Option<String>,
    ) -> DomainResult<PickOutcome>;

    async fn undo_last_pick(&self, draft_id: Uuid) -> DomainResult<UndoOutcome>;

    async fn start_draft(&self, draft_id: Uuid) -> DomainResult<LifecycleOutcome>;

    async fn pause_draft(&self, draft_id: Uuid) -> DomainResult<LifecycleOutcome>;

    async fn resume_draft(&self, draft_id: Uuid) -> DomainResult<LifecycleOutcome>;

    async fn complete_draft(&self, draft_id: Uuid) -> DomainResult<LifecycleOutcome>;

    async fn delete_draft(&self, draft_id: Uuid) -> DomainResult<()>;
}

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::models::{
    Draft, DraftEvent, DraftOrderEntry, DraftPick, EventType, PickAsset, QueueEntry, QueueTarget,
};
use crate::repositories::{
    DraftOrderRepository, DraftPickRepository, DraftRepository, DraftTransactions,
    PickAssetRepository, PickOutcome, PlayerRepository, QueueRepository,
};
use crate::services::engine::{self, AutopickReason};
use crate::services::events::DraftEventSink;
use crate::services::order_policy;
use crate::services::validators;

/// Orchestrates the draft lifecycle and pick submission, wiring together the
/// pure policy functions in this module with the repositories and the
/// lock-guarded transactional operations that actually mutate state.
pub struct DraftStateService {
    draft_repo: Arc<dyn DraftRepository>,
    order_repo: Arc<dyn DraftOrderRepository>,
    pick_repo: Arc<dyn DraftPickRepository>,
    pick_asset_repo: Arc<dyn PickAssetRepository>,
    player_repo: Arc<dyn PlayerRepository>,
    queue_repo: Arc<dyn QueueRepository>,
    transactions: Arc<dyn DraftTransactions>,
    event_sink: Arc<dyn DraftEventSink>,
}

impl DraftStateService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        draft_repo: Arc<dyn DraftRepository>,
        order_repo: Arc<dyn DraftOrderRepository>,
        pick_repo: Arc<dyn DraftPickRepository>,
        pick_asset_repo: Arc<dyn PickAssetRepository>,
        player_repo: Arc<dyn PlayerRepository>,
        queue_repo: Arc<dyn QueueRepository>,
        transactions: Arc<dyn DraftTransactions>,
        event_sink: Arc<dyn DraftEventSink>,
    ) -> Self {
        Self {
            draft_repo,
            order_repo,
            pick_repo,
            pick_asset_repo,
            player_repo,
            queue_repo,
            transactions,
            event_sink,
        }
    }

    async fn load_draft(&self, draft_id: Uuid) -> DomainResult<Draft> {
        self.draft_repo
            .find_by_id(draft_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("draft {} not found", draft_id)))
    }

    fn on_deck_roster(draft: &Draft) -> DomainResult<Uuid> {
        draft
            .current_roster_id
            .ok_or_else(|| DomainError::InvalidState("no roster is currently on the clock".to_string()))
    }

    async fn validate_pick_preconditions(
        &self,
        draft: &Draft,
        roster_id: Uuid,
        player_id: Uuid,
        is_auto_pick: bool,
    ) -> DomainResult<()> {
        validators::validate_draft_is_active(draft.status)?;
        validators::validate_not_in_overnight_pause(&draft.overnight_pause, Utc::now())?;
        validators::validate_on_deck(Self::on_deck_roster(draft)?, roster_id)?;
        if !is_auto_pick {
            validators::validate_deadline_not_passed(draft.pick_deadline, Utc::now())?;
        }
        let player = self
            .player_repo
            .find_by_id(player_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("player {} not found", player_id)))?;
        validators::validate_player_eligible(&player, &draft.settings.player_pool)?;
        let existing_picks = self.pick_repo.find_by_draft_id(draft.id).await?;
        validators::validate_not_already_drafted(player_id, &existing_picks)?;
        Ok(())
    }

    async fn submit_pick(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        player_id: Uuid,
        autopick_reason: Option<AutopickReason>,
        idempotency_key: Option<String>,
    ) -> DomainResult<DraftPick> {
        let draft = self.load_draft(draft_id).await?;
        self.validate_pick_preconditions(&draft, roster_id, player_id, autopick_reason.is_some())
            .await?;
        let expected_pick_number = draft.current_pick;
        let outcome = self
            .transactions
            .make_pick_and_advance(
                draft_id,
                roster_id,
                player_id,
                expected_pick_number,
                autopick_reason,
                idempotency_key,
            )
            .await?;
        self.event_sink.publish_all(outcome.events).await;
        Ok(outcome.pick)
    }

    pub async fn make_pick(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        player_id: Uuid,
        idempotency_key: Option<String>,
    ) -> DomainResult<DraftPick> {
        self.submit_pick(draft_id, roster_id, player_id, None, idempotency_key).await
    }

    pub async fn make_pick_asset_selection(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        pick_asset_id: Uuid,
        idempotency_key: Option<String>,
    ) -> DomainResult<DraftPick> {
        let draft = self.load_draft(draft_id).await?;
        validators::validate_draft_is_active(draft.status)?;
        validators::validate_not_in_overnight_pause(&draft.overnight_pause, Utc::now())?;
        validators::validate_on_deck(Self::on_deck_roster(&draft)?, roster_id)?;
        let asset = self
            .pick_asset_repo
            .find_by_id(pick_asset_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("pick asset {} not found", pick_asset_id)))?;
        if asset.current_owner_roster_id != roster_id {
            return Err(DomainError::Forbidden(
                "roster does not currently own this pick asset".to_string(),
            ));
        }
        let outcome = self
            .transactions
            .make_pick_asset_selection_and_advance(draft_id, roster_id, pick_asset_id, idempotency_key)
            .await?;
        self.event_sink.publish_all(outcome.events).await;
        Ok(outcome.pick)
    }

    pub async fn make_matchup_pick(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        player_id: Uuid,
        week: i32,
        opponent_roster_id: Uuid,
        idempotency_key: Option<String>,
    ) -> DomainResult<DraftPick> {
        let draft = self.load_draft(draft_id).await?;
        self.validate_pick_preconditions(&draft, roster_id, player_id, false).await?;
        let outcome = self
            .transactions
            .make_matchup_pick_and_advance(
                draft_id,
                roster_id,
                player_id,
                week,
                opponent_roster_id,
                idempotency_key,
            )
            .await?;
        self.event_sink.publish_all(outcome.events).await;
        Ok(outcome.pick)
    }

    /// Executes an automatic pick for the roster currently on the clock,
    /// using its queue, then best-available-by-ADP, then a pick asset.
    pub async fn autopick(&self, draft_id: Uuid, reason: AutopickReason) -> DomainResult<DraftPick> {
        let draft = self.load_draft(draft_id).await?;
        let roster_id = Self::on_deck_roster(&draft)?;

        let queue = self.queue_repo.find_by_draft_and_roster(draft_id, roster_id).await?;
        let pools: Vec<_> = draft.settings.player_pool.iter().copied().collect();
        let available_players = self.player_repo.find_available(draft_id, &pools).await?;
        let available_assets: Vec<PickAsset> = if draft.settings.include_rookie_picks {
            self.pick_asset_repo
                .find_by_current_owner(draft.league_id, roster_id)
                .await?
        } else {
            Vec::new()
        };

        let target = engine::select_autopick_target(&queue, &available_players, &available_assets)
            .ok_or_else(|| DomainError::Conflict("no eligible autopick target available".to_string()))?;

        tracing::info!(draft_id = %draft_id, roster_id = %roster_id, ?reason, "executing autopick");

        match target {
            QueueTarget::Player(player_id) => {
                self.submit_pick(draft_id, roster_id, player_id, Some(reason), None).await
            }
            QueueTarget::PickAsset(pick_asset_id) => {
                self.make_pick_asset_selection(draft_id, roster_id, pick_asset_id, None).await
            }
        }
    }

    pub async fn start_draft(&self, draft_id: Uuid) -> DomainResult<Draft> {
        let outcome = self.transactions.start_draft(draft_id).await?;
        self.event_sink.publish_all(outcome.events).await;
        Ok(outcome.draft)
    }

    pub async fn pause_draft(&self, draft_id: Uuid) -> DomainResult<Draft> {
        let outcome = self.transactions.pause_draft(draft_id).await?;
        self.event_sink.publish_all(outcome.events).await;
        Ok(outcome.draft)
    }

    pub async fn resume_draft(&self, draft_id: Uuid) -> DomainResult<Draft> {
        let outcome = self.transactions.resume_draft(draft_id).await?;
        self.event_sink.publish_all(outcome.events).await;
        Ok(outcome.draft)
    }

    pub async fn complete_draft(&self, draft_id: Uuid) -> DomainResult<Draft> {
        let outcome = self.transactions.complete_draft(draft_id).await?;
        self.event_sink.publish_all(outcome.events).await;
        Ok(outcome.draft)
    }

    pub async fn undo_last_pick(&self, draft_id: Uuid) -> DomainResult<DraftPick> {
        let outcome = self.transactions.undo_last_pick(draft_id).await?;
        self.event_sink.publish_all(outcome.events).await;
        Ok(outcome.removed_pick)
    }

    pub async fn delete_draft(&self, draft_id: Uuid) -> DomainResult<()> {
        self.transactions.delete_draft(draft_id).await
    }

    pub async fn toggle_autodraft(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        enabled: bool,
    ) -> DomainResult<DraftOrderEntry> {
        let entry = self.order_repo.set_autodraft_enabled(draft_id, roster_id, enabled).await?;
        self.event_sink
            .publish(DraftEvent::new(
                draft_id,
                EventType::DraftAutodraftToggled,
                serde_json::json!({
                    "draft_id": draft_id,
                    "roster_id": roster_id,
                    "enabled": enabled,
                    "forced": false,
                }),
            ))
            .await;
        Ok(entry)
    }

    pub async fn set_order(
        &self,
        entries: Vec<DraftOrderEntry>,
    ) -> DomainResult<Vec<DraftOrderEntry>> {
        crate::models::validate_positions(&entries)?;
        self.order_repo.set_order(&entries).await
    }

    pub async fn randomize_order(
        &self,
        draft_id: Uuid,
        roster_ids: Vec<Uuid>,
    ) -> DomainResult<Vec<DraftOrderEntry>> {
        let entries = order_policy::randomize_order(draft_id, roster_ids);
        self.order_repo.set_order(&entries).await
    }

    pub async fn confirm_order(&self, draft_id: Uuid) -> DomainResult<Draft> {
        let mut draft = self.load_draft(draft_id).await?;
        let entries = self.order_repo.find_by_draft_id(draft_id).await?;
        crate::models::validate_positions(&entries)?;
        draft.order_confirmed = true;
        draft.updated_at = Utc::now();
        self.draft_repo.update(&draft).await
    }

    /// Derives round-1 draft order from who currently owns each round-1
    /// pick asset, honoring any trades made before the draft opened.
    pub async fn set_order_from_pick_ownership(
        &self,
        draft_id: Uuid,
        league_id: Uuid,
        season: i32,
    ) -> DomainResult<Vec<DraftOrderEntry>> {
        let assets = self.pick_asset_repo.find_by_league_and_season(league_id, season).await?;
        let mut round_one: Vec<&PickAsset> = assets.iter().filter(|asset| asset.round == 1).collect();
        round_one.sort_by_key(|asset| asset.original_pick_position.unwrap_or(i32::MAX));

        let entries: Vec<DraftOrderEntry> = round_one
            .iter()
            .enumerate()
            .map(|(idx, asset)| {
                DraftOrderEntry::new(draft_id, asset.current_owner_roster_id, idx as i32 + 1)
            })
            .collect::<DomainResult<Vec<_>>>()?;

        self.order_repo.set_order(&entries).await
    }

    pub async fn add_to_queue(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        target: QueueTarget,
        queue_position: i32,
    ) -> DomainResult<QueueEntry> {
        let entry = QueueEntry::new(draft_id, roster_id, target, queue_position);
        let saved = self.queue_repo.upsert(&entry).await?;
        self.publish_queue_updated(draft_id, roster_id, "added", &saved.target).await;
        Ok(saved)
    }

    pub async fn remove_from_queue(&self, draft_id: Uuid, roster_id: Uuid, entry_id: Uuid) -> DomainResult<()> {
        let queue = self.queue_repo.find_by_draft_and_roster(draft_id, roster_id).await?;
        let entry = queue
            .into_iter()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| DomainError::NotFound(format!("queue entry {} not found", entry_id)))?;
        self.queue_repo.remove(entry_id).await?;
        self.publish_queue_updated(draft_id, roster_id, "removed", &entry.target).await;
        Ok(())
    }

    pub async fn reorder_queue(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        ordered_ids: Vec<Uuid>,
    ) -> DomainResult<Vec<QueueEntry>> {
        let entries = self.queue_repo.reorder(draft_id, roster_id, &ordered_ids).await?;
        self.event_sink
            .publish(DraftEvent::new(
                draft_id,
                EventType::DraftQueueUpdated,
                serde_json::json!({
                    "draft_id": draft_id,
                    "roster_id": roster_id,
                    "action": "reordered",
                }),
            ))
            .await;
        Ok(entries)
    }

    async fn publish_queue_updated(&self, draft_id: Uuid, roster_id: Uuid, action: &str, target: &QueueTarget) {
        let mut payload = serde_json::json!({
            "draft_id": draft_id,
            "roster_id": roster_id,
            "action": action,
        });
        match target {
            QueueTarget::Player(player_id) => payload["player_id"] = serde_json::json!(player_id),
            QueueTarget::PickAsset(pick_asset_id) => payload["pick_asset_id"] = serde_json::json!(pick_asset_id),
        }
        self.event_sink
            .publish(DraftEvent::new(draft_id, EventType::DraftQueueUpdated, payload))
            .await;
    }
}

/// Resolves which roster actually holds a given round's slot once trades are
/// accounted for. Exposed for callers (e.g. the tick scheduler) that need to
/// know the picker without going through a full state mutation.
pub fn actual_picker_for_round(base_roster_id: Uuid, round: i32, assets: &[PickAsset]) -> Uuid {
    order_policy::resolve_actual_picker(base_roster_id, round, assets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerPool;
    use crate::repositories::{
        MockDraftOrderRepository, MockDraftPickRepository, MockDraftRepository,
        MockDraftTransactions, MockPickAssetRepository, MockPlayerRepository, MockQueueRepository,
    };
    use crate::services::events::MockDraftEventSink;
    use crate::models::Player;

    fn in_progress_draft(roster_id: Uuid, pick_deadline: Option<chrono::DateTime<Utc>>) -> Draft {
        let mut draft = Draft::new(Uuid::new_v4(), crate::models::DraftType::Snake, 15, 90).unwrap();
        draft.status = crate::models::DraftStatus::InProgress;
        draft.current_roster_id = Some(roster_id);
        draft.pick_deadline = pick_deadline;
        draft
    }

    #[allow(clippy::too_many_arguments)]
    fn build_service(
        draft_repo: MockDraftRepository,
        order_repo: MockDraftOrderRepository,
        pick_repo: MockDraftPickRepository,
        pick_asset_repo: MockPickAssetRepository,
        player_repo: MockPlayerRepository,
        queue_repo: MockQueueRepository,
        transactions: MockDraftTransactions,
        event_sink: MockDraftEventSink,
    ) -> DraftStateService {
        DraftStateService::new(
            Arc::new(draft_repo),
            Arc::new(order_repo),
            Arc::new(pick_repo),
            Arc::new(pick_asset_repo),
            Arc::new(player_repo),
            Arc::new(queue_repo),
            Arc::new(transactions),
            Arc::new(event_sink),
        )
    }

    #[tokio::test]
    async fn test_make_pick_rejects_when_deadline_passed() {
        let roster_id = Uuid::new_v4();
        let draft = in_progress_draft(roster_id, Some(Utc::now() - chrono::Duration::seconds(1)));
        let draft_id = draft.id;

        let mut draft_repo = MockDraftRepository::new();
        draft_repo
            .expect_find_by_id()
            .withf(move |id| *id == draft_id)
            .returning(move |_| Ok(Some(draft.clone())));

        let service = build_service(
            draft_repo,
            MockDraftOrderRepository::new(),
            MockDraftPickRepository::new(),
            MockPickAssetRepository::new(),
            MockPlayerRepository::new(),
            MockQueueRepository::new(),
            MockDraftTransactions::new(),
            MockDraftEventSink::new(),
        );

        let result = service
            .make_pick(draft_id, roster_id, Uuid::new_v4(), None)
            .await;
        assert!(matches!(result, Err(DomainError::DeadlinePassed(_))));
    }

    #[tokio::test]
    async fn test_autopick_bypasses_deadline_check() {
        let roster_id = Uuid::new_v4();
        let draft = in_progress_draft(roster_id, Some(Utc::now() - chrono::Duration::seconds(1)));
        let draft_id = draft.id;
        let expected_pick_number = draft.current_pick;

        let mut player = Player::new("A".to_string(), "WR".to_string(), PlayerPool::Veteran).unwrap();
        player.adp = Some(1.0);
        let player_id = player.id;

        let mut draft_repo = MockDraftRepository::new();
        draft_repo.expect_find_by_id().returning(move |_| Ok(Some(draft.clone())));

        let mut queue_repo = MockQueueRepository::new();
        queue_repo.expect_find_by_draft_and_roster().returning(|_, _| Ok(Vec::new()));

        let mut player_repo = MockPlayerRepository::new();
        let player_for_available = player.clone();
        player_repo
            .expect_find_available()
            .returning(move |_, _| Ok(vec![player_for_available.clone()]));
        let player_for_lookup = player.clone();
        player_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(player_for_lookup.clone())));

        let mut pick_repo = MockDraftPickRepository::new();
        pick_repo.expect_find_by_draft_id().returning(|_| Ok(Vec::new()));

        let mut transactions = MockDraftTransactions::new();
        transactions
            .expect_make_pick_and_advance()
            .withf(move |d, r, p, expected, reason, _key| {
                *d == draft_id
                    && *r == roster_id
                    && *p == player_id
                    && *expected == expected_pick_number
                    && *reason == Some(AutopickReason::TimerExpired)
            })
            .returning(move |_, roster_id, player_id, pick_number, _, _| {
                Ok(PickOutcome {
                    draft: in_progress_draft(roster_id, None),
                    pick: DraftPick::new(draft_id, pick_number, 1, 1, roster_id, Some(player_id), true, None)
                        .unwrap(),
                    events: Vec::new(),
                })
            });

        let mut event_sink = MockDraftEventSink::new();
        event_sink.expect_publish_all().returning(|_| ());

        let service = build_service(
            draft_repo,
            MockDraftOrderRepository::new(),
            pick_repo,
            MockPickAssetRepository::new(),
            player_repo,
            queue_repo,
            transactions,
            event_sink,
        );

        let result = service.autopick(draft_id, AutopickReason::TimerExpired).await;
        assert!(result.is_ok(), "autopick should not be blocked by an expired deadline: {result:?}");
    }

    #[tokio::test]
    async fn test_toggle_autodraft_publishes_event() {
        let draft_id = Uuid::new_v4();
        let roster_id = Uuid::new_v4();

        let mut order_repo = MockDraftOrderRepository::new();
        order_repo.expect_set_autodraft_enabled().returning(move |d, r, enabled| {
            let mut entry = DraftOrderEntry::new(d, r, 1).unwrap();
            entry.is_autodraft_enabled = enabled;
            Ok(entry)
        });

        let mut event_sink = MockDraftEventSink::new();
        event_sink
            .expect_publish()
            .withf(|event| event.event_type == EventType::DraftAutodraftToggled)
            .returning(|_| ());

        let service = build_service(
            MockDraftRepository::new(),
            order_repo,
            MockDraftPickRepository::new(),
            MockPickAssetRepository::new(),
            MockPlayerRepository::new(),
            MockQueueRepository::new(),
            MockDraftTransactions::new(),
            event_sink,
        );

        let entry = service.toggle_autodraft(draft_id, roster_id, true).await.unwrap();
        assert!(entry.is_autodraft_enabled);
    }
}

use std::sync::Arc;

use chrono::Utc;
use tokio::time::{interval, Duration};
use tokio_util::sync::CancellationToken;

use crate::repositories::{DraftOrderRepository, DraftRepository, RosterRepository};
use crate::services::engine;
use crate::services::pick_state;
use crate::services::state_service::DraftStateService;

/// Periodically scans in-progress drafts and fires an autopick for any whose
/// pick deadline has passed, whose on-deck roster has autodraft enabled, or
/// whose on-deck roster has no owning user. One scheduler instance serves
/// every draft; the per-draft advisory lock inside `DraftTransactions` is
/// what keeps a tick racing a concurrent human pick from corrupting state.
pub struct TickScheduler {
    state_service: Arc<DraftStateService>,
    draft_repo: Arc<dyn DraftRepository>,
    order_repo: Arc<dyn DraftOrderRepository>,
    roster_repo: Arc<dyn RosterRepository>,
    cadence: Duration,
}

impl TickScheduler {
    pub fn new(
        state_service: Arc<DraftStateService>,
        draft_repo: Arc<dyn DraftRepository>,
        order_repo: Arc<dyn DraftOrderRepository>,
        roster_repo: Arc<dyn RosterRepository>,
        cadence_seconds: u64,
    ) -> Self {
        Self {
            state_service,
            draft_repo,
            order_repo,
            roster_repo,
            cadence: Duration::from_secs(cadence_seconds),
        }
    }

    /// Runs until `cancellation` fires. Intended to be spawned as a
    /// long-lived background task from `main`.
    pub async fn run(&self, cancellation: CancellationToken) {
        let mut ticker = interval(self.cadence);
        tracing::info!(cadence_secs = self.cadence.as_secs(), "tick scheduler starting");
        loop {
            tokio::select! {
                _ = cancellation.cancelled() => {
                    tracing::info!("tick scheduler shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    self.tick_once().await;
                }
            }
        }
    }

    pub async fn tick_once(&self) {
        let drafts = match self.draft_repo.find_in_progress().await {
            Ok(drafts) => drafts,
            Err(error) => {
                tracing::error!(%error, "failed to list in-progress drafts for tick");
                return;
            }
        };

        for draft in drafts {
            let now = Utc::now();
            if draft.overnight_pause.contains(now.time()) {
                continue;
            }
            let Some(roster_id) = draft.current_roster_id else {
                continue;
            };

            let timer_expired = draft
                .pick_deadline
                .is_some_and(|deadline| pick_state::deadline_has_passed(deadline, now));

            let autodraft_enabled = match self.order_repo.find_by_draft_and_roster(draft.id, roster_id).await {
                Ok(entry) => entry.map(|e| e.is_autodraft_enabled).unwrap_or(false),
                Err(error) => {
                    tracing::error!(draft_id = %draft.id, %error, "failed to load draft order entry for tick");
                    continue;
                }
            };

            let empty_roster_slot = match self.roster_repo.find_by_id(roster_id).await {
                Ok(roster) => roster.map(|r| r.is_unowned()).unwrap_or(false),
                Err(error) => {
                    tracing::error!(draft_id = %draft.id, %error, "failed to load roster for tick");
                    continue;
                }
            };

            let Some(reason) =
                engine::resolve_autopick_reason(empty_roster_slot, autodraft_enabled, timer_expired)
            else {
                continue;
            };

            match self.state_service.autopick(draft.id, reason).await {
                Ok(pick) => {
                    tracing::info!(draft_id = %draft.id, pick_number = pick.pick_number, ?reason, "autopicked on tick");
                }
                Err(error) => {
                    tracing::warn!(draft_id = %draft.id, %error, "autopick failed on tick");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Draft, DraftStatus, DraftType, Roster};
    use crate::repositories::{
        MockDraftOrderRepository, MockDraftPickRepository, MockDraftRepository,
        MockDraftTransactions, MockPickAssetRepository, MockPlayerRepository, MockQueueRepository,
        MockRosterRepository,
    };
    use crate::services::events::MockDraftEventSink;
    use uuid::Uuid;

    #[allow(clippy::too_many_arguments)]
    fn build_state_service(
        draft_repo: MockDraftRepository,
        order_repo: MockDraftOrderRepository,
    ) -> Arc<DraftStateService> {
        Arc::new(DraftStateService::new(
            Arc::new(draft_repo),
            Arc::new(order_repo),
            Arc::new(MockDraftPickRepository::new()),
            Arc::new(MockPickAssetRepository::new()),
            Arc::new(MockPlayerRepository::new()),
            Arc::new(MockQueueRepository::new()),
            Arc::new(MockDraftTransactions::new()),
            Arc::new(MockDraftEventSink::new()),
        ))
    }

    fn in_progress_draft(roster_id: Uuid, pick_deadline: Option<chrono::DateTime<Utc>>) -> Draft {
        let mut draft = Draft::new(Uuid::new_v4(), DraftType::Snake, 15, 90).unwrap();
        draft.status = DraftStatus::InProgress;
        draft.current_roster_id = Some(roster_id);
        draft.pick_deadline = pick_deadline;
        draft
    }

    #[tokio::test]
    async fn test_tick_once_skips_draft_when_no_trigger_condition_holds() {
        let roster_id = Uuid::new_v4();
        let draft = in_progress_draft(roster_id, Some(Utc::now() + chrono::Duration::seconds(60)));

        let mut draft_repo = MockDraftRepository::new();
        draft_repo.expect_find_in_progress().returning(move || Ok(vec![draft.clone()]));

        let mut order_repo = MockDraftOrderRepository::new();
        order_repo
            .expect_find_by_draft_and_roster()
            .returning(|_, _| Ok(None));

        let mut roster_repo = MockRosterRepository::new();
        roster_repo.expect_find_by_id().returning(move |id| {
            Ok(Some(Roster {
                id,
                league_id: Uuid::new_v4(),
                display_name: "Owned Roster".to_string(),
                owner_user_id: Some(Uuid::new_v4()),
                created_at: Utc::now(),
            }))
        });

        // No expectations on the service-level mocks: if the trigger logic
        // were wrong and autopick got called anyway, these would panic.
        let state_service = build_state_service(MockDraftRepository::new(), MockDraftOrderRepository::new());

        let scheduler = TickScheduler::new(state_service, Arc::new(draft_repo), Arc::new(order_repo), Arc::new(roster_repo), 5);
        scheduler.tick_once().await;
    }

    #[tokio::test]
    async fn test_tick_once_resolves_timer_expired_and_invokes_autopick() {
        let roster_id = Uuid::new_v4();
        let draft = in_progress_draft(roster_id, Some(Utc::now() - chrono::Duration::seconds(1)));
        let draft_id = draft.id;

        let mut draft_repo = MockDraftRepository::new();
        draft_repo.expect_find_in_progress().returning(move || Ok(vec![draft.clone()]));

        let mut order_repo = MockDraftOrderRepository::new();
        order_repo
            .expect_find_by_draft_and_roster()
            .returning(|_, _| Ok(None));

        let mut roster_repo = MockRosterRepository::new();
        roster_repo.expect_find_by_id().returning(move |id| {
            Ok(Some(Roster {
                id,
                league_id: Uuid::new_v4(),
                display_name: "Owned Roster".to_string(),
                owner_user_id: Some(Uuid::new_v4()),
                created_at: Utc::now(),
            }))
        });

        // The service-level draft lookup failing with NotFound proves the
        // tick loop actually reached `autopick` for this draft; the resolved
        // reason itself is exercised by engine::resolve_autopick_reason's
        // own tests.
        let mut service_draft_repo = MockDraftRepository::new();
        service_draft_repo
            .expect_find_by_id()
            .withf(move |id| *id == draft_id)
            .returning(|_| Ok(None));

        let state_service = build_state_service(service_draft_repo, MockDraftOrderRepository::new());
        let scheduler = TickScheduler::new(state_service, Arc::new(draft_repo), Arc::new(order_repo), Arc::new(roster_repo), 5);
        scheduler.tick_once().await;
    }
}

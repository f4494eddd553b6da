use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::{DomainError, DomainResult};
use domain::models::{
    ChessClockEntry, Draft, DraftEvent, DraftOrderEntry, DraftPick, DraftStatus, EventType,
    PickMetadata, TimerMode,
};
use domain::repositories::{DraftTransactions, LifecycleOutcome, PickOutcome, UndoOutcome};
use domain::services::engine::AutopickReason;
use domain::services::{order_policy, pick_state, NoopScheduleGenerator, ScheduleGenerator};

use crate::errors::{DbError, DbResult};
use crate::lock;
use crate::models::{DraftDb, DraftEventDb, DraftOrderEntryDb, DraftPickDb, PickAssetDb};

/// The single place an actual Postgres transaction is opened for the
/// composite, lock-guarded draft operations. Every method here acquires the
/// per-draft advisory lock, re-reads the draft row with `FOR UPDATE`,
/// performs its writes, and collects the events produced, all before
/// committing; nothing is handed to a live sink until the commit succeeds.
pub struct SqlxDraftTransactions {
    pool: PgPool,
    advisory_lock_namespace: i32,
    schedule_generator: Arc<dyn ScheduleGenerator>,
}

impl SqlxDraftTransactions {
    pub fn new(pool: PgPool, advisory_lock_namespace: i32) -> Self {
        Self::with_schedule_generator(pool, advisory_lock_namespace, Arc::new(NoopScheduleGenerator))
    }

    pub fn with_schedule_generator(
        pool: PgPool,
        advisory_lock_namespace: i32,
        schedule_generator: Arc<dyn ScheduleGenerator>,
    ) -> Self {
        Self {
            pool,
            advisory_lock_namespace,
            schedule_generator,
        }
    }

    async fn fetch_draft_for_update(
        conn: &mut sqlx::PgConnection,
        draft_id: Uuid,
    ) -> DbResult<DraftDb> {
        sqlx::query_as!(
            DraftDb,
            r#"
            SELECT id, league_id, draft_type, status, rounds, pick_time_seconds, current_pick,
                   current_round, current_roster_id, pick_deadline, scheduled_start, order_confirmed,
                   settings as "settings: _", overnight_pause_enabled, overnight_pause_start,
                   overnight_pause_end, overnight_pause_timezone, draft_state as "draft_state: _",
                   completed_at, created_at, updated_at
            FROM drafts
            WHERE id = $1
            FOR UPDATE
            "#,
            draft_id
        )
        .fetch_optional(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)?
        .ok_or_else(|| DbError::NotFound(format!("draft {} not found", draft_id)))
    }

    async fn save_draft(conn: &mut sqlx::PgConnection, draft: &Draft) -> DbResult<DraftDb> {
        let db = DraftDb::from_domain(draft);
        sqlx::query_as!(
            DraftDb,
            r#"
            UPDATE drafts
            SET status = $2, current_pick = $3, current_round = $4, current_roster_id = $5,
                pick_deadline = $6, order_confirmed = $7, draft_state = $8, completed_at = $9,
                updated_at = $10
            WHERE id = $1
            RETURNING id, league_id, draft_type, status, rounds, pick_time_seconds, current_pick,
                      current_round, current_roster_id, pick_deadline, scheduled_start, order_confirmed,
                      settings as "settings: _", overnight_pause_enabled, overnight_pause_start,
                      overnight_pause_end, overnight_pause_timezone, draft_state as "draft_state: _",
                      completed_at, created_at, updated_at
            "#,
            db.id,
            db.status,
            db.current_pick,
            db.current_round,
            db.current_roster_id,
            db.pick_deadline,
            db.order_confirmed,
            db.draft_state as _,
            db.completed_at,
            db.updated_at,
        )
        .fetch_one(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)
    }

    async fn fetch_order(
        conn: &mut sqlx::PgConnection,
        draft_id: Uuid,
    ) -> DbResult<Vec<DraftOrderEntry>> {
        let rows = sqlx::query_as!(
            DraftOrderEntryDb,
            r#"
            SELECT draft_id, roster_id, draft_position, is_autodraft_enabled
            FROM draft_order
            WHERE draft_id = $1
            ORDER BY draft_position ASC
            "#,
            draft_id
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)?;
        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    /// Pick assets are scoped to a live draft once that draft's order is
    /// derived from pick ownership; only assets carrying this draft's id
    /// are consulted when resolving who actually holds a given round.
    async fn fetch_pick_assets_for_draft(
        conn: &mut sqlx::PgConnection,
        draft_id: Uuid,
    ) -> DbResult<Vec<domain::models::PickAsset>> {
        let rows = sqlx::query_as!(
            PickAssetDb,
            r#"
            SELECT id, league_id, draft_id, season, round, original_roster_id,
                   current_owner_roster_id, original_pick_position
            FROM pick_assets
            WHERE draft_id = $1
            "#,
            draft_id
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)?;
        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn insert_pick(conn: &mut sqlx::PgConnection, pick: &DraftPick) -> DbResult<DraftPick> {
        let db = DraftPickDb::from_domain(pick);
        let row = sqlx::query_as!(
            DraftPickDb,
            r#"
            INSERT INTO draft_picks
                (id, draft_id, pick_number, round, pick_in_round, roster_id, player_id,
                 is_auto_pick, picked_at, idempotency_key, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, draft_id, pick_number, round, pick_in_round, roster_id, player_id,
                      is_auto_pick, picked_at, idempotency_key, metadata as "metadata: _"
            "#,
            db.id,
            db.draft_id,
            db.pick_number,
            db.round,
            db.pick_in_round,
            db.roster_id,
            db.player_id,
            db.is_auto_pick,
            db.picked_at,
            db.idempotency_key,
            db.metadata as _,
        )
        .fetch_one(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)?;
        Ok(row.to_domain())
    }

    async fn find_pick_by_idempotency_key(
        conn: &mut sqlx::PgConnection,
        draft_id: Uuid,
        roster_id: Uuid,
        idempotency_key: &str,
    ) -> DbResult<Option<DraftPick>> {
        let row = sqlx::query_as!(
            DraftPickDb,
            r#"
            SELECT id, draft_id, pick_number, round, pick_in_round, roster_id, player_id,
                   is_auto_pick, picked_at, idempotency_key, metadata as "metadata: _"
            FROM draft_picks
            WHERE draft_id = $1 AND roster_id = $2 AND idempotency_key = $3
            "#,
            draft_id,
            roster_id,
            idempotency_key
        )
        .fetch_optional(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)?;
        Ok(row.map(|r| r.to_domain()))
    }

    async fn player_already_drafted(
        conn: &mut sqlx::PgConnection,
        draft_id: Uuid,
        player_id: Uuid,
    ) -> DbResult<bool> {
        let row = sqlx::query!(
            r#"SELECT 1 as "exists!" FROM draft_picks WHERE draft_id = $1 AND player_id = $2"#,
            draft_id,
            player_id
        )
        .fetch_optional(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)?;
        Ok(row.is_some())
    }

    async fn remove_player_from_queues(
        conn: &mut sqlx::PgConnection,
        draft_id: Uuid,
        player_id: Uuid,
    ) -> DbResult<()> {
        sqlx::query!(
            "DELETE FROM queue_entries WHERE draft_id = $1 AND target_player_id = $2",
            draft_id,
            player_id
        )
        .execute(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)?;
        Ok(())
    }

    async fn remove_pick_asset_from_queues(
        conn: &mut sqlx::PgConnection,
        draft_id: Uuid,
        pick_asset_id: Uuid,
    ) -> DbResult<()> {
        sqlx::query!(
            "DELETE FROM queue_entries WHERE draft_id = $1 AND target_pick_asset_id = $2",
            draft_id,
            pick_asset_id
        )
        .execute(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)?;
        Ok(())
    }

    async fn insert_event(conn: &mut sqlx::PgConnection, event: &DraftEvent) -> DbResult<()> {
        let db = DraftEventDb::from_domain(event);
        sqlx::query!(
            r#"
            INSERT INTO draft_events (id, draft_id, event_type, payload, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
            db.id,
            db.draft_id,
            db.event_type,
            db.payload as _,
            db.created_at,
        )
        .execute(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)?;
        Ok(())
    }

    async fn chess_clock_remaining(
        conn: &mut sqlx::PgConnection,
        draft_id: Uuid,
        roster_id: Uuid,
    ) -> DbResult<Option<i32>> {
        let row = sqlx::query!(
            "SELECT remaining_seconds FROM chess_clock_entries WHERE draft_id = $1 AND roster_id = $2",
            draft_id,
            roster_id
        )
        .fetch_optional(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)?;
        Ok(row.map(|r| r.remaining_seconds))
    }

    async fn spend_chess_clock(
        conn: &mut sqlx::PgConnection,
        mut entry: ChessClockEntry,
        seconds: i32,
    ) -> DbResult<()> {
        entry.spend(seconds);
        sqlx::query!(
            r#"
            INSERT INTO chess_clock_entries (draft_id, roster_id, remaining_seconds)
            VALUES ($1, $2, $3)
            ON CONFLICT (draft_id, roster_id) DO UPDATE SET remaining_seconds = EXCLUDED.remaining_seconds
            "#,
            entry.draft_id,
            entry.roster_id,
            entry.remaining_seconds,
        )
        .execute(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)?;
        Ok(())
    }

    /// Populates each roster's players from the picks just finished, flips
    /// the league's status, and invokes the schedule-generation collaborator,
    /// all inside the caller's open transaction. Reciprocal matchup-pick rows
    /// (negative pick numbers) are excluded, matching how they're excluded
    /// everywhere else a "real" pick is counted.
    async fn apply_completion_side_effects(&self, conn: &mut sqlx::PgConnection, draft: &Draft) -> DomainResult<()> {
        sqlx::query!(
            r#"
            INSERT INTO roster_players (id, roster_id, player_id, season, week)
            SELECT gen_random_uuid(), dp.roster_id, dp.player_id, l.season, 0
            FROM draft_picks dp
            JOIN drafts d ON d.id = dp.draft_id
            JOIN leagues l ON l.id = d.league_id
            WHERE dp.draft_id = $1 AND dp.player_id IS NOT NULL AND dp.pick_number > 0
            "#,
            draft.id,
        )
        .execute(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)?;

        sqlx::query!(
            "UPDATE leagues SET status = 'drafted' WHERE id = $1",
            draft.league_id,
        )
        .execute(&mut *conn)
        .await
        .map_err(DbError::DatabaseError)?;

        self.schedule_generator.generate_schedule(draft.id, draft.league_id).await?;
        Ok(())
    }

    /// Advances the draft's pointers past the pick just filled at
    /// `filled_pick_number`, using the pure order and pick-state policy
    /// functions. Returns the mutated draft plus the `draft_next_pick` or
    /// `draft_completed` event the advance produces.
    async fn advance_past(
        &self,
        conn: &mut sqlx::PgConnection,
        mut draft: Draft,
        filled_pick_number: i32,
        roster_count: i32,
    ) -> DomainResult<(Draft, DraftEvent)> {
        let order = Self::fetch_order(conn, draft.id).await?;
        let assets = Self::fetch_pick_assets_for_draft(conn, draft.id).await?;

        let next_pick_number = filled_pick_number + 1;
        let mut probe = draft.clone();
        probe.current_pick = next_pick_number;

        if probe.is_terminal_pick(roster_count) {
            draft.status = DraftStatus::Completed;
            draft.current_roster_id = None;
            draft.pick_deadline = None;
            draft.completed_at = Some(Utc::now());
            self.apply_completion_side_effects(conn, &draft).await?;
            let event = DraftEvent::new(
                draft.id,
                EventType::DraftCompleted,
                serde_json::json!({ "draft_id": draft.id }),
            );
            return Ok((draft, event));
        }

        let (round, _pick_in_round) = order_policy::round_and_pick_in_round(next_pick_number, roster_count)?;
        let base_roster_id = order_policy::base_picker_for_pick(draft.draft_type, next_pick_number, roster_count, &order)?;
        let actual_roster_id = order_policy::resolve_actual_picker(base_roster_id, round, &assets);

        let now = Utc::now();
        let deadline = match draft.settings.timer_mode {
            TimerMode::PerPick => pick_state::compute_pick_deadline(
                TimerMode::PerPick,
                now,
                draft.pick_time_seconds,
                None,
                draft.settings.chess_clock_min_pick_seconds,
            ),
            TimerMode::ChessClock => {
                let remaining = Self::chess_clock_remaining(conn, draft.id, actual_roster_id).await?;
                pick_state::compute_pick_deadline(
                    TimerMode::ChessClock,
                    now,
                    draft.pick_time_seconds,
                    remaining,
                    draft.settings.chess_clock_min_pick_seconds,
                )
            }
        };

        draft.current_pick = next_pick_number;
        draft.current_round = round;
        draft.current_roster_id = Some(actual_roster_id);
        draft.pick_deadline = Some(deadline);

        let event = DraftEvent::new(
            draft.id,
            EventType::DraftNextPick,
            serde_json::json!({
                "draft_id": draft.id,
                "current_pick": draft.current_pick,
                "current_round": draft.current_round,
                "current_roster_id": actual_roster_id,
                "original_roster_id": base_roster_id,
                "is_traded": actual_roster_id != base_roster_id,
                "pick_deadline": draft.pick_deadline,
            }),
        );

        Ok((draft, event))
    }
}

#[async_trait::async_trait]
impl DraftTransactions for SqlxDraftTransactions {
    async fn make_pick_and_advance(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        player_id: Uuid,
        expected_pick_number: i32,
        autopick_reason: Option<AutopickReason>,
        idempotency_key: Option<String>,
    ) -> DomainResult<PickOutcome> {
        let is_auto_pick = autopick_reason.is_some();
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;
        lock::acquire_draft_lock(&mut tx, self.advisory_lock_namespace, draft_id).await?;

        let draft_db = Self::fetch_draft_for_update(&mut tx, draft_id).await?;
        let draft = draft_db.to_domain()?;

        if draft.status != DraftStatus::InProgress {
            return Err(DomainError::InvalidState(format!(
                "draft is {} and not accepting picks",
                draft.status
            )));
        }

        if let Some(key) = idempotency_key.as_deref() {
            if let Some(existing) =
                Self::find_pick_by_idempotency_key(&mut tx, draft_id, roster_id, key).await?
            {
                tx.commit().await.map_err(DbError::DatabaseError)?;
                return Ok(PickOutcome {
                    draft,
                    pick: existing,
                    events: Vec::new(),
                });
            }
        }

        if draft.current_pick != expected_pick_number {
            return Err(DomainError::PickConflict(format!(
                "draft advanced to pick {} before this pick for {} was committed",
                draft.current_pick, expected_pick_number
            )));
        }
        if !is_auto_pick && draft.current_roster_id != Some(roster_id) {
            return Err(DomainError::Forbidden(
                "it is not this roster's turn to pick".to_string(),
            ));
        }
        if Self::player_already_drafted(&mut tx, draft_id, player_id).await? {
            return Err(DomainError::PlayerAlreadyDrafted(player_id.to_string()));
        }

        let order = Self::fetch_order(&mut tx, draft_id).await?;
        let roster_count = order.len() as i32;
        let (round, pick_in_round) =
            order_policy::round_and_pick_in_round(expected_pick_number, roster_count)?;

        let pick = DraftPick::new(
            draft_id,
            expected_pick_number,
            round,
            pick_in_round,
            roster_id,
            Some(player_id),
            is_auto_pick,
            idempotency_key,
        )?;
        let inserted = Self::insert_pick(&mut tx, &pick).await?;
        Self::remove_player_from_queues(&mut tx, draft_id, player_id).await?;

        let mut forced_autodraft_event = None;
        if autopick_reason == Some(AutopickReason::TimerExpired) {
            let already_enabled = order
                .iter()
                .find(|entry| entry.roster_id == roster_id)
                .map(|entry| entry.is_autodraft_enabled)
                .unwrap_or(false);
            if !already_enabled {
                sqlx::query!(
                    "UPDATE draft_order SET is_autodraft_enabled = true WHERE draft_id = $1 AND roster_id = $2",
                    draft_id,
                    roster_id,
                )
                .execute(&mut *tx)
                .await
                .map_err(DbError::DatabaseError)?;
                forced_autodraft_event = Some(DraftEvent::new(
                    draft_id,
                    EventType::DraftAutodraftToggled,
                    serde_json::json!({
                        "draft_id": draft_id,
                        "roster_id": roster_id,
                        "enabled": true,
                        "forced": true,
                    }),
                ));
            }
        }

        if draft.settings.timer_mode == TimerMode::ChessClock {
            if let Some(remaining) = Self::chess_clock_remaining(&mut tx, draft_id, roster_id).await? {
                let elapsed = draft
                    .pick_deadline
                    .map(|deadline| draft.pick_time_seconds - (deadline - Utc::now()).num_seconds() as i32)
                    .unwrap_or(0)
                    .max(0);
                let entry = ChessClockEntry {
                    draft_id,
                    roster_id,
                    remaining_seconds: remaining,
                };
                Self::spend_chess_clock(&mut tx, entry, elapsed).await?;
            }
        }

        let (final_draft, advance_event) =
            self.advance_past(&mut tx, draft, expected_pick_number, roster_count).await?;
        Self::save_draft(&mut tx, &final_draft).await?;

        let mut events = vec![
            DraftEvent::new(
                draft_id,
                EventType::DraftPick,
                serde_json::json!({
                    "draft_id": draft_id,
                    "pick_number": inserted.pick_number,
                    "roster_id": inserted.roster_id,
                    "player_id": player_id,
                    "is_auto_pick": inserted.is_auto_pick,
                }),
            ),
            DraftEvent::new(
                draft_id,
                EventType::DraftQueueUpdated,
                serde_json::json!({ "action": "removed", "player_id": player_id }),
            ),
            advance_event,
        ];
        if let Some(event) = forced_autodraft_event {
            events.push(event);
        }

        for event in &events {
            Self::insert_event(&mut tx, event).await?;
        }
        tx.commit().await.map_err(DbError::DatabaseError)?;

        events.retain(|_| true);
        Ok(PickOutcome {
            draft: final_draft,
            pick: inserted,
            events,
        })
    }

    async fn make_pick_asset_selection_and_advance(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        pick_asset_id: Uuid,
        idempotency_key: Option<String>,
    ) -> DomainResult<PickOutcome> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;
        lock::acquire_draft_lock(&mut tx, self.advisory_lock_namespace, draft_id).await?;

        let draft_db = Self::fetch_draft_for_update(&mut tx, draft_id).await?;
        let draft = draft_db.to_domain()?;

        if draft.status != DraftStatus::InProgress {
            return Err(DomainError::InvalidState(format!(
                "draft is {} and not accepting picks",
                draft.status
            )));
        }

        if let Some(key) = idempotency_key.as_deref() {
            if let Some(existing) =
                Self::find_pick_by_idempotency_key(&mut tx, draft_id, roster_id, key).await?
            {
                tx.commit().await.map_err(DbError::DatabaseError)?;
                return Ok(PickOutcome {
                    draft,
                    pick: existing,
                    events: Vec::new(),
                });
            }
        }

        let asset_row = sqlx::query_as!(
            PickAssetDb,
            r#"
            SELECT id, league_id, draft_id, season, round, original_roster_id,
                   current_owner_roster_id, original_pick_position
            FROM pick_assets
            WHERE id = $1
            FOR UPDATE
            "#,
            pick_asset_id
        )
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?
        .ok_or_else(|| DomainError::NotFound(format!("pick asset {} not found", pick_asset_id)))?;

        if asset_row.league_id != draft.league_id {
            return Err(DomainError::Forbidden(
                "pick asset does not belong to this draft's league".to_string(),
            ));
        }
        if asset_row.current_owner_roster_id != roster_id {
            return Err(DomainError::Forbidden(
                "roster does not currently own this pick asset".to_string(),
            ));
        }

        let expected_pick_number = draft.current_pick;
        if draft.current_roster_id != Some(roster_id) {
            return Err(DomainError::Forbidden(
                "it is not this roster's turn to pick".to_string(),
            ));
        }

        let order = Self::fetch_order(&mut tx, draft_id).await?;
        let roster_count = order.len() as i32;
        let (round, pick_in_round) =
            order_policy::round_and_pick_in_round(expected_pick_number, roster_count)?;

        let mut pick = DraftPick::new(
            draft_id,
            expected_pick_number,
            round,
            pick_in_round,
            roster_id,
            None,
            false,
            idempotency_key,
        )?;
        pick.metadata = PickMetadata {
            week: None,
            opponent_roster_id: None,
        };
        let inserted = Self::insert_pick(&mut tx, &pick).await?;

        sqlx::query!(
            "INSERT INTO vet_draft_pick_asset_selections (id, draft_id, pick_number, draft_pick_asset_id, roster_id) VALUES ($1, $2, $3, $4, $5)",
            Uuid::new_v4(),
            draft_id,
            inserted.pick_number,
            pick_asset_id,
            roster_id,
        )
        .execute(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        sqlx::query!(
            "UPDATE pick_assets SET current_owner_roster_id = $2 WHERE id = $1",
            pick_asset_id,
            roster_id,
        )
        .execute(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        Self::remove_pick_asset_from_queues(&mut tx, draft_id, pick_asset_id).await?;

        let (final_draft, advance_event) =
            self.advance_past(&mut tx, draft, expected_pick_number, roster_count).await?;
        Self::save_draft(&mut tx, &final_draft).await?;

        let mut events = vec![
            DraftEvent::new(
                draft_id,
                EventType::DraftPick,
                serde_json::json!({
                    "draft_id": draft_id,
                    "pick_number": inserted.pick_number,
                    "roster_id": inserted.roster_id,
                    "pick_asset_id": pick_asset_id,
                    "is_auto_pick": false,
                }),
            ),
            DraftEvent::new(
                draft_id,
                EventType::DraftQueueUpdated,
                serde_json::json!({ "action": "removed", "pick_asset_id": pick_asset_id }),
            ),
            advance_event,
        ];

        for event in &events {
            Self::insert_event(&mut tx, event).await?;
        }
        tx.commit().await.map_err(DbError::DatabaseError)?;

        events.retain(|_| true);
        Ok(PickOutcome {
            draft: final_draft,
            pick: inserted,
            events,
        })
    }

    async fn make_matchup_pick_and_advance(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        player_id: Uuid,
        week: i32,
        opponent_roster_id: Uuid,
        idempotency_key: Option<String>,
    ) -> DomainResult<PickOutcome> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;
        lock::acquire_draft_lock(&mut tx, self.advisory_lock_namespace, draft_id).await?;

        let draft_db = Self::fetch_draft_for_update(&mut tx, draft_id).await?;
        let draft = draft_db.to_domain()?;

        if draft.status != DraftStatus::InProgress {
            return Err(DomainError::InvalidState(format!(
                "draft is {} and not accepting picks",
                draft.status
            )));
        }
        if draft.current_roster_id != Some(roster_id) {
            return Err(DomainError::Forbidden(
                "it is not this roster's turn to pick".to_string(),
            ));
        }
        if Self::player_already_drafted(&mut tx, draft_id, player_id).await? {
            return Err(DomainError::PlayerAlreadyDrafted(player_id.to_string()));
        }

        let weeks_filled = sqlx::query!(
            r#"
            SELECT 1 as "exists!" FROM draft_picks
            WHERE draft_id = $1
              AND (metadata->>'week')::int = $2
              AND (roster_id = $3 OR roster_id = $4)
            "#,
            draft_id,
            week,
            roster_id,
            opponent_roster_id,
        )
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;
        if weeks_filled.is_some() {
            return Err(DomainError::Conflict(format!(
                "week {} is already filled for one of these rosters",
                week
            )));
        }

        let expected_pick_number = draft.current_pick;
        let order = Self::fetch_order(&mut tx, draft_id).await?;
        let roster_count = order.len() as i32;
        let (round, pick_in_round) =
            order_policy::round_and_pick_in_round(expected_pick_number, roster_count)?;

        let mut forward_pick = DraftPick::new(
            draft_id,
            expected_pick_number,
            round,
            pick_in_round,
            roster_id,
            Some(player_id),
            false,
            idempotency_key,
        )?;
        forward_pick.metadata = PickMetadata {
            week: Some(week),
            opponent_roster_id: Some(opponent_roster_id),
        };
        let inserted_forward = Self::insert_pick(&mut tx, &forward_pick).await?;

        let mut reciprocal_pick = DraftPick::new(
            draft_id,
            -expected_pick_number,
            round,
            pick_in_round,
            opponent_roster_id,
            Some(player_id),
            false,
            None,
        )?;
        reciprocal_pick.metadata = PickMetadata {
            week: Some(week),
            opponent_roster_id: Some(roster_id),
        };
        Self::insert_pick(&mut tx, &reciprocal_pick).await?;

        Self::remove_player_from_queues(&mut tx, draft_id, player_id).await?;

        let (final_draft, advance_event) =
            self.advance_past(&mut tx, draft, expected_pick_number, roster_count).await?;
        Self::save_draft(&mut tx, &final_draft).await?;

        let mut events = vec![
            DraftEvent::new(
                draft_id,
                EventType::DraftPick,
                serde_json::json!({
                    "draft_id": draft_id,
                    "pick_number": inserted_forward.pick_number,
                    "roster_id": inserted_forward.roster_id,
                    "player_id": player_id,
                    "week": week,
                    "opponent_roster_id": opponent_roster_id,
                    "is_auto_pick": false,
                }),
            ),
            advance_event,
        ];

        for event in &events {
            Self::insert_event(&mut tx, event).await?;
        }
        tx.commit().await.map_err(DbError::DatabaseError)?;

        events.retain(|_| true);
        Ok(PickOutcome {
            draft: final_draft,
            pick: inserted_forward,
            events,
        })
    }

    async fn undo_last_pick(&self, draft_id: Uuid) -> DomainResult<UndoOutcome> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;
        lock::acquire_draft_lock(&mut tx, self.advisory_lock_namespace, draft_id).await?;

        let draft_db = Self::fetch_draft_for_update(&mut tx, draft_id).await?;
        let mut draft = draft_db.to_domain()?;

        let last_pick = sqlx::query_as!(
            DraftPickDb,
            r#"
            SELECT id, draft_id, pick_number, round, pick_in_round, roster_id, player_id,
                   is_auto_pick, picked_at, idempotency_key, metadata as "metadata: _"
            FROM draft_picks
            WHERE draft_id = $1
            ORDER BY pick_number DESC
            LIMIT 1
            "#,
            draft_id
        )
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?
        .ok_or_else(|| DomainError::InvalidState("no picks exist to undo".to_string()))?
        .to_domain();

        sqlx::query!("DELETE FROM draft_picks WHERE id = $1", last_pick.id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;

        if let Some(selection) = sqlx::query!(
            "SELECT draft_pick_asset_id FROM vet_draft_pick_asset_selections WHERE draft_id = $1 AND pick_number = $2",
            draft_id,
            last_pick.pick_number,
        )
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?
        {
            sqlx::query!(
                "UPDATE pick_assets SET current_owner_roster_id = $2 WHERE id = $1",
                selection.draft_pick_asset_id,
                last_pick.roster_id,
            )
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;

            sqlx::query!(
                "DELETE FROM vet_draft_pick_asset_selections WHERE draft_id = $1 AND pick_number = $2",
                draft_id,
                last_pick.pick_number,
            )
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;
        }

        let order = Self::fetch_order(&mut tx, draft_id).await?;
        let roster_count = order.len() as i32;
        let assets = Self::fetch_pick_assets_for_draft(&mut tx, draft_id).await?;

        let was_completed = draft.status == DraftStatus::Completed;
        let restored_pick_number = last_pick.pick_number.abs();
        let base_roster_id =
            order_policy::base_picker_for_pick(draft.draft_type, restored_pick_number, roster_count, &order)?;
        let actual_roster_id = order_policy::resolve_actual_picker(base_roster_id, last_pick.round, &assets);

        draft.current_pick = restored_pick_number;
        draft.current_round = last_pick.round;
        draft.current_roster_id = Some(actual_roster_id);
        draft.completed_at = None;
        if was_completed {
            // Undoing the final pick reopens a completed draft; it needs a
            // fresh deadline to start accepting picks again.
            draft.status = DraftStatus::InProgress;
            draft.pick_deadline = Some(Utc::now() + chrono::Duration::seconds(draft.pick_time_seconds as i64));
        } else {
            // Any other status (in-progress, paused) is preserved as-is; a
            // paused draft stays paused with no deadline until resumed.
            draft.pick_deadline = None;
        }

        Self::save_draft(&mut tx, &draft).await?;

        let event = DraftEvent::new(
            draft_id,
            EventType::DraftPickUndone,
            serde_json::json!({
                "draft_id": draft_id,
                "pick_number": last_pick.pick_number,
                "roster_id": last_pick.roster_id,
            }),
        );
        Self::insert_event(&mut tx, &event).await?;
        tx.commit().await.map_err(DbError::DatabaseError)?;

        Ok(UndoOutcome {
            draft,
            removed_pick: last_pick,
            events: vec![event],
        })
    }

    async fn start_draft(&self, draft_id: Uuid) -> DomainResult<LifecycleOutcome> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;
        lock::acquire_draft_lock(&mut tx, self.advisory_lock_namespace, draft_id).await?;

        let draft_db = Self::fetch_draft_for_update(&mut tx, draft_id).await?;
        let mut draft = draft_db.to_domain()?;

        if draft.status != DraftStatus::NotStarted {
            return Err(DomainError::InvalidState(format!(
                "draft is {} and cannot be started",
                draft.status
            )));
        }
        if draft.draft_type != domain::models::DraftType::Auction && !draft.order_confirmed {
            return Err(DomainError::InvalidState(
                "draft order must be confirmed before starting".to_string(),
            ));
        }

        let order = Self::fetch_order(&mut tx, draft_id).await?;
        if order.is_empty() {
            return Err(DomainError::InvalidState(
                "at least one roster must be in the draft order".to_string(),
            ));
        }
        let roster_count = order.len() as i32;
        let assets = Self::fetch_pick_assets_for_draft(&mut tx, draft_id).await?;

        let base_roster_id = order_policy::base_picker_for_pick(draft.draft_type, 1, roster_count, &order)?;
        let actual_roster_id = order_policy::resolve_actual_picker(base_roster_id, 1, &assets);

        draft.status = DraftStatus::InProgress;
        draft.current_pick = 1;
        draft.current_round = 1;
        draft.current_roster_id = Some(actual_roster_id);
        draft.pick_deadline = Some(Utc::now() + chrono::Duration::seconds(draft.pick_time_seconds as i64));

        Self::save_draft(&mut tx, &draft).await?;

        let event = DraftEvent::new(draft_id, EventType::DraftStarted, serde_json::json!({ "draft_id": draft_id }));
        Self::insert_event(&mut tx, &event).await?;
        tx.commit().await.map_err(DbError::DatabaseError)?;

        Ok(LifecycleOutcome {
            draft,
            events: vec![event],
        })
    }

    async fn pause_draft(&self, draft_id: Uuid) -> DomainResult<LifecycleOutcome> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;
        lock::acquire_draft_lock(&mut tx, self.advisory_lock_namespace, draft_id).await?;

        let draft_db = Self::fetch_draft_for_update(&mut tx, draft_id).await?;
        let mut draft = draft_db.to_domain()?;

        if draft.status != DraftStatus::InProgress {
            return Err(DomainError::InvalidState(format!(
                "draft is {} and cannot be paused",
                draft.status
            )));
        }

        let remaining_seconds = draft
            .pick_deadline
            .map(|deadline| (deadline - Utc::now()).num_seconds().max(0))
            .unwrap_or(0);
        if let serde_json::Value::Object(ref mut map) = draft.draft_state {
            map.insert("remaining_seconds".to_string(), serde_json::json!(remaining_seconds));
        } else {
            draft.draft_state = serde_json::json!({ "remaining_seconds": remaining_seconds });
        }

        draft.status = DraftStatus::Paused;
        draft.pick_deadline = None;

        Self::save_draft(&mut tx, &draft).await?;

        let event = DraftEvent::new(draft_id, EventType::DraftPaused, serde_json::json!({ "draft_id": draft_id }));
        Self::insert_event(&mut tx, &event).await?;
        tx.commit().await.map_err(DbError::DatabaseError)?;

        Ok(LifecycleOutcome {
            draft,
            events: vec![event],
        })
    }

    async fn resume_draft(&self, draft_id: Uuid) -> DomainResult<LifecycleOutcome> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;
        lock::acquire_draft_lock(&mut tx, self.advisory_lock_namespace, draft_id).await?;

        let draft_db = Self::fetch_draft_for_update(&mut tx, draft_id).await?;
        let mut draft = draft_db.to_domain()?;

        if draft.status != DraftStatus::Paused {
            return Err(DomainError::InvalidState(format!(
                "draft is {} and cannot be resumed",
                draft.status
            )));
        }

        let remaining_seconds = draft
            .draft_state
            .get("remaining_seconds")
            .and_then(|v| v.as_i64())
            .filter(|s| *s > 0)
            .unwrap_or(draft.pick_time_seconds as i64);

        draft.status = DraftStatus::InProgress;
        draft.pick_deadline = Some(Utc::now() + chrono::Duration::seconds(remaining_seconds));

        Self::save_draft(&mut tx, &draft).await?;

        let event = DraftEvent::new(draft_id, EventType::DraftResumed, serde_json::json!({ "draft_id": draft_id }));
        Self::insert_event(&mut tx, &event).await?;
        tx.commit().await.map_err(DbError::DatabaseError)?;

        Ok(LifecycleOutcome {
            draft,
            events: vec![event],
        })
    }

    async fn complete_draft(&self, draft_id: Uuid) -> DomainResult<LifecycleOutcome> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;
        lock::acquire_draft_lock(&mut tx, self.advisory_lock_namespace, draft_id).await?;

        let draft_db = Self::fetch_draft_for_update(&mut tx, draft_id).await?;
        let mut draft = draft_db.to_domain()?;

        if draft.status == DraftStatus::Completed {
            return Err(DomainError::InvalidState("draft is already completed".to_string()));
        }

        draft.status = DraftStatus::Completed;
        draft.current_roster_id = None;
        draft.pick_deadline = None;
        draft.completed_at = Some(Utc::now());

        Self::save_draft(&mut tx, &draft).await?;
        self.apply_completion_side_effects(&mut tx, &draft).await?;

        let event = DraftEvent::new(draft_id, EventType::DraftCompleted, serde_json::json!({ "draft_id": draft_id }));
        Self::insert_event(&mut tx, &event).await?;
        tx.commit().await.map_err(DbError::DatabaseError)?;

        Ok(LifecycleOutcome {
            draft,
            events: vec![event],
        })
    }

    async fn delete_draft(&self, draft_id: Uuid) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;
        lock::acquire_draft_lock(&mut tx, self.advisory_lock_namespace, draft_id).await?;

        let draft_db = Self::fetch_draft_for_update(&mut tx, draft_id).await?;
        let draft = draft_db.to_domain()?;

        if draft.status == DraftStatus::InProgress {
            return Err(DomainError::InvalidState(
                "cannot delete a draft while it is in progress".to_string(),
            ));
        }

        sqlx::query!("DELETE FROM draft_events WHERE draft_id = $1", draft_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;
        sqlx::query!("DELETE FROM queue_entries WHERE draft_id = $1", draft_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;
        sqlx::query!("DELETE FROM chess_clock_entries WHERE draft_id = $1", draft_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;
        sqlx::query!(
            "DELETE FROM vet_draft_pick_asset_selections WHERE draft_id = $1",
            draft_id
        )
        .execute(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;
        sqlx::query!("DELETE FROM draft_picks WHERE draft_id = $1", draft_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;
        sqlx::query!("DELETE FROM draft_order WHERE draft_id = $1", draft_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;
        sqlx::query!("UPDATE pick_assets SET draft_id = NULL WHERE draft_id = $1", draft_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;
        sqlx::query!("DELETE FROM drafts WHERE id = $1", draft_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;

        tx.commit().await.map_err(DbError::DatabaseError)?;
        Ok(())
    }
}

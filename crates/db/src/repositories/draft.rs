use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::{Draft, DraftOrderEntry, DraftStatus};
use domain::repositories::{DraftOrderRepository, DraftRepository};

use crate::errors::DbError;
use crate::models::{DraftDb, DraftOrderEntryDb};

/// SQLx implementation of DraftRepository.
pub struct SqlxDraftRepository {
    pool: PgPool,
}

impl SqlxDraftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftRepository for SqlxDraftRepository {
    async fn create(&self, draft: &Draft) -> DomainResult<Draft> {
        let draft_db = DraftDb::from_domain(draft);

        let result = sqlx::query_as!(
            DraftDb,
            r#"
            INSERT INTO drafts (
                id, league_id, draft_type, status, rounds, pick_time_seconds,
                current_pick, current_round, current_roster_id, pick_deadline,
                scheduled_start, order_confirmed, settings,
                overnight_pause_enabled, overnight_pause_start, overnight_pause_end,
                overnight_pause_timezone, draft_state, completed_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            RETURNING
                id, league_id, draft_type, status, rounds, pick_time_seconds,
                current_pick, current_round, current_roster_id, pick_deadline,
                scheduled_start, order_confirmed, settings as "settings: _",
                overnight_pause_enabled, overnight_pause_start, overnight_pause_end,
                overnight_pause_timezone, draft_state as "draft_state: _",
                completed_at, created_at, updated_at
            "#,
            draft_db.id,
            draft_db.league_id,
            draft_db.draft_type,
            draft_db.status,
            draft_db.rounds,
            draft_db.pick_time_seconds,
            draft_db.current_pick,
            draft_db.current_round,
            draft_db.current_roster_id,
            draft_db.pick_deadline,
            draft_db.scheduled_start,
            draft_db.order_confirmed,
            draft_db.settings as _,
            draft_db.overnight_pause_enabled,
            draft_db.overnight_pause_start,
            draft_db.overnight_pause_end,
            draft_db.overnight_pause_timezone,
            draft_db.draft_state as _,
            draft_db.completed_at,
            draft_db.created_at,
            draft_db.updated_at,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        result.to_domain().map_err(Into::into)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Draft>> {
        let result = sqlx::query_as!(
            DraftDb,
            r#"
            SELECT
                id, league_id, draft_type, status, rounds, pick_time_seconds,
                current_pick, current_round, current_roster_id, pick_deadline,
                scheduled_start, order_confirmed, settings as "settings: _",
                overnight_pause_enabled, overnight_pause_start, overnight_pause_end,
                overnight_pause_timezone, draft_state as "draft_state: _",
                completed_at, created_at, updated_at
            FROM drafts
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        match result {
            Some(draft_db) => Ok(Some(draft_db.to_domain()?)),
            None => Ok(None),
        }
    }

    async fn find_by_id_for_update(&self, id: Uuid) -> DomainResult<Option<Draft>> {
        let result = sqlx::query_as!(
            DraftDb,
            r#"
            SELECT
                id, league_id, draft_type, status, rounds, pick_time_seconds,
                current_pick, current_round, current_roster_id, pick_deadline,
                scheduled_start, order_confirmed, settings as "settings: _",
                overnight_pause_enabled, overnight_pause_start, overnight_pause_end,
                overnight_pause_timezone, draft_state as "draft_state: _",
                completed_at, created_at, updated_at
            FROM drafts
            WHERE id = $1
            FOR UPDATE
            "#,
            id
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        match result {
            Some(draft_db) => Ok(Some(draft_db.to_domain()?)),
            None => Ok(None),
        }
    }

    async fn find_by_league_id(&self, league_id: Uuid) -> DomainResult<Vec<Draft>> {
        let results = sqlx::query_as!(
            DraftDb,
            r#"
            SELECT
                id, league_id, draft_type, status, rounds, pick_time_seconds,
                current_pick, current_round, current_roster_id, pick_deadline,
                scheduled_start, order_confirmed, settings as "settings: _",
                overnight_pause_enabled, overnight_pause_start, overnight_pause_end,
                overnight_pause_timezone, draft_state as "draft_state: _",
                completed_at, created_at, updated_at
            FROM drafts
            WHERE league_id = $1
            ORDER BY created_at DESC
            "#,
            league_id
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        results
            .into_iter()
            .map(|db| db.to_domain())
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    async fn find_by_status(&self, status: DraftStatus) -> DomainResult<Vec<Draft>> {
        let status_str = status.to_string();
        let results = sqlx::query_as!(
            DraftDb,
            r#"
            SELECT
                id, league_id, draft_type, status, rounds, pick_time_seconds,
                current_pick, current_round, current_roster_id, pick_deadline,
                scheduled_start, order_confirmed, settings as "settings: _",
                overnight_pause_enabled, overnight_pause_start, overnight_pause_end,
                overnight_pause_timezone, draft_state as "draft_state: _",
                completed_at, created_at, updated_at
            FROM drafts
            WHERE status = $1
            ORDER BY created_at DESC
            "#,
            status_str
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        results
            .into_iter()
            .map(|db| db.to_domain())
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    async fn find_in_progress(&self) -> DomainResult<Vec<Draft>> {
        self.find_by_status(DraftStatus::InProgress).await
    }

    async fn update(&self, draft: &Draft) -> DomainResult<Draft> {
        let draft_db = DraftDb::from_domain(draft);

        let result = sqlx::query_as!(
            DraftDb,
            r#"
            UPDATE drafts
            SET status = $2, current_pick = $3, current_round = $4,
                current_roster_id = $5, pick_deadline = $6, order_confirmed = $7,
                settings = $8, overnight_pause_enabled = $9,
                overnight_pause_start = $10, overnight_pause_end = $11,
                overnight_pause_timezone = $12, draft_state = $13,
                completed_at = $14, updated_at = $15
            WHERE id = $1
            RETURNING
                id, league_id, draft_type, status, rounds, pick_time_seconds,
                current_pick, current_round, current_roster_id, pick_deadline,
                scheduled_start, order_confirmed, settings as "settings: _",
                overnight_pause_enabled, overnight_pause_start, overnight_pause_end,
                overnight_pause_timezone, draft_state as "draft_state: _",
                completed_at, created_at, updated_at
            "#,
            draft_db.id,
            draft_db.status,
            draft_db.current_pick,
            draft_db.current_round,
            draft_db.current_roster_id,
            draft_db.pick_deadline,
            draft_db.order_confirmed,
            draft_db.settings as _,
            draft_db.overnight_pause_enabled,
            draft_db.overnight_pause_start,
            draft_db.overnight_pause_end,
            draft_db.overnight_pause_timezone,
            draft_db.draft_state as _,
            draft_db.completed_at,
            draft_db.updated_at,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?
        .ok_or_else(|| DbError::NotFound(format!("Draft with id {} not found", draft_db.id)))?;

        result.to_domain().map_err(Into::into)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query!("DELETE FROM drafts WHERE id = $1", id)
            .execute(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("Draft with id {} not found", id)).into());
        }

        Ok(())
    }
}

/// SQLx implementation of DraftOrderRepository.
pub struct SqlxDraftOrderRepository {
    pool: PgPool,
}

impl SqlxDraftOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftOrderRepository for SqlxDraftOrderRepository {
    async fn set_order(&self, entries: &[DraftOrderEntry]) -> DomainResult<Vec<DraftOrderEntry>> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;

        if let Some(first) = entries.first() {
            sqlx::query!("DELETE FROM draft_order WHERE draft_id = $1", first.draft_id)
                .execute(&mut *tx)
                .await
                .map_err(DbError::DatabaseError)?;
        }

        let mut saved = Vec::with_capacity(entries.len());
        for entry in entries {
            let entry_db = DraftOrderEntryDb::from_domain(entry);
            let result = sqlx::query_as!(
                DraftOrderEntryDb,
                r#"
                INSERT INTO draft_order (draft_id, roster_id, draft_position, is_autodraft_enabled)
                VALUES ($1, $2, $3, $4)
                RETURNING draft_id, roster_id, draft_position, is_autodraft_enabled
                "#,
                entry_db.draft_id,
                entry_db.roster_id,
                entry_db.draft_position,
                entry_db.is_autodraft_enabled,
            )
            .fetch_one(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;
            saved.push(result.to_domain());
        }

        tx.commit().await.map_err(DbError::DatabaseError)?;
        Ok(saved)
    }

    async fn find_by_draft_id(&self, draft_id: Uuid) -> DomainResult<Vec<DraftOrderEntry>> {
        let results = sqlx::query_as!(
            DraftOrderEntryDb,
            r#"
            SELECT draft_id, roster_id, draft_position, is_autodraft_enabled
            FROM draft_order
            WHERE draft_id = $1
            ORDER BY draft_position ASC
            "#,
            draft_id
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(results.into_iter().map(|db| db.to_domain()).collect())
    }

    async fn find_by_draft_and_roster(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
    ) -> DomainResult<Option<DraftOrderEntry>> {
        let result = sqlx::query_as!(
            DraftOrderEntryDb,
            r#"
            SELECT draft_id, roster_id, draft_position, is_autodraft_enabled
            FROM draft_order
            WHERE draft_id = $1 AND roster_id = $2
            "#,
            draft_id,
            roster_id
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(result.map(|db| db.to_domain()))
    }

    async fn set_autodraft_enabled(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        enabled: bool,
    ) -> DomainResult<DraftOrderEntry> {
        let result = sqlx::query_as!(
            DraftOrderEntryDb,
            r#"
            UPDATE draft_order
            SET is_autodraft_enabled = $3
            WHERE draft_id = $1 AND roster_id = $2
            RETURNING draft_id, roster_id, draft_position, is_autodraft_enabled
            "#,
            draft_id,
            roster_id,
            enabled
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?
        .ok_or_else(|| {
            DbError::NotFound(format!(
                "No draft order entry for draft {} roster {}",
                draft_id, roster_id
            ))
        })?;

        Ok(result.to_domain())
    }

    async fn delete_by_draft_id(&self, draft_id: Uuid) -> DomainResult<()> {
        sqlx::query!("DELETE FROM draft_order WHERE draft_id = $1", draft_id)
            .execute(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::get_test_pool;
    use domain::models::DraftType;

    async fn cleanup(pool: &PgPool) {
        sqlx::query!("DELETE FROM draft_order").execute(pool).await.ok();
        sqlx::query!("DELETE FROM drafts").execute(pool).await.ok();
    }

    #[tokio::test]
    async fn test_create_and_find_draft() {
        let pool = get_test_pool().await;
        cleanup(&pool).await;

        let repo = SqlxDraftRepository::new(pool.clone());
        let draft = Draft::new(Uuid::new_v4(), DraftType::Snake, 15, 90).unwrap();

        let created = repo.create(&draft).await.unwrap();
        assert_eq!(created.status, DraftStatus::NotStarted);

        let found = repo.find_by_id(created.id).await.unwrap();
        assert!(found.is_some());

        cleanup(&pool).await;
    }

    #[tokio::test]
    async fn test_set_and_fetch_order() {
        let pool = get_test_pool().await;
        cleanup(&pool).await;

        let draft_repo = SqlxDraftRepository::new(pool.clone());
        let draft = Draft::new(Uuid::new_v4(), DraftType::Snake, 15, 90).unwrap();
        let created_draft = draft_repo.create(&draft).await.unwrap();

        let order_repo = SqlxDraftOrderRepository::new(pool.clone());
        let entries = vec![
            DraftOrderEntry::new(created_draft.id, Uuid::new_v4(), 1).unwrap(),
            DraftOrderEntry::new(created_draft.id, Uuid::new_v4(), 2).unwrap(),
        ];

        let saved = order_repo.set_order(&entries).await.unwrap();
        assert_eq!(saved.len(), 2);

        let fetched = order_repo.find_by_draft_id(created_draft.id).await.unwrap();
        assert_eq!(fetched.len(), 2);

        cleanup(&pool).await;
    }
}

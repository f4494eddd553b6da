use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::DraftEvent;
use domain::repositories::DraftEventRepository;

use crate::errors::DbError;
use crate::models::DraftEventDb;

/// SQLx implementation of the persisted draft event audit log.
pub struct SqlxDraftEventRepository {
    pool: PgPool,
}

impl SqlxDraftEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftEventRepository for SqlxDraftEventRepository {
    async fn append(&self, event: &DraftEvent) -> DomainResult<DraftEvent> {
        let db_event = DraftEventDb::from_domain(event);

        let row = sqlx::query_as!(
            DraftEventDb,
            r#"
            INSERT INTO draft_events (id, draft_id, event_type, payload, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, draft_id, event_type, payload as "payload: _", created_at
            "#,
            db_event.id,
            db_event.draft_id,
            db_event.event_type,
            db_event.payload as _,
            db_event.created_at,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.to_domain()?)
    }

    async fn find_by_draft_id(&self, draft_id: Uuid) -> DomainResult<Vec<DraftEvent>> {
        let rows = sqlx::query_as!(
            DraftEventDb,
            r#"
            SELECT id, draft_id, event_type, payload as "payload: _", created_at
            FROM draft_events
            WHERE draft_id = $1
            ORDER BY created_at ASC
            "#,
            draft_id
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        rows.into_iter()
            .map(|db| db.to_domain().map_err(Into::into))
            .collect()
    }

    async fn find_since(&self, draft_id: Uuid, after: Uuid) -> DomainResult<Vec<DraftEvent>> {
        let rows = sqlx::query_as!(
            DraftEventDb,
            r#"
            SELECT id, draft_id, event_type, payload as "payload: _", created_at
            FROM draft_events
            WHERE draft_id = $1
              AND created_at > (SELECT created_at FROM draft_events WHERE id = $2)
            ORDER BY created_at ASC
            "#,
            draft_id,
            after
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        rows.into_iter()
            .map(|db| db.to_domain().map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::get_test_pool;
    use domain::models::EventType;

    async fn cleanup(pool: &PgPool) {
        sqlx::query!("DELETE FROM draft_events").execute(pool).await.ok();
        sqlx::query!("DELETE FROM drafts").execute(pool).await.ok();
        sqlx::query!("DELETE FROM leagues").execute(pool).await.ok();
    }

    #[tokio::test]
    async fn test_append_and_find_by_draft() {
        let pool = get_test_pool().await;
        cleanup(&pool).await;

        let league_id = Uuid::new_v4();
        sqlx::query!(
            "INSERT INTO leagues (id, name) VALUES ($1, 'Test League')",
            league_id
        )
        .execute(&pool)
        .await
        .unwrap();

        let draft_id = Uuid::new_v4();
        sqlx::query!(
            r#"INSERT INTO drafts (id, league_id, draft_type, status, rounds, pick_time_seconds, current_pick, current_round, order_confirmed, settings, overnight_pause_enabled, overnight_pause_start, overnight_pause_end, overnight_pause_timezone, draft_state)
            VALUES ($1, $2, 'snake', 'not_started', 15, 90, 1, 1, false, '{}', false, '22:00:00', '08:00:00', 'UTC', '{}')"#,
            draft_id,
            league_id
        )
        .execute(&pool)
        .await
        .unwrap();

        let repo = SqlxDraftEventRepository::new(pool.clone());
        let event = DraftEvent::new(draft_id, EventType::DraftStarted, serde_json::json!({}));
        let appended = repo.append(&event).await.unwrap();
        assert_eq!(appended.draft_id, draft_id);

        let events = repo.find_by_draft_id(draft_id).await.unwrap();
        assert_eq!(events.len(), 1);

        cleanup(&pool).await;
    }
}

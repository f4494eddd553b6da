use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::QueueEntry;
use domain::repositories::QueueRepository;

use crate::errors::DbError;
use crate::models::QueueEntryDb;

pub struct SqlxQueueRepository {
    pool: PgPool,
}

impl SqlxQueueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueRepository for SqlxQueueRepository {
    async fn upsert(&self, entry: &QueueEntry) -> DomainResult<QueueEntry> {
        let db = QueueEntryDb::from_domain(entry);

        let row = sqlx::query_as!(
            QueueEntryDb,
            r#"
            INSERT INTO queue_entries
                (id, draft_id, roster_id, target_type, target_player_id, target_pick_asset_id, queue_position)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET target_type = EXCLUDED.target_type,
                target_player_id = EXCLUDED.target_player_id,
                target_pick_asset_id = EXCLUDED.target_pick_asset_id,
                queue_position = EXCLUDED.queue_position
            RETURNING id, draft_id, roster_id, target_type, target_player_id, target_pick_asset_id, queue_position
            "#,
            db.id,
            db.draft_id,
            db.roster_id,
            db.target_type,
            db.target_player_id,
            db.target_pick_asset_id,
            db.queue_position,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.to_domain()?)
    }

    async fn find_by_draft_and_roster(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
    ) -> DomainResult<Vec<QueueEntry>> {
        let rows = sqlx::query_as!(
            QueueEntryDb,
            r#"
            SELECT id, draft_id, roster_id, target_type, target_player_id, target_pick_asset_id, queue_position
            FROM queue_entries
            WHERE draft_id = $1 AND roster_id = $2
            ORDER BY queue_position ASC
            "#,
            draft_id,
            roster_id
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        rows.into_iter()
            .map(|db| db.to_domain().map_err(Into::into))
            .collect()
    }

    async fn remove(&self, id: Uuid) -> DomainResult<()> {
        sqlx::query!("DELETE FROM queue_entries WHERE id = $1", id)
            .execute(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        Ok(())
    }

    async fn pop_front(&self, draft_id: Uuid, roster_id: Uuid) -> DomainResult<Option<QueueEntry>> {
        let row = sqlx::query_as!(
            QueueEntryDb,
            r#"
            DELETE FROM queue_entries
            WHERE id = (
                SELECT id FROM queue_entries
                WHERE draft_id = $1 AND roster_id = $2
                ORDER BY queue_position ASC
                LIMIT 1
            )
            RETURNING id, draft_id, roster_id, target_type, target_player_id, target_pick_asset_id, queue_position
            "#,
            draft_id,
            roster_id
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        match row {
            Some(r) => Ok(Some(r.to_domain()?)),
            None => Ok(None),
        }
    }

    async fn reorder(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        ordered_ids: &[Uuid],
    ) -> DomainResult<Vec<QueueEntry>> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;

        for (position, id) in ordered_ids.iter().enumerate() {
            sqlx::query!(
                "UPDATE queue_entries SET queue_position = $1 WHERE id = $2 AND draft_id = $3 AND roster_id = $4",
                position as i32,
                id,
                draft_id,
                roster_id
            )
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;
        }

        let rows = sqlx::query_as!(
            QueueEntryDb,
            r#"
            SELECT id, draft_id, roster_id, target_type, target_player_id, target_pick_asset_id, queue_position
            FROM queue_entries
            WHERE draft_id = $1 AND roster_id = $2
            ORDER BY queue_position ASC
            "#,
            draft_id,
            roster_id
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        tx.commit().await.map_err(DbError::DatabaseError)?;

        rows.into_iter()
            .map(|db| db.to_domain().map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::get_test_pool;

    #[tokio::test]
    async fn test_find_by_draft_and_roster_empty() {
        let pool = get_test_pool().await;
        let repo = SqlxQueueRepository::new(pool);
        let entries = repo
            .find_by_draft_and_roster(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();
        assert!(entries.is_empty());
    }
}

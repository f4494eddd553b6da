use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::ChessClockEntry;
use domain::repositories::ChessClockRepository;

use crate::errors::DbError;
use crate::models::ChessClockEntryDb;

pub struct SqlxChessClockRepository {
    pool: PgPool,
}

impl SqlxChessClockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChessClockRepository for SqlxChessClockRepository {
    async fn find_by_draft_id(&self, draft_id: Uuid) -> DomainResult<Vec<ChessClockEntry>> {
        let rows = sqlx::query_as!(
            ChessClockEntryDb,
            r#"
            SELECT draft_id, roster_id, remaining_seconds
            FROM chess_clock_entries
            WHERE draft_id = $1
            "#,
            draft_id
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn find_by_draft_and_roster(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
    ) -> DomainResult<Option<ChessClockEntry>> {
        let row = sqlx::query_as!(
            ChessClockEntryDb,
            r#"
            SELECT draft_id, roster_id, remaining_seconds
            FROM chess_clock_entries
            WHERE draft_id = $1 AND roster_id = $2
            "#,
            draft_id,
            roster_id
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.map(|r| r.to_domain()))
    }

    async fn upsert(&self, entry: &ChessClockEntry) -> DomainResult<ChessClockEntry> {
        let db = ChessClockEntryDb::from_domain(entry);

        let row = sqlx::query_as!(
            ChessClockEntryDb,
            r#"
            INSERT INTO chess_clock_entries (draft_id, roster_id, remaining_seconds)
            VALUES ($1, $2, $3)
            ON CONFLICT (draft_id, roster_id) DO UPDATE
            SET remaining_seconds = EXCLUDED.remaining_seconds
            RETURNING draft_id, roster_id, remaining_seconds
            "#,
            db.draft_id,
            db.roster_id,
            db.remaining_seconds,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.to_domain())
    }

    async fn initialize_all(
        &self,
        draft_id: Uuid,
        roster_ids: &[Uuid],
        total_seconds: i32,
    ) -> DomainResult<Vec<ChessClockEntry>> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;

        for roster_id in roster_ids {
            sqlx::query!(
                r#"
                INSERT INTO chess_clock_entries (draft_id, roster_id, remaining_seconds)
                VALUES ($1, $2, $3)
                ON CONFLICT (draft_id, roster_id) DO UPDATE
                SET remaining_seconds = EXCLUDED.remaining_seconds
                "#,
                draft_id,
                roster_id,
                total_seconds,
            )
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;
        }

        let rows = sqlx::query_as!(
            ChessClockEntryDb,
            r#"
            SELECT draft_id, roster_id, remaining_seconds
            FROM chess_clock_entries
            WHERE draft_id = $1
            "#,
            draft_id
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        tx.commit().await.map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::get_test_pool;

    #[tokio::test]
    async fn test_find_by_draft_and_roster_missing() {
        let pool = get_test_pool().await;
        let repo = SqlxChessClockRepository::new(pool);
        let found = repo
            .find_by_draft_and_roster(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();
        assert!(found.is_none());
    }
}

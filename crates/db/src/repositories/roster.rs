use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::Roster;
use domain::repositories::RosterRepository;

use crate::errors::DbError;
use crate::models::RosterDb;

/// Read-only access to roster rows owned by a league-management collaborator.
pub struct SqlxRosterRepository {
    pool: PgPool,
}

impl SqlxRosterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RosterRepository for SqlxRosterRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Roster>> {
        let row = sqlx::query_as!(
            RosterDb,
            r#"
            SELECT id, league_id, display_name, owner_user_id, created_at
            FROM rosters
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.map(|r| r.to_domain()))
    }

    async fn find_by_league_id(&self, league_id: Uuid) -> DomainResult<Vec<Roster>> {
        let rows = sqlx::query_as!(
            RosterDb,
            r#"
            SELECT id, league_id, display_name, owner_user_id, created_at
            FROM rosters
            WHERE league_id = $1
            ORDER BY display_name ASC
            "#,
            league_id
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::get_test_pool;

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let pool = get_test_pool().await;
        let repo = SqlxRosterRepository::new(pool);
        let found = repo.find_by_id(Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }
}

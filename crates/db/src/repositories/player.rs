use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::{Player, PlayerPool};
use domain::repositories::PlayerRepository;

use crate::errors::DbError;
use crate::models::PlayerDb;

/// SQLx implementation of PlayerRepository.
pub struct SqlxPlayerRepository {
    pool: PgPool,
}

impl SqlxPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for SqlxPlayerRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Player>> {
        let result = sqlx::query_as!(
            PlayerDb,
            r#"
            SELECT id, display_name, position, nfl_team, pool, years_exp, adp, active
            FROM players
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        match result {
            Some(player_db) => Ok(Some(player_db.to_domain()?)),
            None => Ok(None),
        }
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Player>> {
        let results = sqlx::query_as!(
            PlayerDb,
            r#"
            SELECT id, display_name, position, nfl_team, pool, years_exp, adp, active
            FROM players
            WHERE id = ANY($1)
            "#,
            ids
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        results
            .into_iter()
            .map(|db| db.to_domain().map_err(Into::into))
            .collect()
    }

    async fn find_available(
        &self,
        draft_id: Uuid,
        pools: &[PlayerPool],
    ) -> DomainResult<Vec<Player>> {
        let pool_strs: Vec<String> = pools
            .iter()
            .map(crate::models::player::pool_to_string)
            .collect();

        let results = sqlx::query_as!(
            PlayerDb,
            r#"
            SELECT p.id, p.display_name, p.position, p.nfl_team, p.pool, p.years_exp, p.adp, p.active
            FROM players p
            WHERE p.active
              AND p.pool = ANY($1)
              AND NOT EXISTS (
                  SELECT 1 FROM draft_picks dp
                  WHERE dp.draft_id = $2 AND dp.player_id = p.id
              )
            ORDER BY p.adp ASC NULLS LAST
            "#,
            &pool_strs,
            draft_id
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        results
            .into_iter()
            .map(|db| db.to_domain().map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::get_test_pool;

    async fn cleanup(pool: &PgPool) {
        sqlx::query!("DELETE FROM players").execute(pool).await.ok();
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let pool = get_test_pool().await;
        let repo = SqlxPlayerRepository::new(pool.clone());
        let found = repo.find_by_id(Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
        cleanup(&pool).await;
    }
}

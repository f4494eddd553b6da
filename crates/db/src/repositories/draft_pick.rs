use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::{DraftPick, PickAsset, VetDraftPickAssetSelection};
use domain::repositories::{DraftPickRepository, PickAssetRepository, VetPickSelectionRepository};

use crate::errors::DbError;
use crate::models::{DraftPickDb, PickAssetDb, VetDraftPickAssetSelectionDb};

pub struct SqlxDraftPickRepository {
    pool: PgPool,
}

impl SqlxDraftPickRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftPickRepository for SqlxDraftPickRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<DraftPick>> {
        let row = sqlx::query_as!(
            DraftPickDb,
            r#"
            SELECT id, draft_id, pick_number, round, pick_in_round, roster_id, player_id,
                   is_auto_pick, picked_at, idempotency_key, metadata as "metadata: _"
            FROM draft_picks
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.map(|r| r.to_domain()))
    }

    async fn find_by_draft_id(&self, draft_id: Uuid) -> DomainResult<Vec<DraftPick>> {
        let rows = sqlx::query_as!(
            DraftPickDb,
            r#"
            SELECT id, draft_id, pick_number, round, pick_in_round, roster_id, player_id,
                   is_auto_pick, picked_at, idempotency_key, metadata as "metadata: _"
            FROM draft_picks
            WHERE draft_id = $1
            ORDER BY pick_number ASC
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
    ) -> DomainResult<Vec<DraftPick>> {
        let rows = sqlx::query_as!(
            DraftPickDb,
            r#"
            SELECT id, draft_id, pick_number, round, pick_in_round, roster_id, player_id,
                   is_auto_pick, picked_at, idempotency_key, metadata as "metadata: _"
            FROM draft_picks
            WHERE draft_id = $1 AND roster_id = $2
            ORDER BY pick_number ASC
            "#,
            draft_id,
            roster_id
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn find_by_pick_number(
        &self,
        draft_id: Uuid,
        pick_number: i32,
    ) -> DomainResult<Option<DraftPick>> {
        let row = sqlx::query_as!(
            DraftPickDb,
            r#"
            SELECT id, draft_id, pick_number, round, pick_in_round, roster_id, player_id,
                   is_auto_pick, picked_at, idempotency_key, metadata as "metadata: _"
            FROM draft_picks
            WHERE draft_id = $1 AND pick_number = $2
            "#,
            draft_id,
            pick_number
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.map(|r| r.to_domain()))
    }

    async fn find_unfilled(&self, draft_id: Uuid) -> DomainResult<Vec<DraftPick>> {
        let rows = sqlx::query_as!(
            DraftPickDb,
            r#"
            SELECT id, draft_id, pick_number, round, pick_in_round, roster_id, player_id,
                   is_auto_pick, picked_at, idempotency_key, metadata as "metadata: _"
            FROM draft_picks
            WHERE draft_id = $1 AND player_id IS NULL
            ORDER BY pick_number ASC
            "#,
            draft_id
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn find_by_idempotency_key(
        &self,
        draft_id: Uuid,
        roster_id: Uuid,
        idempotency_key: &str,
    ) -> DomainResult<Option<DraftPick>> {
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
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.map(|r| r.to_domain()))
    }
}

pub struct SqlxPickAssetRepository {
    pool: PgPool,
}

impl SqlxPickAssetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PickAssetRepository for SqlxPickAssetRepository {
    async fn create(&self, asset: &PickAsset) -> DomainResult<PickAsset> {
        let db = PickAssetDb::from_domain(asset);

        let row = sqlx::query_as!(
            PickAssetDb,
            r#"
            INSERT INTO pick_assets (id, league_id, draft_id, season, round, original_roster_id,
                                      current_owner_roster_id, original_pick_position)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, league_id, draft_id, season, round, original_roster_id,
                      current_owner_roster_id, original_pick_position
            "#,
            db.id,
            db.league_id,
            db.draft_id,
            db.season,
            db.round,
            db.original_roster_id,
            db.current_owner_roster_id,
            db.original_pick_position,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.to_domain())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<PickAsset>> {
        let row = sqlx::query_as!(
            PickAssetDb,
            r#"
            SELECT id, league_id, draft_id, season, round, original_roster_id,
                   current_owner_roster_id, original_pick_position
            FROM pick_assets
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.map(|r| r.to_domain()))
    }

    async fn find_by_league_and_season(
        &self,
        league_id: Uuid,
        season: i32,
    ) -> DomainResult<Vec<PickAsset>> {
        let rows = sqlx::query_as!(
            PickAssetDb,
            r#"
            SELECT id, league_id, draft_id, season, round, original_roster_id,
                   current_owner_roster_id, original_pick_position
            FROM pick_assets
            WHERE league_id = $1 AND season = $2
            ORDER BY round ASC
            "#,
            league_id,
            season
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn find_by_current_owner(
        &self,
        league_id: Uuid,
        roster_id: Uuid,
    ) -> DomainResult<Vec<PickAsset>> {
        let rows = sqlx::query_as!(
            PickAssetDb,
            r#"
            SELECT id, league_id, draft_id, season, round, original_roster_id,
                   current_owner_roster_id, original_pick_position
            FROM pick_assets
            WHERE league_id = $1 AND current_owner_roster_id = $2
            ORDER BY season ASC, round ASC
            "#,
            league_id,
            roster_id
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn update(&self, asset: &PickAsset) -> DomainResult<PickAsset> {
        let db = PickAssetDb::from_domain(asset);

        let row = sqlx::query_as!(
            PickAssetDb,
            r#"
            UPDATE pick_assets
            SET draft_id = $2, current_owner_roster_id = $3, original_pick_position = $4
            WHERE id = $1
            RETURNING id, league_id, draft_id, season, round, original_roster_id,
                      current_owner_roster_id, original_pick_position
            "#,
            db.id,
            db.draft_id,
            db.current_owner_roster_id,
            db.original_pick_position,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?
        .ok_or_else(|| DbError::NotFound(format!("Pick asset {} not found", asset.id)))?;

        Ok(row.to_domain())
    }
}

pub struct SqlxVetPickSelectionRepository {
    pool: PgPool,
}

impl SqlxVetPickSelectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VetPickSelectionRepository for SqlxVetPickSelectionRepository {
    async fn create(
        &self,
        selection: &VetDraftPickAssetSelection,
    ) -> DomainResult<VetDraftPickAssetSelection> {
        let db = VetDraftPickAssetSelectionDb::from_domain(selection);

        let row = sqlx::query_as!(
            VetDraftPickAssetSelectionDb,
            r#"
            INSERT INTO vet_draft_pick_asset_selections
                (id, draft_id, pick_number, draft_pick_asset_id, roster_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, draft_id, pick_number, draft_pick_asset_id, roster_id
            "#,
            db.id,
            db.draft_id,
            db.pick_number,
            db.draft_pick_asset_id,
            db.roster_id,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.to_domain())
    }

    async fn find_by_draft_id(
        &self,
        draft_id: Uuid,
    ) -> DomainResult<Vec<VetDraftPickAssetSelection>> {
        let rows = sqlx::query_as!(
            VetDraftPickAssetSelectionDb,
            r#"
            SELECT id, draft_id, pick_number, draft_pick_asset_id, roster_id
            FROM vet_draft_pick_asset_selections
            WHERE draft_id = $1
            ORDER BY pick_number ASC
            "#,
            draft_id
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn find_by_pick_number(
        &self,
        draft_id: Uuid,
        pick_number: i32,
    ) -> DomainResult<Option<VetDraftPickAssetSelection>> {
        let row = sqlx::query_as!(
            VetDraftPickAssetSelectionDb,
            r#"
            SELECT id, draft_id, pick_number, draft_pick_asset_id, roster_id
            FROM vet_draft_pick_asset_selections
            WHERE draft_id = $1 AND pick_number = $2
            "#,
            draft_id,
            pick_number
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.map(|r| r.to_domain()))
    }

    async fn delete_by_pick_number(&self, draft_id: Uuid, pick_number: i32) -> DomainResult<()> {
        sqlx::query!(
            "DELETE FROM vet_draft_pick_asset_selections WHERE draft_id = $1 AND pick_number = $2",
            draft_id,
            pick_number
        )
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

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let pool = get_test_pool().await;
        let repo = SqlxDraftPickRepository::new(pool);
        let found = repo.find_by_id(Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }
}

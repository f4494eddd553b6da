use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::{Player, PlayerPool};

/// Repository trait for Player data access. Player rows themselves are
/// owned by a player-data collaborator; this crate only reads them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Player>>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Player>>;

    /// All players eligible for at least one of the given pools, ordered by
    /// ADP ascending (best available first), excluding any already drafted
    /// in `draft_id`.
    async fn find_available(
        &self,
        draft_id: Uuid,
        pools: &[PlayerPool],
    ) -> DomainResult<Vec<Player>>;
}

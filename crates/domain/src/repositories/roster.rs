use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::Roster;

/// Repository trait for Roster data access. Roster rows themselves are
/// owned by a league-management collaborator; this crate only reads them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Roster>>;

    async fn find_by_league_id(&self, league_id: Uuid) -> DomainResult<Vec<Roster>>;
}

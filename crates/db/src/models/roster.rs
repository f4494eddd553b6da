use chrono::{DateTime, Utc};
use uuid::Uuid;

use domain::models::Roster;

/// Database row for the `rosters` table. Owned by a league-management
/// collaborator; this crate only reads it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RosterDb {
    pub id: Uuid,
    pub league_id: Uuid,
    pub display_name: String,
    pub owner_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl RosterDb {
    pub fn to_domain(&self) -> Roster {
        Roster {
            id: self.id,
            league_id: self.league_id,
            display_name: self.display_name.clone(),
            owner_user_id: self.owner_user_id,
            created_at: self.created_at,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// The draft engine's view of a league franchise. Ownership, invites and
/// rostering rules proper belong to a league-management collaborator; this
/// crate only needs identity and whether a user currently owns the slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub id: Uuid,
    pub league_id: Uuid,
    pub display_name: String,
    pub owner_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Roster {
    pub fn new(league_id: Uuid, display_name: String) -> DomainResult<Self> {
        if display_name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Roster display name cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            league_id,
            display_name,
            owner_user_id: None,
            created_at: Utc::now(),
        })
    }

    pub fn is_unowned(&self) -> bool {
        self.owner_user_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_roster_is_unowned() {
        let roster = Roster::new(Uuid::new_v4(), "Team Chaos".to_string()).unwrap();
        assert!(roster.is_unowned());
    }

    #[test]
    fn test_empty_display_name_rejected() {
        assert!(Roster::new(Uuid::new_v4(), "  ".to_string()).is_err());
    }
}

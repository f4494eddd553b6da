use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Extra metadata for a pick that isn't a plain player selection, e.g. the
/// opposing roster and week for a matchups-mode draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PickMetadata {
    pub week: Option<i32>,
    pub opponent_roster_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPick {
    pub id: Uuid,
    pub draft_id: Uuid,
    /// Positive for forward picks; negative for the reciprocal half of a
    /// matchups pick, which does not advance the draft's pick counter.
    pub pick_number: i32,
    pub round: i32,
    pub pick_in_round: i32,
    pub roster_id: Uuid,
    pub player_id: Option<Uuid>,
    pub is_auto_pick: bool,
    pub picked_at: DateTime<Utc>,
    pub idempotency_key: Option<String>,
    pub metadata: PickMetadata,
}

impl DraftPick {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        draft_id: Uuid,
        pick_number: i32,
        round: i32,
        pick_in_round: i32,
        roster_id: Uuid,
        player_id: Option<Uuid>,
        is_auto_pick: bool,
        idempotency_key: Option<String>,
    ) -> DomainResult<Self> {
        if round < 1 {
            return Err(DomainError::ValidationError(
                "Round must be greater than 0".to_string(),
            ));
        }
        if pick_in_round < 1 {
            return Err(DomainError::ValidationError(
                "Pick in round must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            draft_id,
            pick_number,
            round,
            pick_in_round,
            roster_id,
            player_id,
            is_auto_pick,
            picked_at: Utc::now(),
            idempotency_key,
            metadata: PickMetadata::default(),
        })
    }

    pub fn is_reciprocal(&self) -> bool {
        self.pick_number < 0
    }

    pub fn is_player_pick(&self) -> bool {
        self.player_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_pick() {
        let draft_id = Uuid::new_v4();
        let roster_id = Uuid::new_v4();
        let player_id = Uuid::new_v4();

        let pick = DraftPick::new(draft_id, 1, 1, 1, roster_id, Some(player_id), false, None).unwrap();
        assert_eq!(pick.draft_id, draft_id);
        assert_eq!(pick.player_id, Some(player_id));
        assert!(!pick.is_reciprocal());
        assert!(pick.is_player_pick());
    }

    #[test]
    fn test_reciprocal_pick_has_negative_number() {
        let pick = DraftPick::new(Uuid::new_v4(), -4, 2, 2, Uuid::new_v4(), None, false, None).unwrap();
        assert!(pick.is_reciprocal());
        assert!(!pick.is_player_pick());
    }

    #[test]
    fn test_invalid_round_rejected() {
        assert!(DraftPick::new(Uuid::new_v4(), 1, 0, 1, Uuid::new_v4(), None, false, None).is_err());
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// A tradeable representation of a future or current-draft pick slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickAsset {
    pub id: Uuid,
    pub league_id: Uuid,
    pub draft_id: Option<Uuid>,
    pub season: i32,
    pub round: i32,
    pub original_roster_id: Uuid,
    pub current_owner_roster_id: Uuid,
    pub original_pick_position: Option<i32>,
}

impl PickAsset {
    pub fn new(league_id: Uuid, season: i32, round: i32, original_roster_id: Uuid) -> DomainResult<Self> {
        if round < 1 {
            return Err(DomainError::ValidationError(
                "Round must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            league_id,
            draft_id: None,
            season,
            round,
            original_roster_id,
            current_owner_roster_id: original_roster_id,
            original_pick_position: None,
        })
    }

    pub fn is_traded(&self) -> bool {
        self.current_owner_roster_id != self.original_roster_id
    }

    pub fn reassign(&mut self, new_owner_roster_id: Uuid) {
        self.current_owner_roster_id = new_owner_roster_id;
    }
}

/// Recorded when a veteran draft's slot is spent on a rookie pick asset
/// instead of a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VetDraftPickAssetSelection {
    pub id: Uuid,
    pub draft_id: Uuid,
    pub pick_number: i32,
    pub draft_pick_asset_id: Uuid,
    pub roster_id: Uuid,
}

impl VetDraftPickAssetSelection {
    pub fn new(draft_id: Uuid, pick_number: i32, draft_pick_asset_id: Uuid, roster_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            draft_id,
            pick_number,
            draft_pick_asset_id,
            roster_id,
        }
    }
}

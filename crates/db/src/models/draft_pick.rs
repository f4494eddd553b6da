use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{DraftPick, PickMetadata};

/// Database row for the `draft_picks` table.
#[derive(Debug, Clone, FromRow)]
pub struct DraftPickDb {
    pub id: Uuid,
    pub draft_id: Uuid,
    pub pick_number: i32,
    pub round: i32,
    pub pick_in_round: i32,
    pub roster_id: Uuid,
    pub player_id: Option<Uuid>,
    pub is_auto_pick: bool,
    pub picked_at: DateTime<Utc>,
    pub idempotency_key: Option<String>,
    pub metadata: Json<PickMetadata>,
}

impl DraftPickDb {
    pub fn from_domain(pick: &DraftPick) -> Self {
        Self {
            id: pick.id,
            draft_id: pick.draft_id,
            pick_number: pick.pick_number,
            round: pick.round,
            pick_in_round: pick.pick_in_round,
            roster_id: pick.roster_id,
            player_id: pick.player_id,
            is_auto_pick: pick.is_auto_pick,
            picked_at: pick.picked_at,
            idempotency_key: pick.idempotency_key.clone(),
            metadata: Json(pick.metadata.clone()),
        }
    }

    pub fn to_domain(&self) -> DraftPick {
        DraftPick {
            id: self.id,
            draft_id: self.draft_id,
            pick_number: self.pick_number,
            round: self.round,
            pick_in_round: self.pick_in_round,
            roster_id: self.roster_id,
            player_id: self.player_id,
            is_auto_pick: self.is_auto_pick,
            picked_at: self.picked_at,
            idempotency_key: self.idempotency_key.clone(),
            metadata: self.metadata.0.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_domain_round_trip() {
        let pick = DraftPick::new(
            Uuid::new_v4(),
            1,
            1,
            1,
            Uuid::new_v4(),
            Some(Uuid::new_v4()),
            false,
            Some("idem-1".to_string()),
        )
        .unwrap();
        let pick_db = DraftPickDb::from_domain(&pick);
        let restored = pick_db.to_domain();
        assert_eq!(restored.id, pick.id);
        assert_eq!(restored.player_id, pick.player_id);
        assert_eq!(restored.idempotency_key, pick.idempotency_key);
    }
}

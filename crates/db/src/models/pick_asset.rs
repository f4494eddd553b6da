use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{PickAsset, VetDraftPickAssetSelection};

/// Database row for the `pick_assets` table (the traded-pick ledger).
#[derive(Debug, Clone, FromRow)]
pub struct PickAssetDb {
    pub id: Uuid,
    pub league_id: Uuid,
    pub draft_id: Option<Uuid>,
    pub season: i32,
    pub round: i32,
    pub original_roster_id: Uuid,
    pub current_owner_roster_id: Uuid,
    pub original_pick_position: Option<i32>,
}

impl PickAssetDb {
    pub fn from_domain(asset: &PickAsset) -> Self {
        Self {
            id: asset.id,
            league_id: asset.league_id,
            draft_id: asset.draft_id,
            season: asset.season,
            round: asset.round,
            original_roster_id: asset.original_roster_id,
            current_owner_roster_id: asset.current_owner_roster_id,
            original_pick_position: asset.original_pick_position,
        }
    }

    pub fn to_domain(&self) -> PickAsset {
        PickAsset {
            id: self.id,
            league_id: self.league_id,
            draft_id: self.draft_id,
            season: self.season,
            round: self.round,
            original_roster_id: self.original_roster_id,
            current_owner_roster_id: self.current_owner_roster_id,
            original_pick_position: self.original_pick_position,
        }
    }
}

/// Database row for the `vet_draft_pick_asset_selections` table.
#[derive(Debug, Clone, FromRow)]
pub struct VetDraftPickAssetSelectionDb {
    pub id: Uuid,
    pub draft_id: Uuid,
    pub pick_number: i32,
    pub draft_pick_asset_id: Uuid,
    pub roster_id: Uuid,
}

impl VetDraftPickAssetSelectionDb {
    pub fn from_domain(selection: &VetDraftPickAssetSelection) -> Self {
        Self {
            id: selection.id,
            draft_id: selection.draft_id,
            pick_number: selection.pick_number,
            draft_pick_asset_id: selection.draft_pick_asset_id,
            roster_id: selection.roster_id,
        }
    }

    pub fn to_domain(&self) -> VetDraftPickAssetSelection {
        VetDraftPickAssetSelection {
            id: self.id,
            draft_id: self.draft_id,
            pick_number: self.pick_number,
            draft_pick_asset_id: self.draft_pick_asset_id,
            roster_id: self.roster_id,
        }
    }
}

use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::models::{DraftOrderEntry, DraftType, PickAsset};

/// Resolves which draft-position slot is on the clock for `pick_number`
/// under the given draft type, without accounting for traded pick assets.
///
/// `pick_number` is 1-based. Linear and matchups drafts repeat the same
/// position order every round; snake drafts reverse direction each round.
fn position_for_pick(draft_type: DraftType, pick_number: i32, roster_count: i32) -> DomainResult<i32> {
    if roster_count < 1 {
        return Err(DomainError::ValidationError(
            "Roster count must be at least 1 to compute draft order".to_string(),
        ));
    }
    if pick_number < 1 {
        return Err(DomainError::ValidationError(
            "Pick number must be at least 1".to_string(),
        ));
    }
    if draft_type == DraftType::Auction {
        return Err(DomainError::ValidationError(
            "Auction drafts do not use positional pick order".to_string(),
        ));
    }

    let idx0 = pick_number - 1;
    let round0 = idx0 / roster_count;
    let pos_in_round0 = idx0 % roster_count;

    let position = match draft_type {
        DraftType::Linear | DraftType::Matchups => pos_in_round0 + 1,
        DraftType::Snake => {
            if round0 % 2 == 0 {
                pos_in_round0 + 1
            } else {
                roster_count - pos_in_round0
            }
        }
        DraftType::Auction => unreachable!("rejected above"),
    };
    Ok(position)
}

/// Looks up the roster seated at `pick_number` under the base order, before
/// any trade reassignment.
pub fn base_picker_for_pick(
    draft_type: DraftType,
    pick_number: i32,
    roster_count: i32,
    order: &[DraftOrderEntry],
) -> DomainResult<Uuid> {
    let position = position_for_pick(draft_type, pick_number, roster_count)?;
    order
        .iter()
        .find(|entry| entry.draft_position == position)
        .map(|entry| entry.roster_id)
        .ok_or_else(|| {
            DomainError::NotFound(format!("no draft order entry at position {}", position))
        })
}

/// Resolves the actual picker for a given round, following a traded pick
/// asset when the base roster's slot in that round has changed hands.
pub fn resolve_actual_picker(base_roster_id: Uuid, round: i32, assets: &[PickAsset]) -> Uuid {
    assets
        .iter()
        .find(|asset| asset.round == round && asset.original_roster_id == base_roster_id)
        .map(|asset| asset.current_owner_roster_id)
        .unwrap_or(base_roster_id)
}

/// Computes round and pick-in-round for a 1-based overall pick number.
pub fn round_and_pick_in_round(pick_number: i32, roster_count: i32) -> DomainResult<(i32, i32)> {
    if roster_count < 1 || pick_number < 1 {
        return Err(DomainError::ValidationError(
            "Pick number and roster count must be positive".to_string(),
        ));
    }
    let idx0 = pick_number - 1;
    let round = idx0 / roster_count + 1;
    let pick_in_round = idx0 % roster_count + 1;
    Ok((round, pick_in_round))
}

/// Produces a freshly shuffled draft position assignment for the given
/// rosters. Used by the randomizeOrder operation ahead of order confirmation.
pub fn randomize_order(draft_id: Uuid, mut roster_ids: Vec<Uuid>) -> Vec<DraftOrderEntry> {
    roster_ids.shuffle(&mut rand::rng());
    roster_ids
        .into_iter()
        .enumerate()
        .map(|(idx, roster_id)| {
            DraftOrderEntry::new(draft_id, roster_id, idx as i32 + 1)
                .expect("position index is always >= 1")
        })
        .collect()
}

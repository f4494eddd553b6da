use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOrderEntry {
    pub draft_id: Uuid,
    pub roster_id: Uuid,
    pub draft_position: i32,
    pub is_autodraft_enabled: bool,
}

impl DraftOrderEntry {
    pub fn new(draft_id: Uuid, roster_id: Uuid, draft_position: i32) -> DomainResult<Self> {
        if draft_position < 1 {
            return Err(DomainError::ValidationError(
                "Draft position must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            draft_id,
            roster_id,
            draft_position,
            is_autodraft_enabled: false,
        })
    }
}

/// Verifies that a set of order entries occupies exactly the positions
/// 1..=entries.len(), with no gaps or duplicates.
pub fn validate_positions(entries: &[DraftOrderEntry]) -> DomainResult<()> {
    let mut positions: Vec<i32> = entries.iter().map(|e| e.draft_position).collect();
    positions.sort_unstable();
    let expected: Vec<i32> = (1..=positions.len() as i32).collect();
    if positions != expected {
        return Err(DomainError::ValidationError(
            "Draft order positions must form a contiguous sequence starting at 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_positions() {
        let draft_id = Uuid::new_v4();
        let entries = vec![
            DraftOrderEntry::new(draft_id, Uuid::new_v4(), 1).unwrap(),
            DraftOrderEntry::new(draft_id, Uuid::new_v4(), 2).unwrap(),
            DraftOrderEntry::new(draft_id, Uuid::new_v4(), 3).unwrap(),
        ];
        assert!(validate_positions(&entries).is_ok());
    }

    #[test]
    fn test_gap_in_positions_rejected() {
        let draft_id = Uuid::new_v4();
        let entries = vec![
            DraftOrderEntry::new(draft_id, Uuid::new_v4(), 1).unwrap(),
            DraftOrderEntry::new(draft_id, Uuid::new_v4(), 3).unwrap(),
        ];
        assert!(validate_positions(&entries).is_err());
    }

    #[test]
    fn test_duplicate_positions_rejected() {
        let draft_id = Uuid::new_v4();
        let entries = vec![
            DraftOrderEntry::new(draft_id, Uuid::new_v4(), 1).unwrap(),
            DraftOrderEntry::new(draft_id, Uuid::new_v4(), 1).unwrap(),
        ];
        assert!(validate_positions(&entries).is_err());
    }

    #[test]
    fn test_zero_position_rejected() {
        assert!(DraftOrderEntry::new(Uuid::new_v4(), Uuid::new_v4(), 0).is_err());
    }
}

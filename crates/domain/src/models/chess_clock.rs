use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessClockEntry {
    pub draft_id: Uuid,
    pub roster_id: Uuid,
    pub remaining_seconds: i32,
}

impl ChessClockEntry {
    pub fn new(draft_id: Uuid, roster_id: Uuid, total_seconds: i32) -> Self {
        Self {
            draft_id,
            roster_id,
            remaining_seconds: total_seconds.max(0),
        }
    }

    /// Subtracts the elapsed seconds, never going below zero.
    pub fn spend(&mut self, seconds: i32) {
        self.remaining_seconds = (self.remaining_seconds - seconds).max(0);
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_seconds <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_clamps_at_zero() {
        let mut clock = ChessClockEntry::new(Uuid::new_v4(), Uuid::new_v4(), 30);
        clock.spend(50);
        assert_eq!(clock.remaining_seconds, 0);
        assert!(clock.is_exhausted());
    }

    #[test]
    fn test_spend_partial() {
        let mut clock = ChessClockEntry::new(Uuid::new_v4(), Uuid::new_v4(), 30);
        clock.spend(10);
        assert_eq!(clock.remaining_seconds, 20);
        assert!(!clock.is_exhausted());
    }
}

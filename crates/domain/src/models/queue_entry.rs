use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A queued player or pick-asset for a roster, exactly one of which is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueTarget {
    Player(Uuid),
    PickAsset(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: Uuid,
    pub draft_id: Uuid,
    pub roster_id: Uuid,
    pub target: QueueTarget,
    pub queue_position: i32,
}

impl QueueEntry {
    pub fn new(draft_id: Uuid, roster_id: Uuid, target: QueueTarget, queue_position: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            draft_id,
            roster_id,
            target,
            queue_position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_queue_entry() {
        let player_id = Uuid::new_v4();
        let entry = QueueEntry::new(Uuid::new_v4(), Uuid::new_v4(), QueueTarget::Player(player_id), 1);
        assert_eq!(entry.target, QueueTarget::Player(player_id));
    }
}

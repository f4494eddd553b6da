use crate::models::{PickAsset, Player, QueueEntry, QueueTarget};
use crate::services::ranking::best_available;

/// Why an autopick fired. Priority when more than one condition holds:
/// an empty roster slot that must be filled outranks autodraft, which
/// outranks a plain timer expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutopickReason {
    EmptyRosterSlot,
    AutodraftEnabled,
    TimerExpired,
}

impl AutopickReason {
    pub fn priority(self) -> u8 {
        match self {
            AutopickReason::EmptyRosterSlot => 0,
            AutopickReason::AutodraftEnabled => 1,
            AutopickReason::TimerExpired => 2,
        }
    }
}

/// Picks the highest-priority reason among those that currently apply.
pub fn resolve_autopick_reason(
    empty_roster_slot: bool,
    autodraft_enabled: bool,
    timer_expired: bool,
) -> Option<AutopickReason> {
    let mut candidates = Vec::new();
    if empty_roster_slot {
        candidates.push(AutopickReason::EmptyRosterSlot);
    }
    if autodraft_enabled {
        candidates.push(AutopickReason::AutodraftEnabled);
    }
    if timer_expired {
        candidates.push(AutopickReason::TimerExpired);
    }
    candidates.into_iter().min_by_key(|r| r.priority())
}

/// Chooses what a roster drafts automatically: the first not-yet-consumed
/// entry in its queue, else the best available player by ADP, else (vet
/// drafts running alongside rookie-pick trading) the lowest-round available
/// pick asset. A queue entry whose player was already drafted or whose pick
/// asset was already selected by someone else is skipped rather than chosen.
pub fn select_autopick_target(
    queue: &[QueueEntry],
    available_players: &[Player],
    available_assets: &[PickAsset],
) -> Option<QueueTarget> {
    let is_consumed = |target: &QueueTarget| match target {
        QueueTarget::Player(id) => !available_players.iter().any(|p| p.id == *id),
        QueueTarget::PickAsset(id) => !available_assets.iter().any(|a| a.id == *id),
    };
    if let Some(entry) = queue.iter().find(|entry| !is_consumed(&entry.target)) {
        return Some(entry.target);
    }
    if let Some(player) = best_available(available_players) {
        return Some(QueueTarget::Player(player.id));
    }
    available_assets
        .iter()
        .min_by_key(|asset| asset.round)
        .map(|asset| QueueTarget::PickAsset(asset.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerPool;
    use uuid::Uuid;

    #[test]
    fn test_reason_priority_empty_roster_wins() {
        let reason = resolve_autopick_reason(true, true, true).unwrap();
        assert_eq!(reason, AutopickReason::EmptyRosterSlot);
    }

    #[test]
    fn test_reason_priority_autodraft_over_timeout() {
        let reason = resolve_autopick_reason(false, true, true).unwrap();
        assert_eq!(reason, AutopickReason::AutodraftEnabled);
    }

    #[test]
    fn test_reason_none_when_nothing_applies() {
        assert!(resolve_autopick_reason(false, false, false).is_none());
    }

    #[test]
    fn test_selects_queue_front_first() {
        let draft_id = Uuid::new_v4();
        let roster_id = Uuid::new_v4();
        let mut player = Player::new("A".to_string(), "WR".to_string(), PlayerPool::Veteran).unwrap();
        player.adp = Some(1.0);
        let queue = vec![QueueEntry::new(
            draft_id,
            roster_id,
            QueueTarget::Player(player.id),
            1,
        )];
        let target = select_autopick_target(&queue, &[player.clone()], &[]).unwrap();
        assert_eq!(target, QueueTarget::Player(player.id));
    }

    #[test]
    fn test_skips_consumed_queue_entries() {
        let draft_id = Uuid::new_v4();
        let roster_id = Uuid::new_v4();
        let drafted_player_id = Uuid::new_v4();
        let mut still_available = Player::new("B".to_string(), "RB".to_string(), PlayerPool::Veteran).unwrap();
        still_available.adp = Some(2.0);
        let queue = vec![
            QueueEntry::new(draft_id, roster_id, QueueTarget::Player(drafted_player_id), 1),
            QueueEntry::new(draft_id, roster_id, QueueTarget::Player(still_available.id), 2),
        ];
        let target = select_autopick_target(&queue, &[still_available.clone()], &[]).unwrap();
        assert_eq!(target, QueueTarget::Player(still_available.id));
    }

    #[test]
    fn test_falls_back_to_best_available_player() {
        let mut player = Player::new("A".to_string(), "WR".to_string(), PlayerPool::Veteran).unwrap();
        player.adp = Some(1.0);
        let target = select_autopick_target(&[], &[player.clone()], &[]).unwrap();
        assert_eq!(target, QueueTarget::Player(player.id));
    }

    #[test]
    fn test_falls_back_to_pick_asset_when_no_players() {
        let asset = PickAsset::new(Uuid::new_v4(), 2027, 2, Uuid::new_v4()).unwrap();
        let target = select_autopick_target(&[], &[], &[asset.clone()]).unwrap();
        assert_eq!(target, QueueTarget::PickAsset(asset.id));
    }

    #[test]
    fn test_no_target_when_everything_exhausted() {
        assert!(select_autopick_target(&[], &[], &[]).is_none());
    }
}

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::models::{DraftPick, DraftStatus, OvernightPause, Player, PlayerPool};

pub fn validate_draft_is_active(status: DraftStatus) -> DomainResult<()> {
    if status != DraftStatus::InProgress {
        return Err(DomainError::InvalidState(format!(
            "draft is {} and not accepting picks",
            status
        )));
    }
    Ok(())
}

/// Confirms the submitting roster is the one actually on the clock.
pub fn validate_on_deck(on_deck_roster_id: Uuid, submitting_roster_id: Uuid) -> DomainResult<()> {
    if on_deck_roster_id != submitting_roster_id {
        return Err(DomainError::Forbidden(
            "it is not this roster's turn to pick".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_player_eligible(
    player: &Player,
    allowed_pools: &BTreeSet<PlayerPool>,
) -> DomainResult<()> {
    if !allowed_pools.iter().any(|pool| player.eligible_for(*pool)) {
        return Err(DomainError::ValidationError(format!(
            "player {} is not eligible for this draft's player pool",
            player.id
        )));
    }
    Ok(())
}

pub fn validate_not_already_drafted(
    player_id: Uuid,
    existing_picks: &[DraftPick],
) -> DomainResult<()> {
    if existing_picks
        .iter()
        .any(|pick| pick.player_id == Some(player_id))
    {
        return Err(DomainError::PlayerAlreadyDrafted(player_id.to_string()));
    }
    Ok(())
}

pub fn validate_not_in_overnight_pause(pause: &OvernightPause, now: DateTime<Utc>) -> DomainResult<()> {
    if pause.contains(now.time()) {
        return Err(DomainError::InvalidState(
            "draft is in its overnight pause window".to_string(),
        ));
    }
    Ok(())
}

/// Rejects a client-submitted pick once its deadline has passed; autopicks
/// bypass this check entirely since they are what the deadline triggers.
pub fn validate_deadline_not_passed(pick_deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DomainResult<()> {
    if let Some(deadline) = pick_deadline {
        if crate::services::pick_state::deadline_has_passed(deadline, now) {
            return Err(DomainError::DeadlinePassed(
                "pick deadline has passed".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_rejects_inactive_draft() {
        assert!(validate_draft_is_active(DraftStatus::Paused).is_err());
        assert!(validate_draft_is_active(DraftStatus::InProgress).is_ok());
    }

    #[test]
    fn test_rejects_wrong_roster_on_deck() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert!(validate_on_deck(a, b).is_err());
        assert!(validate_on_deck(a, a).is_ok());
    }

    #[test]
    fn test_player_eligibility() {
        let mut player = Player::new("A".to_string(), "WR".to_string(), PlayerPool::Veteran).unwrap();
        player.years_exp = Some(4);
        let allowed = BTreeSet::from([PlayerPool::Rookie]);
        assert!(validate_player_eligible(&player, &allowed).is_err());
        let allowed = BTreeSet::from([PlayerPool::Veteran]);
        assert!(validate_player_eligible(&player, &allowed).is_ok());
    }

    #[test]
    fn test_already_drafted_rejected() {
        let player_id = Uuid::new_v4();
        let pick = DraftPick::new(
            Uuid::new_v4(),
            1,
            1,
            1,
            Uuid::new_v4(),
            Some(player_id),
            false,
            None,
        )
        .unwrap();
        assert!(validate_not_already_drafted(player_id, &[pick]).is_err());
        assert!(validate_not_already_drafted(Uuid::new_v4(), &[]).is_ok());
    }

    #[test]
    fn test_deadline_not_passed_when_none_or_future() {
        assert!(validate_deadline_not_passed(None, Utc::now()).is_ok());
        let now = Utc::now();
        assert!(validate_deadline_not_passed(Some(now + chrono::Duration::seconds(5)), now).is_ok());
    }

    #[test]
    fn test_deadline_passed_is_rejected() {
        let now = Utc::now();
        let result = validate_deadline_not_passed(Some(now - chrono::Duration::seconds(1)), now);
        assert!(matches!(result, Err(DomainError::DeadlinePassed(_))));
    }

    #[test]
    fn test_overnight_pause_blocks_picks() {
        let pause = OvernightPause {
            enabled: true,
            start: NaiveTime::from_hms_opt(1, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            timezone: "UTC".to_string(),
        };
        let during = Utc::now()
            .date_naive()
            .and_time(NaiveTime::from_hms_opt(3, 0, 0).unwrap())
            .and_utc();
        assert!(validate_not_in_overnight_pause(&pause, during).is_err());
    }
}

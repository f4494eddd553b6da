use chrono::{DateTime, Duration, Utc};

use crate::models::{Draft, TimerMode};

/// True once `current_pick` has advanced past the last slot the draft's
/// round/roster-count configuration can produce.
pub fn is_draft_complete(draft: &Draft, roster_count: i32) -> bool {
    draft.is_terminal_pick(roster_count)
}

/// Computes the deadline for the pick now on the clock. Per-pick timers use
/// a fixed window from when the pick started; chess-clock timers spend down
/// a roster's remaining bank but never offer less than the configured
/// minimum, so a roster that has exhausted its bank still gets a chance to
/// act before being autopicked.
pub fn compute_pick_deadline(
    timer_mode: TimerMode,
    pick_started_at: DateTime<Utc>,
    pick_time_seconds: i32,
    chess_clock_remaining_seconds: Option<i32>,
    chess_clock_min_pick_seconds: i32,
) -> DateTime<Utc> {
    match timer_mode {
        TimerMode::PerPick => pick_started_at + Duration::seconds(pick_time_seconds as i64),
        TimerMode::ChessClock => {
            let remaining = chess_clock_remaining_seconds.unwrap_or(0);
            let window = remaining.max(chess_clock_min_pick_seconds);
            pick_started_at + Duration::seconds(window as i64)
        }
    }
}

pub fn deadline_has_passed(deadline: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= deadline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_pick_deadline() {
        let start = Utc::now();
        let deadline = compute_pick_deadline(TimerMode::PerPick, start, 90, None, 10);
        assert_eq!(deadline, start + Duration::seconds(90));
    }

    #[test]
    fn test_chess_clock_deadline_uses_remaining() {
        let start = Utc::now();
        let deadline = compute_pick_deadline(TimerMode::ChessClock, start, 90, Some(45), 10);
        assert_eq!(deadline, start + Duration::seconds(45));
    }

    #[test]
    fn test_chess_clock_deadline_floors_at_minimum() {
        let start = Utc::now();
        let deadline = compute_pick_deadline(TimerMode::ChessClock, start, 90, Some(3), 10);
        assert_eq!(deadline, start + Duration::seconds(10));
    }

    #[test]
    fn test_deadline_has_passed() {
        let now = Utc::now();
        assert!(deadline_has_passed(now - Duration::seconds(1), now));
        assert!(!deadline_has_passed(now + Duration::seconds(1), now));
    }
}

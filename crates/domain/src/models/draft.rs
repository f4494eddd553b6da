use std::collections::BTreeSet;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    NotStarted,
    InProgress,
    Paused,
    Completed,
}

impl std::fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftStatus::NotStarted => write!(f, "not_started"),
            DraftStatus::InProgress => write!(f, "in_progress"),
            DraftStatus::Paused => write!(f, "paused"),
            DraftStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DraftType {
    Snake,
    Linear,
    Matchups,
    Auction,
}

impl std::fmt::Display for DraftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftType::Snake => write!(f, "snake"),
            DraftType::Linear => write!(f, "linear"),
            DraftType::Matchups => write!(f, "matchups"),
            DraftType::Auction => write!(f, "auction"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    PerPick,
    ChessClock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlayerPool {
    Veteran,
    Rookie,
    College,
}

/// Discriminated settings blob for a draft. Mirrors the source's free-form
/// settings column but pins down the fields this engine actually interprets;
/// auction-specific keys are round-tripped opaquely because this crate does
/// not implement the auction subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSettings {
    #[serde(default = "default_player_pool")]
    pub player_pool: BTreeSet<PlayerPool>,
    #[serde(default)]
    pub include_rookie_picks: bool,
    pub rookie_picks_season: Option<i32>,
    #[serde(default = "default_rookie_picks_rounds")]
    pub rookie_picks_rounds: i32,
    #[serde(default = "default_timer_mode")]
    pub timer_mode: TimerMode,
    pub chess_clock_total_seconds: Option<i32>,
    #[serde(default = "default_chess_clock_min_pick_seconds")]
    pub chess_clock_min_pick_seconds: i32,
    /// Opaque auction-mode configuration, stored but not interpreted here.
    #[serde(default)]
    pub auction: Option<JsonValue>,
}

fn default_player_pool() -> BTreeSet<PlayerPool> {
    BTreeSet::from([PlayerPool::Veteran, PlayerPool::Rookie])
}

fn default_rookie_picks_rounds() -> i32 {
    5
}

fn default_timer_mode() -> TimerMode {
    TimerMode::PerPick
}

fn default_chess_clock_min_pick_seconds() -> i32 {
    10
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            player_pool: default_player_pool(),
            include_rookie_picks: false,
            rookie_picks_season: None,
            rookie_picks_rounds: default_rookie_picks_rounds(),
            timer_mode: default_timer_mode(),
            chess_clock_total_seconds: None,
            chess_clock_min_pick_seconds: default_chess_clock_min_pick_seconds(),
            auction: None,
        }
    }
}

/// Overnight pause window, compared against a wall-clock instant in the
/// configured zone. Windows may wrap past midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvernightPause {
    pub enabled: bool,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// IANA zone name, e.g. "America/Chicago". Only UTC is evaluated today;
    /// see DraftEngineConfig::overnight_pause_zone.
    pub timezone: String,
}

impl OvernightPause {
    pub fn contains(&self, wall_clock: NaiveTime) -> bool {
        if !self.enabled {
            return false;
        }
        if self.start <= self.end {
            self.start <= wall_clock && wall_clock < self.end
        } else {
            wall_clock >= self.start || wall_clock < self.end
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: Uuid,
    pub league_id: Uuid,
    pub draft_type: DraftType,
    pub status: DraftStatus,
    pub rounds: i32,
    pub pick_time_seconds: i32,
    pub current_pick: i32,
    pub current_round: i32,
    pub current_roster_id: Option<Uuid>,
    pub pick_deadline: Option<DateTime<Utc>>,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub order_confirmed: bool,
    pub settings: DraftSettings,
    pub overnight_pause: OvernightPause,
    pub draft_state: JsonValue,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Draft {
    pub fn new(
        league_id: Uuid,
        draft_type: DraftType,
        rounds: i32,
        pick_time_seconds: i32,
    ) -> DomainResult<Self> {
        Self::validate_rounds(rounds)?;
        Self::validate_pick_time(pick_time_seconds)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            league_id,
            draft_type,
            status: DraftStatus::NotStarted,
            rounds,
            pick_time_seconds,
            current_pick: 1,
            current_round: 1,
            current_roster_id: None,
            pick_deadline: None,
            scheduled_start: None,
            order_confirmed: false,
            settings: DraftSettings::default(),
            overnight_pause: OvernightPause {
                enabled: false,
                start: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
                timezone: "UTC".to_string(),
            },
            draft_state: JsonValue::Object(Default::default()),
            completed_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn total_picks(&self, roster_count: i32) -> i32 {
        self.rounds * roster_count
    }

    pub fn is_terminal_pick(&self, roster_count: i32) -> bool {
        self.current_pick > self.total_picks(roster_count)
    }

    fn validate_rounds(rounds: i32) -> DomainResult<()> {
        if !(1..=50).contains(&rounds) {
            return Err(DomainError::ValidationError(
                "Rounds must be between 1 and 50".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_pick_time(seconds: i32) -> DomainResult<()> {
        if seconds < 1 {
            return Err(DomainError::ValidationError(
                "Pick time must be a positive number of seconds".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_draft_defaults() {
        let draft = Draft::new(Uuid::new_v4(), DraftType::Snake, 15, 90).unwrap();
        assert_eq!(draft.status, DraftStatus::NotStarted);
        assert_eq!(draft.current_pick, 1);
        assert_eq!(draft.current_round, 1);
        assert!(!draft.order_confirmed);
        assert_eq!(draft.total_picks(12), 180);
        assert!(!draft.is_terminal_pick(12));
    }

    #[test]
    fn test_invalid_rounds_rejected() {
        assert!(Draft::new(Uuid::new_v4(), DraftType::Snake, 0, 90).is_err());
        assert!(Draft::new(Uuid::new_v4(), DraftType::Snake, 51, 90).is_err());
    }

    #[test]
    fn test_invalid_pick_time_rejected() {
        assert!(Draft::new(Uuid::new_v4(), DraftType::Snake, 15, 0).is_err());
    }

    #[test]
    fn test_overnight_pause_same_day_window() {
        let pause = OvernightPause {
            enabled: true,
            start: NaiveTime::from_hms_opt(1, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            timezone: "UTC".to_string(),
        };
        assert!(pause.contains(NaiveTime::from_hms_opt(3, 0, 0).unwrap()));
        assert!(!pause.contains(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
    }

    #[test]
    fn test_overnight_pause_wraps_midnight() {
        let pause = OvernightPause {
            enabled: true,
            start: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            timezone: "UTC".to_string(),
        };
        assert!(pause.contains(NaiveTime::from_hms_opt(23, 30, 0).unwrap()));
        assert!(pause.contains(NaiveTime::from_hms_opt(3, 0, 0).unwrap()));
        assert!(!pause.contains(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
    }

    #[test]
    fn test_overnight_pause_disabled_never_contains() {
        let pause = OvernightPause {
            enabled: false,
            start: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            timezone: "UTC".to_string(),
        };
        assert!(!pause.contains(NaiveTime::from_hms_opt(1, 0, 0).unwrap()));
    }
}

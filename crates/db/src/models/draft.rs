use chrono::{DateTime, NaiveTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Draft, DraftOrderEntry, DraftSettings, DraftStatus, DraftType, OvernightPause};

use crate::errors::{DbError, DbResult};

/// Database row for the `drafts` table. Settings and the overnight pause
/// window round-trip through JSONB rather than their own columns; neither
/// is queried on directly.
#[derive(Debug, Clone, FromRow)]
pub struct DraftDb {
    pub id: Uuid,
    pub league_id: Uuid,
    pub draft_type: String,
    pub status: String,
    pub rounds: i32,
    pub pick_time_seconds: i32,
    pub current_pick: i32,
    pub current_round: i32,
    pub current_roster_id: Option<Uuid>,
    pub pick_deadline: Option<DateTime<Utc>>,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub order_confirmed: bool,
    pub settings: Json<DraftSettings>,
    pub overnight_pause_enabled: bool,
    pub overnight_pause_start: NaiveTime,
    pub overnight_pause_end: NaiveTime,
    pub overnight_pause_timezone: String,
    pub draft_state: Json<serde_json::Value>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DraftDb {
    pub fn from_domain(draft: &Draft) -> Self {
        Self {
            id: draft.id,
            league_id: draft.league_id,
            draft_type: draft.draft_type.to_string(),
            status: draft.status.to_string(),
            rounds: draft.rounds,
            pick_time_seconds: draft.pick_time_seconds,
            current_pick: draft.current_pick,
            current_round: draft.current_round,
            current_roster_id: draft.current_roster_id,
            pick_deadline: draft.pick_deadline,
            scheduled_start: draft.scheduled_start,
            order_confirmed: draft.order_confirmed,
            settings: Json(draft.settings.clone()),
            overnight_pause_enabled: draft.overnight_pause.enabled,
            overnight_pause_start: draft.overnight_pause.start,
            overnight_pause_end: draft.overnight_pause.end,
            overnight_pause_timezone: draft.overnight_pause.timezone.clone(),
            draft_state: Json(draft.draft_state.clone()),
            completed_at: draft.completed_at,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        }
    }

    pub fn to_domain(&self) -> DbResult<Draft> {
        Ok(Draft {
            id: self.id,
            league_id: self.league_id,
            draft_type: string_to_draft_type(&self.draft_type)?,
            status: string_to_status(&self.status)?,
            rounds: self.rounds,
            pick_time_seconds: self.pick_time_seconds,
            current_pick: self.current_pick,
            current_round: self.current_round,
            current_roster_id: self.current_roster_id,
            pick_deadline: self.pick_deadline,
            scheduled_start: self.scheduled_start,
            order_confirmed: self.order_confirmed,
            settings: self.settings.0.clone(),
            overnight_pause: OvernightPause {
                enabled: self.overnight_pause_enabled,
                start: self.overnight_pause_start,
                end: self.overnight_pause_end,
                timezone: self.overnight_pause_timezone.clone(),
            },
            draft_state: self.draft_state.0.clone(),
            completed_at: self.completed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn string_to_status(s: &str) -> DbResult<DraftStatus> {
    match s {
        "not_started" => Ok(DraftStatus::NotStarted),
        "in_progress" => Ok(DraftStatus::InProgress),
        "paused" => Ok(DraftStatus::Paused),
        "completed" => Ok(DraftStatus::Completed),
        _ => Err(DbError::MappingError(format!("Invalid draft status: {}", s))),
    }
}

fn string_to_draft_type(s: &str) -> DbResult<DraftType> {
    match s {
        "snake" => Ok(DraftType::Snake),
        "linear" => Ok(DraftType::Linear),
        "matchups" => Ok(DraftType::Matchups),
        "auction" => Ok(DraftType::Auction),
        _ => Err(DbError::MappingError(format!("Invalid draft type: {}", s))),
    }
}

/// Database row for the `draft_order` table.
#[derive(Debug, Clone, FromRow)]
pub struct DraftOrderEntryDb {
    pub draft_id: Uuid,
    pub roster_id: Uuid,
    pub draft_position: i32,
    pub is_autodraft_enabled: bool,
}

impl DraftOrderEntryDb {
    pub fn from_domain(entry: &DraftOrderEntry) -> Self {
        Self {
            draft_id: entry.draft_id,
            roster_id: entry.roster_id,
            draft_position: entry.draft_position,
            is_autodraft_enabled: entry.is_autodraft_enabled,
        }
    }

    pub fn to_domain(&self) -> DraftOrderEntry {
        DraftOrderEntry {
            draft_id: self.draft_id,
            roster_id: self.roster_id,
            draft_position: self.draft_position,
            is_autodraft_enabled: self.is_autodraft_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips() {
        for status in [
            DraftStatus::NotStarted,
            DraftStatus::InProgress,
            DraftStatus::Paused,
            DraftStatus::Completed,
        ] {
            let s = status.to_string();
            assert_eq!(string_to_status(&s).unwrap(), status);
        }
    }

    #[test]
    fn test_draft_type_round_trips() {
        for draft_type in [DraftType::Snake, DraftType::Linear, DraftType::Matchups, DraftType::Auction] {
            let s = draft_type.to_string();
            assert_eq!(string_to_draft_type(&s).unwrap(), draft_type);
        }
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!(string_to_status("bogus").is_err());
    }

    #[test]
    fn test_draft_domain_round_trip() {
        let draft = Draft::new(Uuid::new_v4(), DraftType::Snake, 15, 90).unwrap();
        let draft_db = DraftDb::from_domain(&draft);
        let restored = draft_db.to_domain().unwrap();
        assert_eq!(restored.id, draft.id);
        assert_eq!(restored.draft_type, draft.draft_type);
        assert_eq!(restored.settings, draft.settings);
    }
}

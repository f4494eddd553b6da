use uuid::Uuid;

use domain::models::ChessClockEntry;

/// Database row for the `chess_clock_entries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChessClockEntryDb {
    pub draft_id: Uuid,
    pub roster_id: Uuid,
    pub remaining_seconds: i32,
}

impl ChessClockEntryDb {
    pub fn from_domain(entry: &ChessClockEntry) -> Self {
        Self {
            draft_id: entry.draft_id,
            roster_id: entry.roster_id,
            remaining_seconds: entry.remaining_seconds,
        }
    }

    pub fn to_domain(&self) -> ChessClockEntry {
        ChessClockEntry {
            draft_id: self.draft_id,
            roster_id: self.roster_id,
            remaining_seconds: self.remaining_seconds,
        }
    }
}

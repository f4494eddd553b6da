use uuid::Uuid;

use domain::models::{QueueEntry, QueueTarget};

use crate::errors::{DbError, DbResult};

/// Database row for the `queue_entries` table. `QueueTarget` is flattened
/// into a discriminator column plus two nullable foreign keys, exactly one
/// of which is populated, since Postgres has no native sum type.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QueueEntryDb {
    pub id: Uuid,
    pub draft_id: Uuid,
    pub roster_id: Uuid,
    pub target_type: String,
    pub target_player_id: Option<Uuid>,
    pub target_pick_asset_id: Option<Uuid>,
    pub queue_position: i32,
}

impl QueueEntryDb {
    pub fn from_domain(entry: &QueueEntry) -> Self {
        let (target_type, target_player_id, target_pick_asset_id) = match entry.target {
            QueueTarget::Player(id) => ("player".to_string(), Some(id), None),
            QueueTarget::PickAsset(id) => ("pick_asset".to_string(), None, Some(id)),
        };
        Self {
            id: entry.id,
            draft_id: entry.draft_id,
            roster_id: entry.roster_id,
            target_type,
            target_player_id,
            target_pick_asset_id,
            queue_position: entry.queue_position,
        }
    }

    pub fn to_domain(&self) -> DbResult<QueueEntry> {
        let target = match self.target_type.as_str() {
            "player" => QueueTarget::Player(self.target_player_id.ok_or_else(|| {
                DbError::MappingError("queue entry marked player has no target_player_id".to_string())
            })?),
            "pick_asset" => QueueTarget::PickAsset(self.target_pick_asset_id.ok_or_else(|| {
                DbError::MappingError(
                    "queue entry marked pick_asset has no target_pick_asset_id".to_string(),
                )
            })?),
            other => {
                return Err(DbError::MappingError(format!(
                    "Invalid queue target type: {}",
                    other
                )))
            }
        };
        Ok(QueueEntry {
            id: self.id,
            draft_id: self.draft_id,
            roster_id: self.roster_id,
            target,
            queue_position: self.queue_position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_target_round_trip() {
        let entry = QueueEntry::new(Uuid::new_v4(), Uuid::new_v4(), QueueTarget::Player(Uuid::new_v4()), 1);
        let db = QueueEntryDb::from_domain(&entry);
        assert_eq!(db.target_type, "player");
        let restored = db.to_domain().unwrap();
        assert_eq!(restored.target, entry.target);
    }

    #[test]
    fn test_pick_asset_target_round_trip() {
        let entry = QueueEntry::new(Uuid::new_v4(), Uuid::new_v4(), QueueTarget::PickAsset(Uuid::new_v4()), 2);
        let db = QueueEntryDb::from_domain(&entry);
        assert_eq!(db.target_type, "pick_asset");
        let restored = db.to_domain().unwrap();
        assert_eq!(restored.target, entry.target);
    }
}

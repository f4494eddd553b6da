use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Player, PlayerPool};

use crate::errors::{DbError, DbResult};

/// Database row for the `players` table. Player data is owned by a
/// collaborator service; this crate only reads the columns the draft engine
/// needs to decide eligibility and ordering.
#[derive(Debug, Clone, FromRow)]
pub struct PlayerDb {
    pub id: Uuid,
    pub display_name: String,
    pub position: String,
    pub nfl_team: Option<String>,
    pub pool: String,
    pub years_exp: Option<i32>,
    pub adp: Option<f64>,
    pub active: bool,
}

impl PlayerDb {
    pub fn from_domain(player: &Player) -> Self {
        Self {
            id: player.id,
            display_name: player.display_name.clone(),
            position: player.position.clone(),
            nfl_team: player.nfl_team.clone(),
            pool: pool_to_string(&player.pool),
            years_exp: player.years_exp,
            adp: player.adp,
            active: player.active,
        }
    }

    pub fn to_domain(&self) -> DbResult<Player> {
        Ok(Player {
            id: self.id,
            display_name: self.display_name.clone(),
            position: self.position.clone(),
            nfl_team: self.nfl_team.clone(),
            pool: string_to_pool(&self.pool)?,
            years_exp: self.years_exp,
            adp: self.adp,
            active: self.active,
        })
    }
}

pub(crate) fn pool_to_string(pool: &PlayerPool) -> String {
    match pool {
        PlayerPool::Veteran => "veteran",
        PlayerPool::Rookie => "rookie",
        PlayerPool::College => "college",
    }
    .to_string()
}

fn string_to_pool(s: &str) -> DbResult<PlayerPool> {
    match s {
        "veteran" => Ok(PlayerPool::Veteran),
        "rookie" => Ok(PlayerPool::Rookie),
        "college" => Ok(PlayerPool::College),
        _ => Err(DbError::MappingError(format!("Invalid player pool: {}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_round_trips() {
        for pool in [PlayerPool::Veteran, PlayerPool::Rookie, PlayerPool::College] {
            let s = pool_to_string(&pool);
            assert_eq!(string_to_pool(&s).unwrap(), pool);
        }
    }

    #[test]
    fn test_player_domain_round_trip() {
        let player = Player::new("Ja'Marr Chase".to_string(), "WR".to_string(), PlayerPool::Veteran).unwrap();
        let player_db = PlayerDb::from_domain(&player);
        let restored = player_db.to_domain().unwrap();
        assert_eq!(restored.id, player.id);
        assert_eq!(restored.pool, player.pool);
    }
}

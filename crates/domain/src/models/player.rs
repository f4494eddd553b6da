use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::models::draft::PlayerPool;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub display_name: String,
    pub position: String,
    pub nfl_team: Option<String>,
    pub pool: PlayerPool,
    pub years_exp: Option<i32>,
    pub adp: Option<f64>,
    pub active: bool,
}

impl Player {
    pub fn new(display_name: String, position: String, pool: PlayerPool) -> DomainResult<Self> {
        if display_name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Player display name cannot be empty".to_string(),
            ));
        }
        if position.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Player position cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            display_name,
            position,
            nfl_team: None,
            pool,
            years_exp: None,
            adp: None,
            active: true,
        })
    }

    /// Pool-eligibility rule from the data model: veteran players have
    /// nonzero or unknown experience, rookies have exactly zero, college
    /// players belong to the college pool outright (devy-mode only, gated
    /// by the caller).
    pub fn eligible_for(&self, pool: PlayerPool) -> bool {
        match pool {
            PlayerPool::Veteran => self.pool == PlayerPool::Veteran && self.years_exp != Some(0),
            PlayerPool::Rookie => self.pool == PlayerPool::Rookie || self.years_exp == Some(0),
            PlayerPool::College => self.pool == PlayerPool::College,
        }
    }
}

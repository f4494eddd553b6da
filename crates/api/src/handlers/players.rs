use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use domain::models::Player;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Player rows are owned by a league/roster collaborator outside this
/// service; this crate only reads them to validate and display picks.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerResponse {
    pub id: Uuid,
    pub display_name: String,
    pub position: String,
    pub nfl_team: Option<String>,
    pub pool: String,
    pub years_exp: Option<i32>,
    pub adp: Option<f64>,
    pub active: bool,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            display_name: player.display_name,
            position: player.position,
            nfl_team: player.nfl_team,
            pool: format!("{:?}", player.pool).to_lowercase(),
            years_exp: player.years_exp,
            adp: player.adp,
            active: player.active,
        }
    }
}

/// GET /api/v1/players/:id - Get player by ID
#[utoipa::path(
    get,
    path = "/api/v1/players/{id}",
    responses(
        (status = 200, description = "Player found", body = PlayerResponse),
        (status = 404, description = "Player not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Player ID")
    ),
    tag = "players"
)]
pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PlayerResponse>> {
    let player = state
        .player_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("player {} not found", id)))?;

    Ok(Json(PlayerResponse::from(player)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::PlayerPool;

    #[test]
    fn test_player_response_formats_pool_lowercase() {
        let mut player = Player::new("Test Player".to_string(), "WR".to_string(), PlayerPool::Veteran)
            .expect("valid player");
        player.adp = Some(12.5);
        let response = PlayerResponse::from(player);
        assert_eq!(response.pool, "veteran");
        assert_eq!(response.adp, Some(12.5));
    }
}

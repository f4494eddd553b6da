//! HTTP-level error mapping integration tests

mod common;

use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_get_missing_draft_is_404() {
    let (base_url, _pool) = common::spawn_app().await;
    let client = common::create_client();

    let response = client
        .get(&format!("{}/api/v1/drafts/{}", base_url, Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_invalid_rounds_is_400() {
    let (base_url, _pool) = common::spawn_app().await;
    let client = common::create_client();

    let response = client
        .post(&format!("{}/api/v1/drafts", base_url))
        .json(&json!({
            "league_id": Uuid::new_v4(),
            "draft_type": "snake",
            "rounds": 0,
            "pick_time_seconds": 90
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_duplicate_pick_on_same_player_is_409() {
    let (base_url, pool) = common::spawn_app().await;
    let client = common::create_client();

    let league_id = common::seed_league(&pool).await;
    let roster_a = common::seed_roster(&pool, league_id, "Roster A").await;
    let player_id = common::seed_player(&pool, "Contested Prospect", "RB").await;

    let create_response = client
        .post(&format!("{}/api/v1/drafts", base_url))
        .json(&json!({
            "league_id": league_id,
            "draft_type": "snake",
            "rounds": 2,
            "pick_time_seconds": 90
        }))
        .send()
        .await
        .expect("Failed to create draft");
    let draft: serde_json::Value = create_response.json().await.expect("Failed to parse JSON");
    let draft_id = draft["id"].as_str().unwrap();

    client
        .post(&format!("{}/api/v1/drafts/{}/order", base_url, draft_id))
        .json(&json!({ "entries": [{"roster_id": roster_a, "position": 1}] }))
        .send()
        .await
        .expect("Failed to set order");
    client
        .post(&format!("{}/api/v1/drafts/{}/order/confirm", base_url, draft_id))
        .send()
        .await
        .expect("Failed to confirm order");
    client
        .post(&format!("{}/api/v1/drafts/{}/start", base_url, draft_id))
        .header("X-User-Id", Uuid::new_v4().to_string())
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to start draft");

    let first = client
        .post(&format!("{}/api/v1/drafts/{}/pick", base_url, draft_id))
        .json(&json!({ "roster_id": roster_a, "player_id": player_id }))
        .send()
        .await
        .expect("Failed to make first pick");
    assert_eq!(first.status(), 200);

    let second = client
        .post(&format!("{}/api/v1/drafts/{}/pick", base_url, draft_id))
        .json(&json!({ "roster_id": roster_a, "player_id": player_id }))
        .send()
        .await
        .expect("Failed to make second pick");
    assert_eq!(second.status(), 409);
}

#[tokio::test]
async fn test_start_without_user_id_header_is_401() {
    // start_draft requires AuthContext (X-User-Id); omitting it should be
    // rejected before the handler body runs.
    let (base_url, pool) = common::spawn_app().await;
    let client = common::create_client();

    let league_id = common::seed_league(&pool).await;

    let create_response = client
        .post(&format!("{}/api/v1/drafts", base_url))
        .json(&json!({
            "league_id": league_id,
            "draft_type": "snake",
            "rounds": 1,
            "pick_time_seconds": 90
        }))
        .send()
        .await
        .expect("Failed to create draft");
    let draft: serde_json::Value = create_response.json().await.expect("Failed to parse JSON");
    let draft_id = draft["id"].as_str().unwrap();

    let response = client
        .post(&format!("{}/api/v1/drafts/{}/start", base_url, draft_id))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}

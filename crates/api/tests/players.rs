//! Player lookup integration tests

mod common;

use uuid::Uuid;

#[tokio::test]
async fn test_get_player_returns_formatted_pool() {
    let (base_url, pool) = common::spawn_app().await;
    let client = common::create_client();

    let player_id = common::seed_player(&pool, "Test Prospect", "WR").await;

    let response = client
        .get(&format!("{}/api/v1/players/{}", base_url, player_id))
        .send()
        .await
        .expect("Failed to fetch player");
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["display_name"], "Test Prospect");
    assert_eq!(body["position"], "WR");
    assert_eq!(body["pool"], "veteran");
}

#[tokio::test]
async fn test_get_player_not_found() {
    let (base_url, _pool) = common::spawn_app().await;
    let client = common::create_client();

    let response = client
        .get(&format!("{}/api/v1/players/{}", base_url, Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

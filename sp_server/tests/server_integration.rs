//! Router-level integration tests: request/response shapes and the
//! status-code mapping for every failure kind reachable over HTTP.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use sealed_poker::entities::PlayerId;
use sealed_poker::table::{TableActor, TableConfig};
use serde_json::{Value, json};
use tower::ServiceExt; // For `oneshot` method

const OWNER: &str = "0xowner";

/// Build an app backed by a fresh in-memory table actor.
fn create_test_app() -> Router {
    let config = TableConfig::new("test-table", PlayerId::new(OWNER));
    let (actor, handle) = TableActor::new(config);
    tokio::spawn(actor.run());

    sp_server::api::create_router(sp_server::api::AppState { table: handle })
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn join(app: &Router, player: &str) -> (StatusCode, Value) {
    post(
        app,
        "/api/v1/join",
        json!({"player_id": player, "public_key": format!("key-{player}")}),
    )
    .await
}

async fn bet(app: &Router, player: &str, amount: u64) -> (StatusCode, Value) {
    post(
        app,
        "/api/v1/bet",
        json!({"player_id": player, "amount": amount, "commitment": "0xcommit"}),
    )
    .await
}

// ============================================================================
// Health and Queries
// ============================================================================

#[tokio::test]
async fn health_reports_a_live_table() {
    let app = create_test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["table"], true);
}

#[tokio::test]
async fn fresh_table_snapshot_is_empty_and_waiting() {
    let app = create_test_app();
    let (status, body) = get(&app, "/api/v1/game").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "waiting_for_players");
    assert_eq!(body["player_count"], 0);
    assert_eq!(body["pot"], 0);
    assert_eq!(body["current_player"], Value::Null);
}

#[tokio::test]
async fn unknown_seat_and_unknown_player_are_not_found() {
    let app = create_test_app();

    let (status, _) = get(&app, "/api/v1/players/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/api/v1/players/0xnobody/cards").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

// ============================================================================
// Commands
// ============================================================================

#[tokio::test]
async fn two_joins_start_the_hand() {
    let app = create_test_app();

    let (status, body) = join(&app, "0xaaa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["player_count"], 1);
    assert_eq!(body["phase"], "waiting_for_players");

    let (status, body) = join(&app, "0xbbb").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "betting");
    assert_eq!(body["current_player"], 0);

    // Both players now hold sealed hole cards.
    let (status, body) = get(&app, "/api/v1/players/0xaaa/cards").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cards"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_join_maps_to_conflict() {
    let app = create_test_app();
    join(&app, "0xaaa").await;

    let (status, body) = join(&app, "0xAAA").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "player already in game");
}

#[tokio::test]
async fn out_of_turn_bet_maps_to_conflict() {
    let app = create_test_app();
    join(&app, "0xaaa").await;
    join(&app, "0xbbb").await;

    let (status, body) = bet(&app, "0xbbb", 10).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "not your turn");
}

#[tokio::test]
async fn short_bet_maps_to_bad_request() {
    let app = create_test_app();
    join(&app, "0xaaa").await;
    join(&app, "0xbbb").await;

    bet(&app, "0xaaa", 50).await;
    let (status, _) = bet(&app, "0xbbb", 20).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn betting_before_the_hand_maps_to_conflict() {
    let app = create_test_app();
    join(&app, "0xaaa").await;

    let (status, _) = bet(&app, "0xaaa", 10).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn non_owner_reset_maps_to_forbidden() {
    let app = create_test_app();
    join(&app, "0xaaa").await;

    let (status, _) = post(&app, "/api/v1/reset", json!({"caller": "0xaaa"})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn owner_reset_before_finish_maps_to_conflict() {
    let app = create_test_app();
    join(&app, "0xaaa").await;
    join(&app, "0xbbb").await;

    let (status, body) = post(&app, "/api/v1/reset", json!({"caller": OWNER})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "game not finished");
}

// ============================================================================
// A Full Hand Over HTTP
// ============================================================================

#[tokio::test]
async fn bet_fold_reset_round_trip() {
    let app = create_test_app();
    join(&app, "0xaaa").await;
    join(&app, "0xbbb").await;

    let (status, body) = bet(&app, "0xaaa", 10).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pot"], 10);
    assert_eq!(body["current_bet"], 10);
    assert_eq!(body["current_player"], 1);

    let (status, body) = post(&app, "/api/v1/fold", json!({"player_id": "0xbbb"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "finished");
    assert_eq!(body["players"][1]["is_active"], false);
    assert_eq!(body["players"][1]["has_folded"], true);

    let (status, body) = post(&app, "/api/v1/reset", json!({"caller": OWNER})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "waiting_for_players");
    assert_eq!(body["player_count"], 0);
    assert_eq!(body["pot"], 0);
}

#[tokio::test]
async fn community_cards_appear_as_rounds_close() {
    let app = create_test_app();
    join(&app, "0xaaa").await;
    join(&app, "0xbbb").await;

    let (_, body) = get(&app, "/api/v1/community-cards").await;
    assert_eq!(body["revealed"], 0);

    bet(&app, "0xaaa", 10).await;
    bet(&app, "0xbbb", 10).await;

    let (status, body) = get(&app, "/api/v1/community-cards").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revealed"], 3);
    let first = body["cards"][0].as_object().unwrap();
    assert_eq!(first["ciphertext"].as_str().unwrap().len(), 64);
    assert!(first["nonce"].is_u64());
}

#[tokio::test]
async fn player_listing_matches_seat_order() {
    let app = create_test_app();
    join(&app, "0xccc").await;
    join(&app, "0xaaa").await;

    let (status, body) = get(&app, "/api/v1/players").await;
    assert_eq!(status, StatusCode::OK);
    let players = body.as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0]["id"], "0xccc");
    assert_eq!(players[0]["seat"], 0);
    assert_eq!(players[1]["id"], "0xaaa");
    assert_eq!(players[1]["seat"], 1);
}

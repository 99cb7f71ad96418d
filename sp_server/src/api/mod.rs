//! HTTP API for the sealed poker table server.
//!
//! The API mirrors the engine's read/write split: a query surface
//! returning the full game and player views, and a command surface for
//! the four table actions. Every command answers with the snapshot as of
//! its commit, so callers never observe a half-applied action.
//!
//! # Endpoints
//!
//! ```text
//! GET  /health                       - Server health status
//! GET  /api/v1/game                  - Full game snapshot
//! GET  /api/v1/players               - All seated players
//! GET  /api/v1/players/{seat}        - One player by seat index
//! GET  /api/v1/players/{id}/cards    - A player's own sealed hole cards
//! GET  /api/v1/community-cards       - Revealed community card tokens
//! POST /api/v1/join                  - Seat a player
//! POST /api/v1/bet                   - Place a bet with a commitment
//! POST /api/v1/fold                  - Forfeit the hand
//! POST /api/v1/reset                 - Owner-gated table reset
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production,
//! configure appropriate origins, methods, and headers.

pub mod game;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use sealed_poker::TableHandle;
use serde_json::json;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; the handle is a cheap channel sender.
#[derive(Clone)]
pub struct AppState {
    pub table: TableHandle,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/game", get(game::get_game))
        .route("/players", get(game::list_players))
        .route("/players/{seat}", get(game::get_player))
        .route("/players/{player_id}/cards", get(game::get_hole_cards))
        .route("/community-cards", get(game::get_community_cards))
        .route("/join", post(game::join))
        .route("/bet", post(game::place_bet))
        .route("/fold", post(game::fold))
        .route("/reset", post(game::reset));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", v1_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` while the table actor answers queries, or
/// `503 Service Unavailable` once it is gone.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let table_alive = state.table.snapshot().await.is_ok();

    let status_code = if table_alive {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if table_alive { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "table": table_alive,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}

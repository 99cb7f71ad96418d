//! Table command and query handlers.
//!
//! Commands respond with the committed [`GameSnapshot`]; rejections come
//! back as `{"error": "..."}` with a status code per failure kind.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sealed_poker::{
    GameError,
    entities::{BetCommitment, Chips, GameSnapshot, PlayerId, PlayerKey, PlayerSnapshot, SealedCard},
    table::CommandError,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::metrics;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub player_id: String,
    pub public_key: String,
}

#[derive(Debug, Deserialize)]
pub struct BetRequest {
    pub player_id: String,
    pub amount: Chips,
    pub commitment: String,
}

#[derive(Debug, Deserialize)]
pub struct FoldRequest {
    pub player_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub caller: String,
}

#[derive(Debug, Serialize)]
pub struct CommunityCardsResponse {
    pub revealed: usize,
    pub cards: Vec<SealedCard>,
}

#[derive(Debug, Serialize)]
pub struct HoleCardsResponse {
    pub player_id: PlayerId,
    pub cards: Vec<SealedCard>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn reject(err: CommandError) -> ApiError {
    (status_for(&err), Json(ErrorResponse { error: err.to_string() }))
}

fn not_found(what: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: what.to_string(),
        }),
    )
}

fn status_for(err: &CommandError) -> StatusCode {
    match err {
        CommandError::Closed => StatusCode::SERVICE_UNAVAILABLE,
        CommandError::Game(game) => match game {
            GameError::InsufficientValue => StatusCode::BAD_REQUEST,
            GameError::Unauthorized => StatusCode::FORBIDDEN,
            GameError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GameError::DuplicateIdentity
            | GameError::TableFull
            | GameError::NotYourTurn
            | GameError::GameNotFinished
            | GameError::WrongState(_) => StatusCode::CONFLICT,
        },
    }
}

/// Full game snapshot: phase, pot, turn, and all seated players.
pub async fn get_game(State(state): State<AppState>) -> Result<Json<GameSnapshot>, ApiError> {
    metrics::query_served("game");
    state.table.snapshot().await.map(Json).map_err(reject)
}

/// All seated players in seat order.
pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerSnapshot>>, ApiError> {
    metrics::query_served("players");
    let snapshot = state.table.snapshot().await.map_err(reject)?;
    Ok(Json(snapshot.players))
}

/// One player by seat index.
pub async fn get_player(
    State(state): State<AppState>,
    Path(seat): Path<usize>,
) -> Result<Json<PlayerSnapshot>, ApiError> {
    metrics::query_served("player");
    state
        .table
        .player(seat)
        .await
        .map_err(reject)?
        .map(Json)
        .ok_or_else(|| not_found("no player at that seat"))
}

/// A player's own sealed hole cards.
pub async fn get_hole_cards(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<HoleCardsResponse>, ApiError> {
    metrics::query_served("hole_cards");
    let player_id = PlayerId::new(&player_id);
    state
        .table
        .hole_cards(player_id.clone())
        .await
        .map_err(reject)?
        .map(|cards| Json(HoleCardsResponse { player_id, cards }))
        .ok_or_else(|| not_found("not a player or cards not dealt"))
}

/// Revealed community card tokens, in board order.
pub async fn get_community_cards(
    State(state): State<AppState>,
) -> Result<Json<CommunityCardsResponse>, ApiError> {
    metrics::query_served("community_cards");
    let cards = state.table.community_cards().await.map_err(reject)?;
    Ok(Json(CommunityCardsResponse {
        revealed: cards.len(),
        cards,
    }))
}

/// Seat a player at the table.
pub async fn join(
    State(state): State<AppState>,
    Json(req): Json<JoinRequest>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let result = state
        .table
        .join(PlayerId::new(&req.player_id), PlayerKey::new(req.public_key))
        .await;
    metrics::command_result("join", result.is_ok());
    result.map(Json).map_err(reject)
}

/// Place a bet. The clear amount rides with an opaque commitment the
/// engine stores untouched.
pub async fn place_bet(
    State(state): State<AppState>,
    Json(req): Json<BetRequest>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let result = state
        .table
        .place_bet(
            PlayerId::new(&req.player_id),
            req.amount,
            BetCommitment::new(req.commitment),
        )
        .await;
    metrics::command_result("bet", result.is_ok());
    result.map(Json).map_err(reject)
}

/// Forfeit the hand.
pub async fn fold(
    State(state): State<AppState>,
    Json(req): Json<FoldRequest>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let result = state.table.fold(PlayerId::new(&req.player_id)).await;
    metrics::command_result("fold", result.is_ok());
    result.map(Json).map_err(reject)
}

/// Owner-gated reset of a finished game.
pub async fn reset(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let result = state.table.reset(PlayerId::new(&req.caller)).await;
    metrics::command_result("reset", result.is_ok());
    result.map(Json).map_err(reject)
}

//! Game scorekeeping routes.

use crate::error::ApiResult;
use crate::services::games::{
    CreateGameRequest, Game, GameService, RoundRequest, UpdateGameRequest,
};
use crate::session::Session;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

fn games(state: &AppState) -> GameService {
    GameService::new(state.documents.clone())
}

/// POST /api/games
pub async fn create_game(
    State(state): State<AppState>,
    Session(session): Session,
    Json(request): Json<CreateGameRequest>,
) -> ApiResult<impl IntoResponse> {
    let game = games(&state).create(&session, request).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// GET /api/games
pub async fn list_games(
    State(state): State<AppState>,
    Session(session): Session,
) -> ApiResult<Json<serde_json::Value>> {
    let list = games(&state).list(&session).await?;
    Ok(Json(json!({ "games": list })))
}

/// GET /api/games/:id
pub async fn get_game(
    State(state): State<AppState>,
    Session(session): Session,
    Path(game_id): Path<String>,
) -> ApiResult<Json<Game>> {
    let game = games(&state).get(&session, &game_id).await?;
    Ok(Json(game))
}

/// PUT /api/games/:id
pub async fn update_game(
    State(state): State<AppState>,
    Session(session): Session,
    Path(game_id): Path<String>,
    Json(request): Json<UpdateGameRequest>,
) -> ApiResult<Json<Game>> {
    let game = games(&state).update(&session, &game_id, request).await?;
    Ok(Json(game))
}

/// DELETE /api/games/:id
pub async fn delete_game(
    State(state): State<AppState>,
    Session(session): Session,
    Path(game_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    games(&state).delete(&session, &game_id).await?;
    Ok(Json(json!({ "message": "Game deleted successfully" })))
}

/// POST /api/games/:id/rounds
pub async fn add_round(
    State(state): State<AppState>,
    Session(session): Session,
    Path(game_id): Path<String>,
    Json(request): Json<RoundRequest>,
) -> ApiResult<Json<Game>> {
    let game = games(&state).add_round(&session, &game_id, request).await?;
    Ok(Json(game))
}

/// GET /api/games/:id/totals
pub async fn game_totals(
    State(state): State<AppState>,
    Session(session): Session,
    Path(game_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let game = games(&state).get(&session, &game_id).await?;
    Ok(Json(json!({
        "totals": game.player_totals(),
        "targetScore": game.target_score,
        "isComplete": game.is_complete,
    })))
}

/// PUT /api/games/:id/rounds/:round_id
pub async fn edit_round(
    State(state): State<AppState>,
    Session(session): Session,
    Path((game_id, round_id)): Path<(String, String)>,
    Json(request): Json<RoundRequest>,
) -> ApiResult<Json<Game>> {
    let game = games(&state)
        .edit_round(&session, &game_id, &round_id, request)
        .await?;
    Ok(Json(game))
}

/// DELETE /api/games/:id/rounds/:round_id
pub async fn delete_round(
    State(state): State<AppState>,
    Session(session): Session,
    Path((game_id, round_id)): Path<(String, String)>,
) -> ApiResult<Json<Game>> {
    let game = games(&state)
        .delete_round(&session, &game_id, &round_id)
        .await?;
    Ok(Json(game))
}

/// PUT /api/games/:id/complete
pub async fn complete_game(
    State(state): State<AppState>,
    Session(session): Session,
    Path(game_id): Path<String>,
) -> ApiResult<Json<Game>> {
    let game = games(&state).complete(&session, &game_id).await?;
    Ok(Json(game))
}

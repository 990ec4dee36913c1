//! JSON handlers for players, battles and statistics

use crate::api::error::ApiError;
use crate::service::AppState;
use crate::types::{
    Battle, BattleId, BattlePreview, NewBattle, NewPlayer, Player, PlayerId, PlayerStanding,
    PreviewRequest, Statistics,
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

type ApiResult<T> = Result<T, ApiError>;

/// Query parameters for the recent battles endpoint
#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<usize>,
}

pub async fn list_players(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PlayerStanding>>> {
    Ok(Json(state.ranking().list_rankings().await?))
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewPlayer>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Player>)> {
    let Json(request) = payload?;
    let player = state.ranking().create_player(request).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<PlayerId>,
) -> ApiResult<Json<Player>> {
    Ok(Json(state.ranking().get_player(player_id).await?))
}

pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<PlayerId>,
) -> ApiResult<StatusCode> {
    state.ranking().delete_player(player_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_battles(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Battle>>> {
    Ok(Json(state.ranking().list_battles().await?))
}

pub async fn recent_battles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentParams>,
) -> ApiResult<Json<Vec<Battle>>> {
    let limit = params
        .limit
        .filter(|&limit| limit > 0)
        .unwrap_or(state.config().service.recent_battles_default_limit);
    debug!("Recent battles requested, limit {}", limit);

    Ok(Json(state.ranking().recent_battles(limit).await?))
}

pub async fn create_battle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewBattle>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Battle>)> {
    let Json(request) = payload?;
    let battle = state.ranking().record_battle(request).await?;
    Ok((StatusCode::CREATED, Json(battle)))
}

pub async fn preview_battle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> ApiResult<Json<BattlePreview>> {
    let Json(request) = payload?;
    Ok(Json(state.ranking().preview_battle(request).await?))
}

pub async fn get_battle(
    State(state): State<Arc<AppState>>,
    Path(battle_id): Path<BattleId>,
) -> ApiResult<Json<Battle>> {
    Ok(Json(state.ranking().get_battle(battle_id).await?))
}

pub async fn delete_battle(
    State(state): State<Arc<AppState>>,
    Path(battle_id): Path<BattleId>,
) -> ApiResult<StatusCode> {
    state.ranking().delete_battle(battle_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn statistics(State(state): State<Arc<AppState>>) -> ApiResult<Json<Statistics>> {
    Ok(Json(state.ranking().statistics().await?))
}

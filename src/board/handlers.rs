use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::auth::jwt::AuthUser;
use crate::error::{internal, ApiError};
use crate::state::AppState;
use crate::volunteers::dto::Pagination;

use super::dto::{CreateBoardEntryRequest, UpdateBoardEntryRequest};
use super::repo::{self, BoardEntry};

/// Listing the board requires no token: it is the public face of the system.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/board", get(list_board))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/board", post(create_entry))
        .route("/board/:id", put(update_entry).delete(deactivate_entry))
}

#[instrument(skip(state))]
pub async fn list_board(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<BoardEntry>>, ApiError> {
    let (limit, offset) = p.clamped();
    let rows = repo::list(&state.db, limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<CreateBoardEntryRequest>,
) -> Result<(StatusCode, Json<BoardEntry>), ApiError> {
    if payload.job_name.trim().is_empty() || payload.organization.trim().is_empty() {
        return Err(ApiError::Validation(
            "job_name and organization are required".into(),
        ));
    }

    let row = repo::create(
        &state.db,
        &payload.job_name,
        &payload.organization,
        payload.total_volunteers,
        payload.closed_at,
    )
    .await
    .map_err(internal)?;

    info!(entry_id = row.id, "board entry created");
    Ok((StatusCode::CREATED, Json(row)))
}

#[instrument(skip(state, payload))]
pub async fn update_entry(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBoardEntryRequest>,
) -> Result<Json<BoardEntry>, ApiError> {
    let row = repo::update(
        &state.db,
        id,
        payload.job_name.as_deref(),
        payload.organization.as_deref(),
        payload.total_volunteers,
        payload.closed_at,
    )
    .await
    .map_err(internal)?
    .ok_or(ApiError::NotFound("board entry"))?;

    info!(entry_id = id, "board entry updated");
    Ok(Json(row))
}

#[instrument(skip(state))]
pub async fn deactivate_entry(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let removed = repo::deactivate(&state.db, id).await.map_err(internal)?;
    if !removed {
        return Err(ApiError::NotFound("board entry"));
    }
    info!(entry_id = id, "board entry deactivated");
    Ok(Json(json!({ "message": "board entry deactivated" })))
}

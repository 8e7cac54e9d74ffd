use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{info, instrument};

use crate::auth::jwt::AuthUser;
use crate::error::{internal, ApiError};
use crate::state::AppState;
use crate::volunteers::dto::Pagination;

use super::dto::CreateStatusRequest;
use super::repo::{self, StatusEntry};

pub fn routes() -> Router<AppState> {
    Router::new().route("/statuses", get(list_statuses).post(create_status))
}

#[instrument(skip(state))]
pub async fn list_statuses(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<StatusEntry>>, ApiError> {
    let (limit, offset) = p.clamped();
    let rows = repo::list(&state.db, limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_status(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<CreateStatusRequest>,
) -> Result<(StatusCode, Json<StatusEntry>), ApiError> {
    if payload.status.trim().is_empty() {
        return Err(ApiError::Validation("status is required".into()));
    }
    if payload.job_id <= 0 || payload.volunteer_id <= 0 {
        return Err(ApiError::Validation(
            "job_id and volunteer_id are required".into(),
        ));
    }

    let row = repo::create(
        &state.db,
        payload.job_id,
        payload.volunteer_id,
        payload.openings,
        &payload.duration,
        &payload.status,
    )
    .await
    .map_err(internal)?;

    info!(status_id = row.id, job_id = row.job_id, "status recorded");
    Ok((StatusCode::CREATED, Json(row)))
}

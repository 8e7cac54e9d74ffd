use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{info, instrument};

use crate::auth::jwt::AuthUser;
use crate::error::{internal, ApiError};
use crate::state::AppState;
use crate::volunteers::dto::Pagination;

use super::dto::CreateParticipationRequest;
use super::repo::{self, Participation};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/participations",
        get(list_participations).post(create_participation),
    )
}

#[instrument(skip(state))]
pub async fn list_participations(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Participation>>, ApiError> {
    let (limit, offset) = p.clamped();
    let rows = repo::list(&state.db, limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_participation(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<CreateParticipationRequest>,
) -> Result<(StatusCode, Json<Participation>), ApiError> {
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
        &payload.activity,
    )
    .await
    .map_err(internal)?;

    info!(
        participation_id = row.id,
        job_id = row.job_id,
        volunteer_id = row.volunteer_id,
        "participation created"
    );
    Ok((StatusCode::CREATED, Json(row)))
}

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::auth::jwt::AuthUser;
use crate::error::{internal, ApiError};
use crate::state::AppState;
use crate::volunteers::dto::Pagination;

use super::dto::{CreateJobRequest, UpdateJobRequest};
use super::repo::{self, Job};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/:id", get(get_job).put(update_job).delete(deactivate_job))
}

#[instrument(skip(state))]
pub async fn list_jobs(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let (limit, offset) = p.clamped();
    let jobs = repo::list(&state.db, limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(jobs))
}

#[instrument(skip(state))]
pub async fn get_job(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Job>, ApiError> {
    let job = repo::find_by_id(&state.db, id)
        .await
        .map_err(internal)?
        .ok_or(ApiError::NotFound("job"))?;
    Ok(Json(job))
}

#[instrument(skip(state, payload))]
pub async fn create_job(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), ApiError> {
    if payload.name.trim().is_empty() || payload.organization.trim().is_empty() {
        return Err(ApiError::Validation(
            "name and organization are required".into(),
        ));
    }

    let job = repo::create(
        &state.db,
        &payload.name,
        &payload.organization,
        &payload.location,
        payload.starts_at,
        payload.ends_at,
    )
    .await
    .map_err(internal)?;

    info!(job_id = job.id, "job created");
    Ok((StatusCode::CREATED, Json(job)))
}

#[instrument(skip(state, payload))]
pub async fn update_job(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateJobRequest>,
) -> Result<Json<Job>, ApiError> {
    let job = repo::update(
        &state.db,
        id,
        payload.name.as_deref(),
        payload.organization.as_deref(),
        payload.location.as_deref(),
        payload.starts_at,
        payload.ends_at,
    )
    .await
    .map_err(internal)?
    .ok_or(ApiError::NotFound("job"))?;

    info!(job_id = id, "job updated");
    Ok(Json(job))
}

#[instrument(skip(state))]
pub async fn deactivate_job(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let removed = repo::deactivate(&state.db, id).await.map_err(internal)?;
    if !removed {
        return Err(ApiError::NotFound("job"));
    }
    info!(job_id = id, "job deactivated");
    Ok(Json(json!({ "message": "job deactivated" })))
}

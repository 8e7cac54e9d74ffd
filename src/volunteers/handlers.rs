use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::auth::handlers::is_valid_email;
use crate::auth::jwt::AuthUser;
use crate::auth::password::hash_password;
use crate::error::{internal, ApiError};
use crate::state::AppState;

use super::dto::{Pagination, UpdateVolunteerRequest};
use super::repo::{self, Volunteer};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/volunteers", get(list_volunteers))
        .route(
            "/volunteers/:id",
            get(get_volunteer)
                .put(update_volunteer)
                .delete(deactivate_volunteer),
        )
}

#[instrument(skip(state))]
pub async fn list_volunteers(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Volunteer>>, ApiError> {
    let (limit, offset) = p.clamped();
    let volunteers = repo::list(&state.db, limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(volunteers))
}

#[instrument(skip(state))]
pub async fn get_volunteer(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Volunteer>, ApiError> {
    let volunteer = repo::find_by_id(&state.db, id)
        .await
        .map_err(internal)?
        .ok_or(ApiError::NotFound("volunteer"))?;
    Ok(Json(volunteer))
}

#[instrument(skip(state, payload))]
pub async fn update_volunteer(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
    Json(mut payload): Json<UpdateVolunteerRequest>,
) -> Result<Json<Volunteer>, ApiError> {
    payload.email = payload.email.map(|e| e.trim().to_lowercase());

    if let Some(email) = payload.email.as_deref() {
        if !is_valid_email(email) {
            warn!(%email, "invalid email");
            return Err(ApiError::Validation("invalid email".into()));
        }
        // Same duplicate handling as registration; a unique-constraint hit
        // must not surface as an internal error.
        if let Some(existing) = repo::find_by_email(&state.db, email)
            .await
            .map_err(internal)?
        {
            if existing.id != id {
                warn!(%email, "email already registered");
                return Err(ApiError::Conflict("email already registered".into()));
            }
        }
    }

    // Rehash only when the caller supplied a replacement secret.
    let password_hash = match payload.password.as_deref() {
        Some(p) if p.len() < 8 => {
            return Err(ApiError::Validation("password too short".into()))
        }
        Some(p) => Some(hash_password(p).map_err(internal)?),
        None => None,
    };

    let volunteer = repo::update(
        &state.db,
        id,
        payload.name.as_deref(),
        payload.email.as_deref(),
        password_hash.as_deref(),
        payload.phone.as_deref(),
        payload.address.as_deref(),
    )
    .await
    .map_err(internal)?
    .ok_or(ApiError::NotFound("volunteer"))?;

    info!(volunteer_id = id, "volunteer updated");
    Ok(Json(volunteer))
}

#[instrument(skip(state))]
pub async fn deactivate_volunteer(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let removed = repo::deactivate(&state.db, id).await.map_err(internal)?;
    if !removed {
        return Err(ApiError::NotFound("volunteer"));
    }
    info!(volunteer_id = id, "volunteer deactivated");
    Ok(Json(json!({ "message": "volunteer deactivated" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, JwtConfig};
    use sqlx::PgPool;
    use std::sync::Arc;

    fn state_with(db: PgPool) -> AppState {
        let config = Arc::new(AppConfig {
            database_url: String::new(),
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_seconds: 3600,
            },
        });
        AppState::from_parts(db, config)
    }

    #[sqlx::test]
    async fn update_rejects_email_already_registered(db: PgPool) -> anyhow::Result<()> {
        repo::create(&db, "Ana", "ana@x.com", "$argon2id$fake-a", None, None).await?;
        let bea = repo::create(&db, "Bea", "bea@x.com", "$argon2id$fake-b", None, None).await?;

        let payload = UpdateVolunteerRequest {
            name: None,
            email: Some("ana@x.com".into()),
            password: None,
            phone: None,
            address: None,
        };
        let err = update_volunteer(
            State(state_with(db)),
            AuthUser(bea.id),
            Path(bea.id),
            Json(payload),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::CONFLICT);
        Ok(())
    }

    #[sqlx::test]
    async fn update_keeps_own_email_without_conflict(db: PgPool) -> anyhow::Result<()> {
        let bea = repo::create(&db, "Bea", "bea@x.com", "$argon2id$fake-b", None, None).await?;

        let payload = UpdateVolunteerRequest {
            name: Some("Beatriz".into()),
            email: Some("bea@x.com".into()),
            password: None,
            phone: None,
            address: None,
        };
        let Json(updated) = update_volunteer(
            State(state_with(db)),
            AuthUser(bea.id),
            Path(bea.id),
            Json(payload),
        )
        .await
        .expect("update own email");
        assert_eq!(updated.name, "Beatriz");
        assert_eq!(updated.email, "bea@x.com");
        Ok(())
    }
}

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::auth::dto::{AuthResponse, LoginRequest, PublicAccount, RegisterRequest};
use crate::auth::jwt::{AuthUser, JwtKeys};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{internal, ApiError};
use crate::state::AppState;
use crate::volunteers::repo;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required".into()));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("password too short".into()));
    }

    if repo::find_by_email(&state.db, &payload.email)
        .await
        .map_err(internal)?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("email already registered".into()));
    }

    // The secret is hashed exactly once, here.
    let hash = hash_password(&payload.password).map_err(internal)?;

    let volunteer = repo::create(
        &state.db,
        &payload.name,
        &payload.email,
        &hash,
        payload.phone.as_deref(),
        payload.address.as_deref(),
    )
    .await
    .map_err(internal)?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys
        .sign(volunteer.id, &volunteer.name, &volunteer.email)
        .map_err(internal)?;

    info!(user_id = volunteer.id, email = %volunteer.email, "volunteer registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            auth: true,
            message: "registration successful".into(),
            token,
            account: volunteer.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("email and password are required".into()));
    }

    // Unknown email and wrong password must be indistinguishable to the
    // caller, so both paths fall through to BadCredentials.
    let volunteer = match repo::find_by_email(&state.db, &payload.email)
        .await
        .map_err(internal)?
    {
        Some(v) => v,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::BadCredentials);
        }
    };

    if !verify_password(&payload.password, &volunteer.password_hash) {
        warn!(user_id = volunteer.id, "login invalid password");
        return Err(ApiError::BadCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys
        .sign(volunteer.id, &volunteer.name, &volunteer.email)
        .map_err(internal)?;

    info!(user_id = volunteer.id, email = %volunteer.email, "volunteer logged in");
    Ok(Json(AuthResponse {
        auth: true,
        message: "login successful".into(),
        token,
        account: volunteer.into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicAccount>, ApiError> {
    let volunteer = repo::find_by_id(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or(ApiError::NotFound("volunteer"))?;
    Ok(Json(volunteer.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_emails() {
        assert!(is_valid_email("vol1@x.com"));
        assert!(is_valid_email("a.b+c@example.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spaces in@x.com"));
        assert!(!is_valid_email("nodot@host"));
    }
}

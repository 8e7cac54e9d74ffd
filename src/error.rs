use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Client-facing error taxonomy. Every handler funnels failures through this
/// type so that status codes and body shapes stay uniform across modules.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    /// Unknown email and wrong password collapse into one message so the
    /// login endpoint cannot be used to enumerate accounts.
    #[error("email or password incorrect")]
    BadCredentials,
    #[error("token missing")]
    TokenMissing,
    #[error("token invalid, log in again")]
    TokenInvalid,
    #[error("token expired, log in again")]
    TokenExpired,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("internal server error")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::BadCredentials
            | ApiError::TokenMissing
            | ApiError::TokenInvalid
            | ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn is_auth(&self) -> bool {
        matches!(
            self,
            ApiError::BadCredentials
                | ApiError::TokenMissing
                | ApiError::TokenInvalid
                | ApiError::TokenExpired
        )
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    auth: Option<bool>,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref e) = self {
            // Log the cause server-side; the client only sees a generic body.
            error!(error = %e, "internal error");
        }
        let body = ErrorBody {
            auth: self.is_auth().then_some(false),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

pub fn internal<E: Into<anyhow::Error>>(e: E) -> ApiError {
    ApiError::Internal(e.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::BadCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::TokenMissing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::TokenInvalid.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound("job").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Conflict("dup".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_message_is_generic() {
        let err = ApiError::Internal(anyhow::anyhow!("connection refused to 10.0.0.3"));
        assert_eq!(err.to_string(), "internal server error");
    }

    #[test]
    fn auth_errors_flag_auth_false() {
        assert!(ApiError::BadCredentials.is_auth());
        assert!(ApiError::TokenExpired.is_auth());
        assert!(!ApiError::NotFound("volunteer").is_auth());
        assert!(!ApiError::Validation("empty".into()).is_auth());
    }

    #[test]
    fn token_messages_are_distinct() {
        let missing = ApiError::TokenMissing.to_string();
        let invalid = ApiError::TokenInvalid.to_string();
        let expired = ApiError::TokenExpired.to_string();
        assert!(missing.contains("missing"));
        assert!(invalid.contains("invalid"));
        assert!(expired.contains("expired"));
        assert_ne!(invalid, expired);
    }
}

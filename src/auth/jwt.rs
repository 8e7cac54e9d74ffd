use std::time::Duration;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::config::JwtConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Signed token payload: subject id plus the display fields the original
/// login flow embeds, with issuance and expiry timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub name: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// Verification failure, split so callers can tell an expired session from
/// a bad token and answer with different messages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token invalid")]
    Invalid,
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
            ttl_seconds,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            ttl: Duration::from_secs(ttl_seconds.max(0) as u64),
        }
    }
}

impl JwtKeys {
    /// Sign a token with an explicit TTL in seconds. Negative values produce
    /// an already-expired token, which the tests lean on.
    pub fn sign_with_ttl(
        &self,
        id: i64,
        name: &str,
        email: &str,
        ttl_seconds: i64,
    ) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(ttl_seconds);
        let claims = Claims {
            sub: id,
            name: name.to_string(),
            email: email.to_string(),
            iat: now.unix_timestamp(),
            exp: exp.unix_timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = id, "jwt signed");
        Ok(token)
    }

    /// Sign with the configured TTL.
    pub fn sign(&self, id: i64, name: &str, email: &str) -> anyhow::Result<String> {
        self.sign_with_ttl(id, name, email, self.ttl.as_secs() as i64)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        // Expiry is exact; the default 60s leeway would keep freshly expired
        // tokens alive.
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        let claims = data.claims;
        // A signed-but-corrupted claim set must not pass the gate.
        if claims.sub <= 0 || claims.exp <= 0 {
            return Err(TokenError::Invalid);
        }
        debug!(user_id = claims.sub, "jwt verified");
        Ok(claims)
    }
}

/// Extractor that gates protected handlers: the request only reaches the
/// handler body once the token verified, carrying the subject id.
#[derive(Debug)]
pub struct AuthUser(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        // `Authorization: Bearer` is the primary convention; the legacy
        // x-access-token header is still honored for old clients.
        let bearer = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("bearer ")));
        let legacy = parts
            .headers
            .get("x-access-token")
            .and_then(|v| v.to_str().ok());

        let token = bearer.or(legacy).ok_or(ApiError::TokenMissing)?;

        match keys.verify(token) {
            Ok(claims) => Ok(AuthUser(claims.sub)),
            Err(TokenError::Expired) => {
                warn!("expired token");
                Err(ApiError::TokenExpired)
            }
            Err(TokenError::Invalid) => {
                warn!("invalid token");
                Err(ApiError::TokenInvalid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn make_keys() -> JwtKeys {
        JwtKeys::from_ref(&AppState::fake())
    }

    #[tokio::test]
    async fn sign_and_verify_roundtrip() {
        let keys = make_keys();
        let token = keys.sign(7, "Ana Souza", "ana@x.com").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.name, "Ana Souza");
        assert_eq!(claims.email, "ana@x.com");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn two_logins_yield_independent_valid_tokens() {
        let keys = make_keys();
        let a = keys.sign(7, "Ana", "ana@x.com").expect("sign a");
        let b = keys.sign(7, "Ana", "ana@x.com").expect("sign b");
        assert!(keys.verify(&a).is_ok());
        assert!(keys.verify(&b).is_ok());
    }

    #[tokio::test]
    async fn past_ttl_token_is_expired_not_invalid() {
        let keys = make_keys();
        // Two hours in the past, well beyond any clock skew.
        let token = keys
            .sign_with_ttl(7, "Ana", "ana@x.com", -7200)
            .expect("sign");
        assert_eq!(keys.verify(&token), Err(TokenError::Expired));
    }

    #[tokio::test]
    async fn foreign_secret_is_invalid() {
        let keys = make_keys();
        let mut other = make_keys();
        other.decoding = DecodingKey::from_secret(b"a-different-secret");
        let token = keys.sign(7, "Ana", "ana@x.com").expect("sign");
        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[tokio::test]
    async fn tampered_token_is_invalid() {
        let keys = make_keys();
        let token = keys.sign(7, "Ana", "ana@x.com").expect("sign");
        let mut tampered = token.clone();
        tampered.push('x');
        assert_eq!(keys.verify(&tampered), Err(TokenError::Invalid));
        assert_eq!(keys.verify("not.a.jwt"), Err(TokenError::Invalid));
    }

    #[tokio::test]
    async fn signed_claim_without_subject_is_invalid() {
        let keys = make_keys();
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: 0,
            name: "ghost".into(),
            email: "ghost@x.com".into(),
            iat: now.unix_timestamp(),
            exp: (now + TimeDuration::hours(1)).unix_timestamp(),
            iss: keys.issuer.clone(),
            aud: keys.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).expect("encode");
        assert_eq!(keys.verify(&token), Err(TokenError::Invalid));
    }

    async fn extract(state: &AppState, req: Request<()>) -> Result<AuthUser, ApiError> {
        let (mut parts, _) = req.into_parts();
        AuthUser::from_request_parts(&mut parts, state).await
    }

    #[tokio::test]
    async fn extractor_rejects_missing_token() {
        let state = AppState::fake();
        let req = Request::builder().uri("/me").body(()).unwrap();
        let err = extract(&state, req).await.unwrap_err();
        assert_eq!(err.to_string(), "token missing");
    }

    #[tokio::test]
    async fn extractor_rejects_expired_token_with_expired_message() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let token = keys
            .sign_with_ttl(7, "Ana", "ana@x.com", -7200)
            .expect("sign");
        let req = Request::builder()
            .uri("/me")
            .header("Authorization", format!("Bearer {token}"))
            .body(())
            .unwrap();
        let err = extract(&state, req).await.unwrap_err();
        assert!(err.to_string().contains("expired"));
    }

    #[tokio::test]
    async fn extractor_rejects_garbage_token_as_invalid() {
        let state = AppState::fake();
        let req = Request::builder()
            .uri("/me")
            .header("Authorization", "Bearer garbage")
            .body(())
            .unwrap();
        let err = extract(&state, req).await.unwrap_err();
        assert!(err.to_string().contains("invalid"));
    }

    #[tokio::test]
    async fn extractor_attaches_subject_id() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let token = keys.sign(42, "Ana", "ana@x.com").expect("sign");
        let req = Request::builder()
            .uri("/me")
            .header("Authorization", format!("Bearer {token}"))
            .body(())
            .unwrap();
        let AuthUser(id) = extract(&state, req).await.expect("extract");
        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn extractor_accepts_legacy_header() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let token = keys.sign(42, "Ana", "ana@x.com").expect("sign");
        let req = Request::builder()
            .uri("/me")
            .header("x-access-token", token)
            .body(())
            .unwrap();
        let AuthUser(id) = extract(&state, req).await.expect("extract");
        assert_eq!(id, 42);
    }
}

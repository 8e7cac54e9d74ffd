use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::volunteers::repo::Volunteer;

/// Request body for volunteer registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after login or register.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub auth: bool,
    pub message: String,
    pub token: String,
    pub account: PublicAccount,
}

/// Public part of an account returned to the client. Never carries the hash.
#[derive(Debug, Serialize)]
pub struct PublicAccount {
    pub id: i64,
    pub public_id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<Volunteer> for PublicAccount {
    fn from(v: Volunteer) -> Self {
        Self {
            id: v.id,
            public_id: v.public_id,
            name: v.name,
            email: v.email,
        }
    }
}

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Volunteer record. Volunteers are the login-capable accounts: the auth
/// module reads and writes the same rows through this repo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Volunteer {
    pub id: i64,
    pub public_id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub active: bool,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str =
    "id, public_id, name, email, password_hash, phone, address, active, created_at";

/// Find an active volunteer by login email.
pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<Volunteer>> {
    let volunteer = sqlx::query_as::<_, Volunteer>(&format!(
        "SELECT {COLUMNS} FROM volunteers WHERE email = $1 AND active"
    ))
    .bind(email)
    .fetch_optional(db)
    .await?;
    Ok(volunteer)
}

pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Volunteer>> {
    let volunteer = sqlx::query_as::<_, Volunteer>(&format!(
        "SELECT {COLUMNS} FROM volunteers WHERE id = $1 AND active"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(volunteer)
}

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<Volunteer>> {
    let rows = sqlx::query_as::<_, Volunteer>(&format!(
        "SELECT {COLUMNS} FROM volunteers WHERE active \
         ORDER BY created_at DESC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Create a volunteer with an already-hashed secret.
pub async fn create(
    db: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
    phone: Option<&str>,
    address: Option<&str>,
) -> anyhow::Result<Volunteer> {
    let volunteer = sqlx::query_as::<_, Volunteer>(&format!(
        "INSERT INTO volunteers (name, email, password_hash, phone, address) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
    ))
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(phone)
    .bind(address)
    .fetch_one(db)
    .await?;
    Ok(volunteer)
}

/// Update profile fields. `password_hash` is only written when a new secret
/// was supplied; existing hashes are never touched otherwise.
pub async fn update(
    db: &PgPool,
    id: i64,
    name: Option<&str>,
    email: Option<&str>,
    password_hash: Option<&str>,
    phone: Option<&str>,
    address: Option<&str>,
) -> anyhow::Result<Option<Volunteer>> {
    let volunteer = sqlx::query_as::<_, Volunteer>(&format!(
        "UPDATE volunteers SET \
            name = COALESCE($2, name), \
            email = COALESCE($3, email), \
            password_hash = COALESCE($4, password_hash), \
            phone = COALESCE($5, phone), \
            address = COALESCE($6, address) \
         WHERE id = $1 AND active RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(phone)
    .bind(address)
    .fetch_optional(db)
    .await?;
    Ok(volunteer)
}

/// Soft-delete a volunteer and every participation that references it, as
/// one transaction: either both updates commit or neither does. Returns
/// true iff the volunteer row itself was matched.
pub async fn deactivate(db: &PgPool, id: i64) -> anyhow::Result<bool> {
    let mut tx = db.begin().await?;

    sqlx::query("UPDATE participations SET active = FALSE WHERE volunteer_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let res = sqlx::query("UPDATE volunteers SET active = FALSE WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(res.rows_affected() > 0)
}

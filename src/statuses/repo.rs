use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Ledger entry tracking the state of a job/volunteer pairing. Append-only;
/// history is kept rather than rewritten.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatusEntry {
    pub id: i64,
    pub job_id: i64,
    pub volunteer_id: i64,
    pub openings: i32,
    pub duration: String,
    pub status: String,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = "id, job_id, volunteer_id, openings, duration, status, created_at";

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<StatusEntry>> {
    let rows = sqlx::query_as::<_, StatusEntry>(&format!(
        "SELECT {COLUMNS} FROM statuses ORDER BY created_at DESC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    job_id: i64,
    volunteer_id: i64,
    openings: i32,
    duration: &str,
    status: &str,
) -> anyhow::Result<StatusEntry> {
    let row = sqlx::query_as::<_, StatusEntry>(&format!(
        "INSERT INTO statuses (job_id, volunteer_id, openings, duration, status) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
    ))
    .bind(job_id)
    .bind(volunteer_id)
    .bind(openings)
    .bind(duration)
    .bind(status)
    .fetch_one(db)
    .await?;
    Ok(row)
}

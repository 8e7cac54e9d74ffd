use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// A volunteer's enrollment in a job. Carries its own active flag so that
/// deactivating the volunteer or the job soft-deletes these rows too.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participation {
    pub id: i64,
    pub job_id: i64,
    pub volunteer_id: i64,
    pub openings: i32,
    pub duration: String,
    pub activity: String,
    pub active: bool,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = "id, job_id, volunteer_id, openings, duration, activity, active, created_at";

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<Participation>> {
    let rows = sqlx::query_as::<_, Participation>(&format!(
        "SELECT {COLUMNS} FROM participations WHERE active \
         ORDER BY created_at DESC LIMIT $1 OFFSET $2"
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
    activity: &str,
) -> anyhow::Result<Participation> {
    let row = sqlx::query_as::<_, Participation>(&format!(
        "INSERT INTO participations (job_id, volunteer_id, openings, duration, activity) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
    ))
    .bind(job_id)
    .bind(volunteer_id)
    .bind(openings)
    .bind(duration)
    .bind(activity)
    .fetch_one(db)
    .await?;
    Ok(row)
}

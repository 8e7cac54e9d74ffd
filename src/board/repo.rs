use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Showcase entry for a finished job on the public board.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BoardEntry {
    pub id: i64,
    pub job_name: String,
    pub organization: String,
    pub total_volunteers: i32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub closed_at: Option<OffsetDateTime>,
    pub active: bool,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str =
    "id, job_name, organization, total_volunteers, closed_at, active, created_at";

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<BoardEntry>> {
    let rows = sqlx::query_as::<_, BoardEntry>(&format!(
        "SELECT {COLUMNS} FROM board_entries WHERE active \
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
    job_name: &str,
    organization: &str,
    total_volunteers: i32,
    closed_at: Option<OffsetDateTime>,
) -> anyhow::Result<BoardEntry> {
    let row = sqlx::query_as::<_, BoardEntry>(&format!(
        "INSERT INTO board_entries (job_name, organization, total_volunteers, closed_at) \
         VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
    ))
    .bind(job_name)
    .bind(organization)
    .bind(total_volunteers)
    .bind(closed_at)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i64,
    job_name: Option<&str>,
    organization: Option<&str>,
    total_volunteers: Option<i32>,
    closed_at: Option<OffsetDateTime>,
) -> anyhow::Result<Option<BoardEntry>> {
    let row = sqlx::query_as::<_, BoardEntry>(&format!(
        "UPDATE board_entries SET \
            job_name = COALESCE($2, job_name), \
            organization = COALESCE($3, organization), \
            total_volunteers = COALESCE($4, total_volunteers), \
            closed_at = COALESCE($5, closed_at) \
         WHERE id = $1 AND active RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(job_name)
    .bind(organization)
    .bind(total_volunteers)
    .bind(closed_at)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Soft delete; the board has no dependent rows. Returns true iff matched.
pub async fn deactivate(db: &PgPool, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query("UPDATE board_entries SET active = FALSE WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

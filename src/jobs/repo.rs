use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// A volunteer job offered by an organization.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i64,
    pub name: String,
    pub organization: String,
    pub location: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub starts_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub ends_at: Option<OffsetDateTime>,
    pub active: bool,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = "id, name, organization, location, starts_at, ends_at, active, created_at";

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<Job>> {
    let rows = sqlx::query_as::<_, Job>(&format!(
        "SELECT {COLUMNS} FROM jobs WHERE active \
         ORDER BY created_at DESC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Job>> {
    let job = sqlx::query_as::<_, Job>(&format!(
        "SELECT {COLUMNS} FROM jobs WHERE id = $1 AND active"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(job)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    organization: &str,
    location: &str,
    starts_at: Option<OffsetDateTime>,
    ends_at: Option<OffsetDateTime>,
) -> anyhow::Result<Job> {
    let job = sqlx::query_as::<_, Job>(&format!(
        "INSERT INTO jobs (name, organization, location, starts_at, ends_at) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
    ))
    .bind(name)
    .bind(organization)
    .bind(location)
    .bind(starts_at)
    .bind(ends_at)
    .fetch_one(db)
    .await?;
    Ok(job)
}

pub async fn update(
    db: &PgPool,
    id: i64,
    name: Option<&str>,
    organization: Option<&str>,
    location: Option<&str>,
    starts_at: Option<OffsetDateTime>,
    ends_at: Option<OffsetDateTime>,
) -> anyhow::Result<Option<Job>> {
    let job = sqlx::query_as::<_, Job>(&format!(
        "UPDATE jobs SET \
            name = COALESCE($2, name), \
            organization = COALESCE($3, organization), \
            location = COALESCE($4, location), \
            starts_at = COALESCE($5, starts_at), \
            ends_at = COALESCE($6, ends_at) \
         WHERE id = $1 AND active RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(name)
    .bind(organization)
    .bind(location)
    .bind(starts_at)
    .bind(ends_at)
    .fetch_optional(db)
    .await?;
    Ok(job)
}

/// Soft-delete a job together with its participation rows, in one
/// transaction. Returns true iff the job row was matched.
pub async fn deactivate(db: &PgPool, id: i64) -> anyhow::Result<bool> {
    let mut tx = db.begin().await?;

    sqlx::query("UPDATE participations SET active = FALSE WHERE job_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let res = sqlx::query("UPDATE jobs SET active = FALSE WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(res.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    async fn deactivate_cascades_to_participations(db: PgPool) -> anyhow::Result<()> {
        let volunteer =
            crate::volunteers::repo::create(&db, "Bea", "bea@x.com", "$argon2id$fake", None, None)
                .await?;
        let job = create(&db, "Food drive", "ONG Sol", "Campinas", None, None).await?;
        for activity in ["pack", "deliver"] {
            crate::participations::repo::create(&db, job.id, volunteer.id, 1, "2h", activity)
                .await?;
        }

        assert!(deactivate(&db, job.id).await?);

        let job_active: bool = sqlx::query_scalar("SELECT active FROM jobs WHERE id = $1")
            .bind(job.id)
            .fetch_one(&db)
            .await?;
        assert!(!job_active);

        let still_active: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM participations WHERE job_id = $1 AND active",
        )
        .bind(job.id)
        .fetch_one(&db)
        .await?;
        assert_eq!(still_active, 0);

        // The volunteer itself stays active; only its rows under this job go.
        let volunteer_active: bool =
            sqlx::query_scalar("SELECT active FROM volunteers WHERE id = $1")
                .bind(volunteer.id)
                .fetch_one(&db)
                .await?;
        assert!(volunteer_active);

        assert!(deactivate(&db, job.id).await?);
        Ok(())
    }
}

//! PostgreSQL implementation of JobRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use eventlink_core::entities::Job;
use eventlink_core::traits::{JobRepository, RepoResult};
use eventlink_core::value_objects::Snowflake;

use crate::models::JobModel;

use super::error::{job_not_found, map_db_error};

const JOB_COLUMNS: &str = "id, recruiter_id, title, description, location, skills, start_date, end_date, rate, status, created_at, updated_at, deleted_at";

/// PostgreSQL implementation of JobRepository
#[derive(Clone)]
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    /// Create a new PgJobRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Job>> {
        let result = sqlx::query_as::<_, JobModel>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Job::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_open(&self, limit: i64, offset: i64) -> RepoResult<Vec<Job>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, JobModel>(&format!(
            r#"
            SELECT {JOB_COLUMNS} FROM jobs
            WHERE status = 'open' AND deleted_at IS NULL
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Job::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_recruiter(&self, recruiter_id: Snowflake) -> RepoResult<Vec<Job>> {
        let results = sqlx::query_as::<_, JobModel>(&format!(
            r#"
            SELECT {JOB_COLUMNS} FROM jobs
            WHERE recruiter_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC
            "#
        ))
        .bind(recruiter_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Job::try_from).collect()
    }

    #[instrument(skip(self, job))]
    async fn create(&self, job: &Job) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO jobs (id, recruiter_id, title, description, location, skills, start_date, end_date, rate, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            "#,
        )
        .bind(job.id.into_inner())
        .bind(job.recruiter_id.into_inner())
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(&job.skills)
        .bind(job.start_date)
        .bind(job.end_date)
        .bind(job.rate)
        .bind(job.status.as_str())
        .bind(job.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, job))]
    async fn update(&self, job: &Job) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET title = $2, description = $3, location = $4, skills = $5, start_date = $6,
                end_date = $7, rate = $8, status = $9, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(job.id.into_inner())
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(&job.skills)
        .bind(job.start_date)
        .bind(job.end_date)
        .bind(job.rate)
        .bind(job.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(job_not_found(job.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE jobs SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(job_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgJobRepository>();
    }
}

//! PostgreSQL implementation of ApplicationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use eventlink_core::entities::{Application, ApplicationStatus};
use eventlink_core::traits::{ApplicationRepository, RepoResult};
use eventlink_core::value_objects::Snowflake;
use eventlink_core::DomainError;

use crate::models::ApplicationModel;

use super::error::{application_not_found, map_db_error, map_unique_violation};

const APPLICATION_COLUMNS: &str =
    "id, job_id, freelancer_id, cover_note, status, created_at, updated_at";

/// PostgreSQL implementation of ApplicationRepository
#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    /// Create a new PgApplicationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Application>> {
        let result = sqlx::query_as::<_, ApplicationModel>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Application::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_job(&self, job_id: Snowflake) -> RepoResult<Vec<Application>> {
        let results = sqlx::query_as::<_, ApplicationModel>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM applications
            WHERE job_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(job_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Application::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_freelancer(&self, freelancer_id: Snowflake) -> RepoResult<Vec<Application>> {
        let results = sqlx::query_as::<_, ApplicationModel>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM applications
            WHERE freelancer_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(freelancer_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Application::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_job_and_freelancer(
        &self,
        job_id: Snowflake,
        freelancer_id: Snowflake,
    ) -> RepoResult<Option<Application>> {
        let result = sqlx::query_as::<_, ApplicationModel>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE job_id = $1 AND freelancer_id = $2"
        ))
        .bind(job_id.into_inner())
        .bind(freelancer_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Application::try_from).transpose()
    }

    #[instrument(skip(self, application))]
    async fn create(&self, application: &Application) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO applications (id, job_id, freelancer_id, cover_note, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            "#,
        )
        .bind(application.id.into_inner())
        .bind(application.job_id.into_inner())
        .bind(application.freelancer_id.into_inner())
        .bind(&application.cover_note)
        .bind(application.status.as_str())
        .bind(application.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyApplied))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Snowflake, status: ApplicationStatus) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(application_not_found(id));
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
        assert_send_sync::<PgApplicationRepository>();
    }
}

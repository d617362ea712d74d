//! PostgreSQL implementation of JobAlertRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use eventlink_core::entities::JobAlert;
use eventlink_core::traits::{JobAlertRepository, RepoResult};
use eventlink_core::value_objects::Snowflake;

use crate::models::JobAlertModel;

use super::error::{job_alert_not_found, map_db_error};

const ALERT_COLUMNS: &str =
    "id, user_id, keywords, skills, locations, starts_after, starts_before, active, created_at, updated_at";

/// PostgreSQL implementation of JobAlertRepository
#[derive(Clone)]
pub struct PgJobAlertRepository {
    pool: PgPool,
}

impl PgJobAlertRepository {
    /// Create a new PgJobAlertRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobAlertRepository for PgJobAlertRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<JobAlert>> {
        let result = sqlx::query_as::<_, JobAlertModel>(&format!(
            "SELECT {ALERT_COLUMNS} FROM job_alerts WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(JobAlert::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<JobAlert>> {
        let results = sqlx::query_as::<_, JobAlertModel>(&format!(
            r#"
            SELECT {ALERT_COLUMNS} FROM job_alerts
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(JobAlert::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Vec<JobAlert>> {
        let results = sqlx::query_as::<_, JobAlertModel>(&format!(
            "SELECT {ALERT_COLUMNS} FROM job_alerts WHERE active = TRUE"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(JobAlert::from).collect())
    }

    #[instrument(skip(self, alert))]
    async fn create(&self, alert: &JobAlert) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO job_alerts (id, user_id, keywords, skills, locations, starts_after, starts_before, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            "#,
        )
        .bind(alert.id.into_inner())
        .bind(alert.user_id.into_inner())
        .bind(&alert.keywords)
        .bind(&alert.skills)
        .bind(&alert.locations)
        .bind(alert.starts_after)
        .bind(alert.starts_before)
        .bind(alert.active)
        .bind(alert.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, alert))]
    async fn update(&self, alert: &JobAlert) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE job_alerts
            SET keywords = $2, skills = $3, locations = $4, starts_after = $5, starts_before = $6,
                active = $7, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(alert.id.into_inner())
        .bind(&alert.keywords)
        .bind(&alert.skills)
        .bind(&alert.locations)
        .bind(alert.starts_after)
        .bind(alert.starts_before)
        .bind(alert.active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(job_alert_not_found(alert.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM job_alerts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(job_alert_not_found(id));
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
        assert_send_sync::<PgJobAlertRepository>();
    }
}

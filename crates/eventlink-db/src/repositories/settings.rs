//! PostgreSQL implementation of NotificationSettingsRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use eventlink_core::entities::NotificationSettings;
use eventlink_core::traits::{NotificationSettingsRepository, RepoResult};
use eventlink_core::value_objects::Snowflake;

use crate::models::NotificationSettingsModel;

use super::error::map_db_error;

/// PostgreSQL implementation of NotificationSettingsRepository
#[derive(Clone)]
pub struct PgNotificationSettingsRepository {
    pool: PgPool,
}

impl PgNotificationSettingsRepository {
    /// Create a new PgNotificationSettingsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationSettingsRepository for PgNotificationSettingsRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<NotificationSettings>> {
        let result = sqlx::query_as::<_, NotificationSettingsModel>(
            r#"
            SELECT user_id, email_messages, email_applications, email_jobs, email_ratings, digest, updated_at
            FROM notification_settings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(NotificationSettings::try_from).transpose()
    }

    #[instrument(skip(self, settings))]
    async fn upsert(&self, settings: &NotificationSettings) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notification_settings
                (user_id, email_messages, email_applications, email_jobs, email_ratings, digest, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                email_messages = EXCLUDED.email_messages,
                email_applications = EXCLUDED.email_applications,
                email_jobs = EXCLUDED.email_jobs,
                email_ratings = EXCLUDED.email_ratings,
                digest = EXCLUDED.digest,
                updated_at = NOW()
            "#,
        )
        .bind(settings.user_id.into_inner())
        .bind(settings.email_messages)
        .bind(settings.email_applications)
        .bind(settings.email_jobs)
        .bind(settings.email_ratings)
        .bind(settings.digest.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

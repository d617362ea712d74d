//! PostgreSQL implementation of NotificationRepository
//!
//! Counts are always computed from unread rows at query time; nothing
//! here caches or stores an aggregate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use eventlink_core::entities::{Notification, NotificationType};
use eventlink_core::traits::{NotificationRepository, RepoResult};
use eventlink_core::value_objects::Snowflake;

use crate::models::NotificationModel;

use super::error::map_db_error;

const NOTIFICATION_COLUMNS: &str = "id, user_id, kind, title, message, is_read, priority, related_entity_type, related_entity_id, action_url, metadata, expires_at, created_at";

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        let result = sqlx::query_as::<_, NotificationModel>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Notification::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Notification>> {
        let results = sqlx::query_as::<_, NotificationModel>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS} FROM notifications
            WHERE user_id = $1 AND (expires_at IS NULL OR expires_at > $2)
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id.into_inner())
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Notification::try_from).collect()
    }

    #[instrument(skip(self, notification))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
                (id, user_id, kind, title, message, is_read, priority,
                 related_entity_type, related_entity_id, action_url, metadata, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(notification.id.into_inner())
        .bind(notification.user_id.into_inner())
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.is_read)
        .bind(notification.priority.as_str())
        .bind(&notification.related_entity_type)
        .bind(notification.related_entity_id.map(Snowflake::into_inner))
        .bind(&notification.action_url)
        .bind(&notification.metadata)
        .bind(notification.expires_at)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_unread(&self, user_id: Snowflake, now: DateTime<Utc>) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM notifications
            WHERE user_id = $1 AND is_read = FALSE
              AND (expires_at IS NULL OR expires_at > $2)
            "#,
        )
        .bind(user_id.into_inner())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn unread_counts_by_type(
        &self,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<(NotificationType, i64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT kind, COUNT(*) FROM notifications
            WHERE user_id = $1 AND is_read = FALSE
              AND (expires_at IS NULL OR expires_at > $2)
            GROUP BY kind
            "#,
        )
        .bind(user_id.into_inner())
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        // Unknown kinds cannot be bucketed; skip them rather than fail
        // the whole aggregation.
        Ok(rows
            .into_iter()
            .filter_map(|(kind, count)| NotificationType::parse(&kind).map(|k| (k, count)))
            .collect())
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND is_read = FALSE",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn mark_read_by_types(
        &self,
        user_id: Snowflake,
        types: &[NotificationType],
    ) -> RepoResult<u64> {
        if types.is_empty() {
            return Ok(0);
        }

        let kinds: Vec<&str> = types.iter().map(|t| t.as_str()).collect();

        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE user_id = $1 AND kind = ANY($2) AND is_read = FALSE
            "#,
        )
        .bind(user_id.into_inner())
        .bind(&kinds)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn mark_read_for_related(
        &self,
        user_id: Snowflake,
        kind: NotificationType,
        related_entity_id: Snowflake,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE user_id = $1 AND kind = $2 AND related_entity_id = $3 AND is_read = FALSE
            "#,
        )
        .bind(user_id.into_inner())
        .bind(kind.as_str())
        .bind(related_entity_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgNotificationRepository>();
    }
}

//! PostgreSQL implementation of ConversationRepository
//!
//! Per-participant visibility lives in conversation_participants:
//! a deleted_at there hides the conversation from one side only.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use eventlink_core::entities::{Conversation, Message, Participant};
use eventlink_core::traits::{ConversationRepository, MessageQuery, RepoResult};
use eventlink_core::value_objects::Snowflake;

use crate::models::{ConversationModel, MessageModel, ParticipantModel};

use super::error::{conversation_not_found, map_db_error};

/// PostgreSQL implementation of ConversationRepository
#[derive(Clone)]
pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    /// Create a new PgConversationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            "SELECT id, created_at, updated_at FROM conversations WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self))]
    async fn find_between(&self, a: Snowflake, b: Snowflake) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r#"
            SELECT c.id, c.created_at, c.updated_at
            FROM conversations c
            JOIN conversation_participants pa ON pa.conversation_id = c.id AND pa.user_id = $1
            JOIN conversation_participants pb ON pb.conversation_id = c.id AND pb.user_id = $2
            "#,
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self, conversation))]
    async fn create(
        &self,
        conversation: &Conversation,
        a: Snowflake,
        b: Snowflake,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            "INSERT INTO conversations (id, created_at, updated_at) VALUES ($1, $2, $2)",
        )
        .bind(conversation.id.into_inner())
        .bind(conversation.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            "INSERT INTO conversation_participants (conversation_id, user_id) VALUES ($1, $2), ($1, $3)",
        )
        .bind(conversation.id.into_inner())
        .bind(a.into_inner())
        .bind(b.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn participants(&self, conversation_id: Snowflake) -> RepoResult<Vec<Participant>> {
        let results = sqlx::query_as::<_, ParticipantModel>(
            r#"
            SELECT conversation_id, user_id, deleted_at
            FROM conversation_participants
            WHERE conversation_id = $1
            "#,
        )
        .bind(conversation_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Participant::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_visible_for(&self, user_id: Snowflake) -> RepoResult<Vec<Conversation>> {
        let results = sqlx::query_as::<_, ConversationModel>(
            r#"
            SELECT c.id, c.created_at, c.updated_at
            FROM conversations c
            JOIN conversation_participants p
              ON p.conversation_id = c.id AND p.user_id = $1 AND p.deleted_at IS NULL
            ORDER BY c.updated_at DESC
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Conversation::from).collect())
    }

    #[instrument(skip(self, message))]
    async fn create_message(&self, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, sender_id, body, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id.into_inner())
        .bind(message.conversation_id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(&message.body)
        .bind(message.is_read)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_messages(
        &self,
        conversation_id: Snowflake,
        query: MessageQuery,
    ) -> RepoResult<Vec<Message>> {
        let limit = query.limit.clamp(1, 100);

        let results = match query.before {
            Some(before) => {
                sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, conversation_id, sender_id, body, is_read, created_at
                    FROM messages
                    WHERE conversation_id = $1 AND id < $2
                    ORDER BY id DESC
                    LIMIT $3
                    "#,
                )
                .bind(conversation_id.into_inner())
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, conversation_id, sender_id, body, is_read, created_at
                    FROM messages
                    WHERE conversation_id = $1
                    ORDER BY id DESC
                    LIMIT $2
                    "#,
                )
                .bind(conversation_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_messages_read(
        &self,
        conversation_id: Snowflake,
        reader_id: Snowflake,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE
            WHERE conversation_id = $1 AND sender_id <> $2 AND is_read = FALSE
            "#,
        )
        .bind(conversation_id.into_inner())
        .bind(reader_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn unread_message_count(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM messages
            WHERE conversation_id = $1 AND sender_id <> $2 AND is_read = FALSE
            "#,
        )
        .bind(conversation_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn soft_delete_for(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE conversation_participants
            SET deleted_at = NOW()
            WHERE conversation_id = $1 AND user_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(conversation_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(conversation_not_found(conversation_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn restore_for(&self, conversation_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE conversation_participants
            SET deleted_at = NULL
            WHERE conversation_id = $1 AND user_id = $2
            "#,
        )
        .bind(conversation_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch(&self, conversation_id: Snowflake) -> RepoResult<()> {
        sqlx::query("UPDATE conversations SET updated_at = NOW() WHERE id = $1")
            .bind(conversation_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgConversationRepository>();
    }
}

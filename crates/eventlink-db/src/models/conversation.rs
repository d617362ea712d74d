//! Conversation, participant, and message database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the conversations table
#[derive(Debug, Clone, FromRow)]
pub struct ConversationModel {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the conversation_participants table
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantModel {
    pub conversation_id: i64,
    pub user_id: i64,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Database model for the messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

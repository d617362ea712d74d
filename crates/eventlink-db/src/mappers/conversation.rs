//! Conversation, participant, and message mappers

use eventlink_core::entities::{Conversation, Message, Participant};
use eventlink_core::Snowflake;

use crate::models::{ConversationModel, MessageModel, ParticipantModel};

impl From<ConversationModel> for Conversation {
    fn from(model: ConversationModel) -> Self {
        Conversation {
            id: Snowflake::new(model.id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ParticipantModel> for Participant {
    fn from(model: ParticipantModel) -> Self {
        Participant {
            conversation_id: Snowflake::new(model.conversation_id),
            user_id: Snowflake::new(model.user_id),
            deleted_at: model.deleted_at,
        }
    }
}

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            conversation_id: Snowflake::new(model.conversation_id),
            sender_id: Snowflake::new(model.sender_id),
            body: model.body,
            is_read: model.is_read,
            created_at: model.created_at,
        }
    }
}

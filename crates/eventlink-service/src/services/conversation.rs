//! Conversation service - the two-party messaging inbox
//!
//! Conversations are created on demand when the first message is sent.
//! Read/unread and deletion state are strictly per participant:
//! deleting a conversation hides it (and silences its counts) for one
//! side only, and new activity restores it.

use tracing::{info, instrument};

use eventlink_core::entities::{Conversation, Message, NotificationType, Participant};
use eventlink_core::traits::MessageQuery;
use eventlink_core::{DomainError, Snowflake};
use eventlink_realtime::PushMessage;

use crate::dto::{ConversationResponse, MessageResponse, SendMessageRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::{NotificationInput, NotificationService};

/// Preview length used in message notifications
const NOTIFICATION_PREVIEW_LEN: usize = 120;

/// Conversation service
pub struct ConversationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConversationService<'a> {
    /// Create a new ConversationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a message to another user, creating the conversation on
    /// demand.
    ///
    /// The message and notification rows are the primary writes; the
    /// pushes to the recipient are best-effort.
    #[instrument(skip(self, request))]
    pub async fn send_message(
        &self,
        sender_id: Snowflake,
        recipient_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        if sender_id == recipient_id {
            return Err(DomainError::CannotMessageSelf.into());
        }

        let sender = self
            .ctx
            .user_repo()
            .find_by_id(sender_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", sender_id.to_string()))?;
        self.ctx
            .user_repo()
            .find_by_id(recipient_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", recipient_id.to_string()))?;

        // Find or create the conversation between the pair
        let conversation = match self
            .ctx
            .conversation_repo()
            .find_between(sender_id, recipient_id)
            .await?
        {
            Some(existing) => existing,
            None => {
                let conversation = Conversation::new(self.ctx.generate_id());
                self.ctx
                    .conversation_repo()
                    .create(&conversation, sender_id, recipient_id)
                    .await?;
                info!(conversation_id = %conversation.id, "Conversation created");
                conversation
            }
        };

        // New activity makes the conversation visible to both sides again
        self.ctx
            .conversation_repo()
            .restore_for(conversation.id, sender_id)
            .await?;
        self.ctx
            .conversation_repo()
            .restore_for(conversation.id, recipient_id)
            .await?;

        let message = Message::new(
            self.ctx.generate_id(),
            conversation.id,
            sender_id,
            request.body,
        );
        self.ctx.conversation_repo().create_message(&message).await?;
        self.ctx.conversation_repo().touch(conversation.id).await?;

        // Notification row for the recipient (writer handles its own
        // push of new_notification + badge counts)
        let notifications = NotificationService::new(self.ctx);
        let preview = message.preview(NOTIFICATION_PREVIEW_LEN).to_string();
        notifications
            .notify(
                NotificationInput::new(
                    recipient_id,
                    NotificationType::NewMessage,
                    format!("New message from {}", sender.display_name),
                    preview,
                )
                .related("conversation", conversation.id)
                .action_url(format!("/messages/{}", conversation.id)),
            )
            .await?;

        let response = MessageResponse::from(&message);

        // Direct payload so an open tab renders without a refetch
        self.ctx
            .broadcaster()
            .notify(
                recipient_id,
                &PushMessage::NewMessage {
                    message: serde_json::to_value(&response).unwrap_or_default(),
                    sender: serde_json::to_value(UserResponse::from(&sender)).unwrap_or_default(),
                    conversation_id: conversation.id,
                },
            )
            .await;
        self.ctx
            .broadcaster()
            .notify(
                recipient_id,
                &PushMessage::ConversationUpdated {
                    conversation_id: conversation.id,
                },
            )
            .await;

        Ok(response)
    }

    /// The caller's inbox: visible conversations, most recent first
    #[instrument(skip(self))]
    pub async fn list_conversations(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<ConversationResponse>> {
        let conversations = self
            .ctx
            .conversation_repo()
            .find_visible_for(user_id)
            .await?;

        let mut responses = Vec::with_capacity(conversations.len());
        for conversation in conversations {
            let participants = self
                .ctx
                .conversation_repo()
                .participants(conversation.id)
                .await?;

            let other = match participants.iter().find(|p| p.user_id != user_id) {
                Some(p) => self.ctx.user_repo().find_by_id(p.user_id).await?,
                None => None,
            };

            let unread = self
                .ctx
                .conversation_repo()
                .unread_message_count(conversation.id, user_id)
                .await?;

            responses.push(ConversationResponse::new(
                &conversation,
                other.as_ref().map(UserResponse::from),
                unread,
            ));
        }

        Ok(responses)
    }

    /// List messages in a conversation, marking them read for the
    /// caller.
    ///
    /// Opening the conversation is the read event: counterpart
    /// messages flip to read, the matching message notifications flip
    /// with them, and the caller's other tabs get fresh counts.
    #[instrument(skip(self))]
    pub async fn list_messages(
        &self,
        user_id: Snowflake,
        conversation_id: Snowflake,
        before: Option<Snowflake>,
        limit: i64,
    ) -> ServiceResult<Vec<MessageResponse>> {
        self.require_participant(conversation_id, user_id).await?;

        let messages = self
            .ctx
            .conversation_repo()
            .find_messages(conversation_id, MessageQuery { before, limit })
            .await?;

        let messages_flipped = self
            .ctx
            .conversation_repo()
            .mark_messages_read(conversation_id, user_id)
            .await?;
        let notifications_flipped = self
            .ctx
            .notification_repo()
            .mark_read_for_related(user_id, NotificationType::NewMessage, conversation_id)
            .await?;

        if messages_flipped > 0 || notifications_flipped > 0 {
            NotificationService::new(self.ctx).push_counts(user_id).await?;
        }

        Ok(messages.iter().map(MessageResponse::from).collect())
    }

    /// Hide the conversation from the caller's view.
    ///
    /// The other participant's view and counts are untouched.
    #[instrument(skip(self))]
    pub async fn delete_conversation(
        &self,
        user_id: Snowflake,
        conversation_id: Snowflake,
    ) -> ServiceResult<()> {
        self.require_participant(conversation_id, user_id).await?;

        self.ctx
            .conversation_repo()
            .soft_delete_for(conversation_id, user_id)
            .await?;

        info!(conversation_id = %conversation_id, user_id = %user_id, "Conversation hidden for participant");

        // Tell the caller's other tabs; never the counterpart's
        self.ctx
            .broadcaster()
            .notify(user_id, &PushMessage::ConversationDeleted { conversation_id })
            .await;

        Ok(())
    }

    /// Verify the caller participates in (and has not deleted) the
    /// conversation
    async fn require_participant(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Participant> {
        self.ctx
            .conversation_repo()
            .find_by_id(conversation_id)
            .await?
            .ok_or(DomainError::ConversationNotFound(conversation_id))?;

        let participants = self
            .ctx
            .conversation_repo()
            .participants(conversation_id)
            .await?;

        let participant = participants
            .into_iter()
            .find(|p| p.user_id == user_id)
            .ok_or(DomainError::NotParticipant)?;

        if !participant.is_visible() {
            // Deleted from this side's view; indistinguishable from absent
            return Err(DomainError::ConversationNotFound(conversation_id).into());
        }

        Ok(participant)
    }
}

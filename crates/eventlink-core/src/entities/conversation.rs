//! Conversation and message entities - the two-party inbox
//!
//! Read/unread and deletion state are scoped per participant: deleting
//! a conversation for one side must not change what the other side
//! sees or what counts as unread for them.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Conversation entity (always exactly two participants)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new conversation
    pub fn new(id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Per-participant view state of a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub conversation_id: Snowflake,
    pub user_id: Snowflake,
    /// Set when the participant deleted the conversation from their view
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Participant {
    /// Whether the conversation is visible to this participant
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub conversation_id: Snowflake,
    pub sender_id: Snowflake,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new unread message
    pub fn new(id: Snowflake, conversation_id: Snowflake, sender_id: Snowflake, body: String) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            body,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Whether this message counts as unread for the given viewer
    #[inline]
    pub fn is_unread_for(&self, viewer_id: Snowflake) -> bool {
        !self.is_read && self.sender_id != viewer_id
    }

    /// Get a truncated preview of the body (for notifications)
    pub fn preview(&self, max_len: usize) -> &str {
        if self.body.len() <= max_len {
            &self.body
        } else {
            let mut end = max_len;
            while !self.body.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.body[..end]
        }
    }

    /// Check if the body is effectively empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_visibility() {
        let mut p = Participant {
            conversation_id: Snowflake::new(1),
            user_id: Snowflake::new(2),
            deleted_at: None,
        };
        assert!(p.is_visible());

        p.deleted_at = Some(Utc::now());
        assert!(!p.is_visible());
    }

    #[test]
    fn test_message_unread_scoping() {
        let sender = Snowflake::new(10);
        let recipient = Snowflake::new(20);
        let msg = Message::new(Snowflake::new(1), Snowflake::new(2), sender, "hi".into());

        // Unread for the recipient, never for the sender
        assert!(msg.is_unread_for(recipient));
        assert!(!msg.is_unread_for(sender));

        let mut read = msg.clone();
        read.is_read = true;
        assert!(!read.is_unread_for(recipient));
    }

    #[test]
    fn test_message_preview_respects_char_boundaries() {
        let msg = Message::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "grüße aus Köln".into(),
        );
        // "grüße" - the ü is two bytes; preview must not split it
        let preview = msg.preview(3);
        assert!(msg.body.starts_with(preview));
        assert!(preview.len() <= 3);
    }

    #[test]
    fn test_empty_body() {
        let msg = Message::new(Snowflake::new(1), Snowflake::new(2), Snowflake::new(3), "  ".into());
        assert!(msg.is_empty());
    }
}

//! Push protocol - the frames exchanged over the live channel
//!
//! The client speaks first with an authenticate frame; everything after
//! that is server-to-client. Frames are plain JSON tagged by `type`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use eventlink_core::{BadgeCounts, Snowflake};

/// Client-to-server frames.
///
/// Only one exists: the authenticate frame, which must be the first
/// frame on a fresh connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    Authenticate { user_id: Snowflake },
}

/// Server-to-client push messages.
///
/// Each carries only what the client needs to either invalidate a cache
/// key or render directly, avoiding a refetch round-trip for the common
/// cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushMessage {
    /// A notification row was just written for this user
    NewNotification { notification: Value },
    /// Precomputed badge counts after any mutation that could change them
    BadgeCountsUpdate { counts: BadgeCounts },
    /// A message arrived; enough data to render without refetching
    NewMessage {
        message: Value,
        sender: Value,
        conversation_id: Snowflake,
    },
    /// A conversation changed (new activity); invalidate its caches
    ConversationUpdated { conversation_id: Snowflake },
    /// The conversation was removed from this user's view
    ConversationDeleted { conversation_id: Snowflake },
    /// One notification changed (read flip)
    NotificationUpdated { notification: Value },
    /// Bulk change; carries the full refreshed list so the client
    /// needs no separate refetch
    AllNotificationsUpdated { notifications: Value },
}

impl PushMessage {
    /// The wire name of this message's type tag
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NewNotification { .. } => "new_notification",
            Self::BadgeCountsUpdate { .. } => "badge_counts_update",
            Self::NewMessage { .. } => "new_message",
            Self::ConversationUpdated { .. } => "conversation_updated",
            Self::ConversationDeleted { .. } => "conversation_deleted",
            Self::NotificationUpdated { .. } => "notification_updated",
            Self::AllNotificationsUpdated { .. } => "all_notifications_updated",
        }
    }

    /// Serialize to the JSON wire form
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from the JSON wire form
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_authenticate_frame_shape() {
        let frame: ClientFrame =
            serde_json::from_str(r#"{"type":"authenticate","user_id":"42"}"#).unwrap();
        assert_eq!(
            frame,
            ClientFrame::Authenticate {
                user_id: Snowflake::new(42)
            }
        );
    }

    #[test]
    fn test_non_authenticate_first_frame_rejected() {
        assert!(serde_json::from_str::<ClientFrame>(r#"{"type":"hello"}"#).is_err());
    }

    #[test]
    fn test_push_message_tags() {
        let msg = PushMessage::BadgeCountsUpdate {
            counts: BadgeCounts::empty(),
        };
        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value["type"], "badge_counts_update");
        assert_eq!(value["counts"]["total"], 0);
        assert_eq!(msg.kind(), "badge_counts_update");
    }

    #[test]
    fn test_new_message_payload_shape() {
        let msg = PushMessage::NewMessage {
            message: json!({"id": "1", "body": "hi"}),
            sender: json!({"id": "2", "display_name": "Sam"}),
            conversation_id: Snowflake::new(9),
        };
        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value["type"], "new_message");
        assert_eq!(value["conversation_id"], "9");
        assert_eq!(value["sender"]["display_name"], "Sam");
    }

    #[test]
    fn test_roundtrip_every_variant() {
        let messages = [
            PushMessage::NewNotification {
                notification: json!({"id": "1"}),
            },
            PushMessage::BadgeCountsUpdate {
                counts: BadgeCounts::empty(),
            },
            PushMessage::NewMessage {
                message: json!({}),
                sender: json!({}),
                conversation_id: Snowflake::new(1),
            },
            PushMessage::ConversationUpdated {
                conversation_id: Snowflake::new(2),
            },
            PushMessage::ConversationDeleted {
                conversation_id: Snowflake::new(3),
            },
            PushMessage::NotificationUpdated {
                notification: json!({"id": "4"}),
            },
            PushMessage::AllNotificationsUpdated {
                notifications: json!([]),
            },
        ];

        for msg in messages {
            let parsed = PushMessage::from_json(&msg.to_json().unwrap()).unwrap();
            assert_eq!(parsed, msg);
        }
    }
}

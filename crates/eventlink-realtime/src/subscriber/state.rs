//! Local tab state - badge cache, cache invalidation, popups, title
//!
//! Pure state machine driven by incoming push messages on one side and
//! HTTP poll results on the other. Both paths land in the same badge
//! cache, so a tab that never receives a push still converges on the
//! next poll.

use std::collections::HashSet;

use serde_json::Value;

use eventlink_core::{BadgeCounts, Snowflake};

use crate::protocol::PushMessage;

/// Display cap for the tab-title unread total
const TITLE_CAP: i64 = 99;

/// A transient popup to surface to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub body: String,
}

/// Per-tab inbox state
#[derive(Debug)]
pub struct InboxState {
    /// The currently-authenticated user
    user_id: Snowflake,
    /// The document title to restore when nothing is unread
    base_title: String,
    counts: BadgeCounts,
    /// Cache keys whose next read must refetch
    invalidated: HashSet<String>,
    /// Pending transient popups, oldest first
    popups: Vec<Popup>,
    /// Replaced wholesale by `all_notifications_updated` pushes
    notifications: Option<Value>,
}

impl InboxState {
    /// Create state for a freshly signed-in user
    pub fn new(user_id: Snowflake, base_title: impl Into<String>) -> Self {
        Self {
            user_id,
            base_title: base_title.into(),
            counts: BadgeCounts::empty(),
            invalidated: HashSet::new(),
            popups: Vec::new(),
            notifications: None,
        }
    }

    /// The user this state belongs to
    pub fn user_id(&self) -> Snowflake {
        self.user_id
    }

    /// Current cached badge counts
    pub fn counts(&self) -> BadgeCounts {
        self.counts
    }

    /// Cached notification list, when a bulk push delivered one
    pub fn notifications(&self) -> Option<&Value> {
        self.notifications.as_ref()
    }

    /// Replace the badge cache from an HTTP poll (the pull fallback)
    pub fn apply_counts(&mut self, counts: BadgeCounts) {
        self.counts = counts;
    }

    /// Dispatch one incoming push message.
    ///
    /// `connection_user` is the user the delivering connection
    /// authenticated as; messages from a stale connection (left over
    /// from a previous sign-in) are ignored outright.
    pub fn apply(&mut self, connection_user: Snowflake, message: &PushMessage) {
        if connection_user != self.user_id {
            tracing::debug!(
                connection_user = %connection_user,
                current_user = %self.user_id,
                kind = message.kind(),
                "Dropping push for stale user"
            );
            return;
        }

        match message {
            PushMessage::BadgeCountsUpdate { counts } => {
                // Direct replace; no refetch round-trip
                self.counts = *counts;
            }
            PushMessage::NewNotification { notification } => {
                self.invalidate("notifications");
                self.push_popup(
                    notification["title"].as_str().unwrap_or("New notification"),
                    notification["message"].as_str().unwrap_or_default(),
                );
            }
            PushMessage::NewMessage {
                message: msg,
                sender,
                conversation_id,
            } => {
                self.invalidate("conversations");
                self.invalidate(format!("messages:{conversation_id}"));
                self.push_popup(
                    sender["display_name"].as_str().unwrap_or("New message"),
                    msg["body"].as_str().unwrap_or_default(),
                );
            }
            PushMessage::ConversationUpdated { conversation_id } => {
                self.invalidate("conversations");
                self.invalidate(format!("messages:{conversation_id}"));
            }
            PushMessage::ConversationDeleted { .. } => {
                self.invalidate("conversations");
            }
            PushMessage::NotificationUpdated { .. } => {
                self.invalidate("notifications");
            }
            PushMessage::AllNotificationsUpdated { notifications } => {
                // The payload carries the full refreshed list, so the
                // cache is replaced rather than invalidated.
                self.notifications = Some(notifications.clone());
                self.invalidated.remove("notifications");
            }
        }
    }

    fn invalidate(&mut self, key: impl Into<String>) {
        self.invalidated.insert(key.into());
    }

    fn push_popup(&mut self, title: &str, body: &str) {
        self.popups.push(Popup {
            title: title.to_string(),
            body: body.to_string(),
        });
    }

    /// Whether the next read of a cache key must refetch
    pub fn is_invalidated(&self, key: &str) -> bool {
        self.invalidated.contains(key)
    }

    /// Drain and return the invalidated cache keys
    pub fn take_invalidated(&mut self) -> HashSet<String> {
        std::mem::take(&mut self.invalidated)
    }

    /// Drain pending popups, oldest first
    pub fn take_popups(&mut self) -> Vec<Popup> {
        std::mem::take(&mut self.popups)
    }

    /// The document title: unread total prefixed, capped at "99+",
    /// the plain base title when nothing is unread.
    pub fn tab_title(&self) -> String {
        let total = self.counts.total;
        if total <= 0 {
            self.base_title.clone()
        } else if total > TITLE_CAP {
            format!("(99+) {}", self.base_title)
        } else {
            format!("({total}) {}", self.base_title)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventlink_core::entities::NotificationCategory;
    use serde_json::json;

    fn state() -> InboxState {
        InboxState::new(Snowflake::new(7), "EventLink")
    }

    fn counts(messages: i64) -> BadgeCounts {
        BadgeCounts::from_category_counts([(NotificationCategory::Messages, messages)])
    }

    #[test]
    fn test_counts_update_replaces_cache_directly() {
        let mut st = state();
        st.apply(
            Snowflake::new(7),
            &PushMessage::BadgeCountsUpdate { counts: counts(4) },
        );
        assert_eq!(st.counts().messages, 4);
        assert_eq!(st.counts().total, 4);
        // A counts replace invalidates nothing
        assert!(st.take_invalidated().is_empty());
    }

    #[test]
    fn test_stale_user_messages_are_ignored() {
        let mut st = state();
        st.apply(
            Snowflake::new(999),
            &PushMessage::BadgeCountsUpdate { counts: counts(4) },
        );
        assert!(st.counts().is_zero());
    }

    #[test]
    fn test_new_message_invalidates_and_pops() {
        let mut st = state();
        st.apply(
            Snowflake::new(7),
            &PushMessage::NewMessage {
                message: json!({"body": "soundcheck at 4?"}),
                sender: json!({"display_name": "Robin"}),
                conversation_id: Snowflake::new(33),
            },
        );

        assert!(st.is_invalidated("conversations"));
        assert!(st.is_invalidated("messages:33"));

        let popups = st.take_popups();
        assert_eq!(popups.len(), 1);
        assert_eq!(popups[0].title, "Robin");
        assert_eq!(popups[0].body, "soundcheck at 4?");
    }

    #[test]
    fn test_new_notification_invalidates_notifications() {
        let mut st = state();
        st.apply(
            Snowflake::new(7),
            &PushMessage::NewNotification {
                notification: json!({"title": "Application reviewed", "message": "Your application moved forward"}),
            },
        );
        assert!(st.is_invalidated("notifications"));
        assert_eq!(st.take_popups()[0].title, "Application reviewed");
    }

    #[test]
    fn test_bulk_update_replaces_list_without_refetch() {
        let mut st = state();
        st.apply(
            Snowflake::new(7),
            &PushMessage::NotificationUpdated {
                notification: json!({"id": "1"}),
            },
        );
        assert!(st.is_invalidated("notifications"));

        st.apply(
            Snowflake::new(7),
            &PushMessage::AllNotificationsUpdated {
                notifications: json!([{"id": "1", "is_read": true}]),
            },
        );
        // Fresh list delivered in-band: cache replaced, key no longer stale
        assert!(!st.is_invalidated("notifications"));
        assert_eq!(st.notifications().unwrap()[0]["is_read"], true);
    }

    #[test]
    fn test_conversation_deleted_invalidates_list() {
        let mut st = state();
        st.apply(
            Snowflake::new(7),
            &PushMessage::ConversationDeleted {
                conversation_id: Snowflake::new(5),
            },
        );
        assert!(st.is_invalidated("conversations"));
    }

    #[test]
    fn test_tab_title_prefix_and_cap() {
        let mut st = state();
        assert_eq!(st.tab_title(), "EventLink");

        st.apply_counts(counts(3));
        assert_eq!(st.tab_title(), "(3) EventLink");

        st.apply_counts(counts(99));
        assert_eq!(st.tab_title(), "(99) EventLink");

        st.apply_counts(counts(240));
        assert_eq!(st.tab_title(), "(99+) EventLink");

        // Back to zero restores the original title
        st.apply_counts(BadgeCounts::empty());
        assert_eq!(st.tab_title(), "EventLink");
    }

    #[test]
    fn test_poll_fallback_lands_in_same_cache() {
        let mut st = state();
        // No push ever arrives; the HTTP poll path still updates the badge
        st.apply_counts(counts(2));
        assert_eq!(st.counts().total, 2);
        assert_eq!(st.tab_title(), "(2) EventLink");
    }
}

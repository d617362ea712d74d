//! Notification entity - one event delivered to one recipient
//!
//! Rows are created by the notification writer, flipped to read by the
//! reconciler, and never otherwise updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Fixed notification type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewMessage,
    ApplicationUpdate,
    JobUpdate,
    ProfileView,
    RatingReceived,
    RatingRequest,
    System,
}

impl NotificationType {
    /// String form used in the database and on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewMessage => "new_message",
            Self::ApplicationUpdate => "application_update",
            Self::JobUpdate => "job_update",
            Self::ProfileView => "profile_view",
            Self::RatingReceived => "rating_received",
            Self::RatingRequest => "rating_request",
            Self::System => "system",
        }
    }

    /// Parse a type from its string form
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new_message" => Some(Self::NewMessage),
            "application_update" => Some(Self::ApplicationUpdate),
            "job_update" => Some(Self::JobUpdate),
            "profile_view" => Some(Self::ProfileView),
            "rating_received" => Some(Self::RatingReceived),
            "rating_request" => Some(Self::RatingRequest),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    /// Map a type to its badge category.
    ///
    /// Pure function used only for aggregation; the category is never
    /// stored alongside the row.
    #[must_use]
    pub const fn category(self) -> NotificationCategory {
        match self {
            Self::NewMessage => NotificationCategory::Messages,
            Self::ApplicationUpdate => NotificationCategory::Applications,
            Self::JobUpdate => NotificationCategory::Jobs,
            Self::RatingReceived | Self::RatingRequest => NotificationCategory::Ratings,
            Self::ProfileView => NotificationCategory::Feedback,
            Self::System => NotificationCategory::ContactMessages,
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge categories used to bucket unread notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Messages,
    Applications,
    Jobs,
    Ratings,
    Feedback,
    ContactMessages,
}

impl NotificationCategory {
    /// All categories, in badge display order
    pub const ALL: [Self; 6] = [
        Self::Messages,
        Self::Applications,
        Self::Jobs,
        Self::Ratings,
        Self::Feedback,
        Self::ContactMessages,
    ];

    /// String form used in URLs and JSON
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Messages => "messages",
            Self::Applications => "applications",
            Self::Jobs => "jobs",
            Self::Ratings => "ratings",
            Self::Feedback => "feedback",
            Self::ContactMessages => "contact_messages",
        }
    }

    /// Parse a category from its string form
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "messages" => Some(Self::Messages),
            "applications" => Some(Self::Applications),
            "jobs" => Some(Self::Jobs),
            "ratings" => Some(Self::Ratings),
            "feedback" => Some(Self::Feedback),
            "contact_messages" => Some(Self::ContactMessages),
            _ => None,
        }
    }

    /// The notification types that aggregate into this category
    #[must_use]
    pub fn types(self) -> &'static [NotificationType] {
        match self {
            Self::Messages => &[NotificationType::NewMessage],
            Self::Applications => &[NotificationType::ApplicationUpdate],
            Self::Jobs => &[NotificationType::JobUpdate],
            Self::Ratings => &[
                NotificationType::RatingReceived,
                NotificationType::RatingRequest,
            ],
            Self::Feedback => &[NotificationType::ProfileView],
            Self::ContactMessages => &[NotificationType::System],
        }
    }
}

impl std::fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPriority {
    Low,
    #[default]
    Normal,
    High,
}

impl NotificationPriority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "normal" => Some(Self::Normal),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Notification entity
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub priority: NotificationPriority,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<Snowflake>,
    pub action_url: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a new unread notification
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        kind: NotificationType,
        title: String,
        message: String,
    ) -> Self {
        Self {
            id,
            user_id,
            kind,
            title,
            message,
            is_read: false,
            priority: NotificationPriority::default(),
            related_entity_type: None,
            related_entity_id: None,
            action_url: None,
            metadata: None,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a related entity reference
    #[must_use]
    pub fn with_related(mut self, entity_type: impl Into<String>, entity_id: Snowflake) -> Self {
        self.related_entity_type = Some(entity_type.into());
        self.related_entity_id = Some(entity_id);
        self
    }

    /// Attach a client navigation target
    #[must_use]
    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }

    /// Attach free-form metadata
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set the priority
    #[must_use]
    pub fn with_priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set an expiry instant
    #[must_use]
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// The badge category this notification counts toward
    #[inline]
    pub fn category(&self) -> NotificationCategory {
        self.kind.category()
    }

    /// Whether the notification has expired as of `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_roundtrip() {
        for kind in [
            NotificationType::NewMessage,
            NotificationType::ApplicationUpdate,
            NotificationType::JobUpdate,
            NotificationType::ProfileView,
            NotificationType::RatingReceived,
            NotificationType::RatingRequest,
            NotificationType::System,
        ] {
            assert_eq!(NotificationType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(NotificationType::parse("bogus"), None);
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(
            NotificationType::NewMessage.category(),
            NotificationCategory::Messages
        );
        assert_eq!(
            NotificationType::ApplicationUpdate.category(),
            NotificationCategory::Applications
        );
        assert_eq!(
            NotificationType::JobUpdate.category(),
            NotificationCategory::Jobs
        );
        assert_eq!(
            NotificationType::RatingReceived.category(),
            NotificationCategory::Ratings
        );
        assert_eq!(
            NotificationType::RatingRequest.category(),
            NotificationCategory::Ratings
        );
        assert_eq!(
            NotificationType::ProfileView.category(),
            NotificationCategory::Feedback
        );
        assert_eq!(
            NotificationType::System.category(),
            NotificationCategory::ContactMessages
        );
    }

    #[test]
    fn test_every_type_belongs_to_its_category_type_list() {
        for kind in [
            NotificationType::NewMessage,
            NotificationType::ApplicationUpdate,
            NotificationType::JobUpdate,
            NotificationType::ProfileView,
            NotificationType::RatingReceived,
            NotificationType::RatingRequest,
            NotificationType::System,
        ] {
            assert!(kind.category().types().contains(&kind));
        }
    }

    #[test]
    fn test_category_roundtrip() {
        for category in NotificationCategory::ALL {
            assert_eq!(NotificationCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(NotificationCategory::parse("bogus-category"), None);
    }

    #[test]
    fn test_new_notification_is_unread() {
        let n = Notification::new(
            Snowflake::new(1),
            Snowflake::new(2),
            NotificationType::NewMessage,
            "New message".into(),
            "You have a new message".into(),
        );
        assert!(!n.is_read);
        assert_eq!(n.priority, NotificationPriority::Normal);
        assert_eq!(n.category(), NotificationCategory::Messages);
    }

    #[test]
    fn test_builder_helpers() {
        let n = Notification::new(
            Snowflake::new(1),
            Snowflake::new(2),
            NotificationType::ApplicationUpdate,
            "Application reviewed".into(),
            "Your application was reviewed".into(),
        )
        .with_related("application", Snowflake::new(55))
        .with_action_url("/applications/55")
        .with_priority(NotificationPriority::High);

        assert_eq!(n.related_entity_type.as_deref(), Some("application"));
        assert_eq!(n.related_entity_id, Some(Snowflake::new(55)));
        assert_eq!(n.action_url.as_deref(), Some("/applications/55"));
        assert_eq!(n.priority, NotificationPriority::High);
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let n = Notification::new(
            Snowflake::new(1),
            Snowflake::new(2),
            NotificationType::System,
            "t".into(),
            "m".into(),
        );
        assert!(!n.is_expired(now));

        let expired = n.clone().with_expiry(now - chrono::Duration::minutes(1));
        assert!(expired.is_expired(now));

        let future = n.with_expiry(now + chrono::Duration::minutes(1));
        assert!(!future.is_expired(now));
    }
}

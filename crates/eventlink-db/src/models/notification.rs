//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub priority: String,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<i64>,
    pub action_url: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NotificationModel {
    /// Check if the row has expired as of `now`
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

//! Notification settings database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the notification_settings table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationSettingsModel {
    pub user_id: i64,
    pub email_messages: bool,
    pub email_applications: bool,
    pub email_jobs: bool,
    pub email_ratings: bool,
    pub digest: String,
    pub updated_at: DateTime<Utc>,
}

//! Notification settings entity <-> model mapper

use eventlink_core::entities::{DigestMode, NotificationSettings};
use eventlink_core::{DomainError, Snowflake};

use crate::models::NotificationSettingsModel;

use super::bad_enum;

impl TryFrom<NotificationSettingsModel> for NotificationSettings {
    type Error = DomainError;

    fn try_from(model: NotificationSettingsModel) -> Result<Self, Self::Error> {
        let digest = DigestMode::parse(&model.digest)
            .ok_or_else(|| bad_enum("notification_settings", "digest", &model.digest))?;

        Ok(NotificationSettings {
            user_id: Snowflake::new(model.user_id),
            email_messages: model.email_messages,
            email_applications: model.email_applications,
            email_jobs: model.email_jobs,
            email_ratings: model.email_ratings,
            digest,
            updated_at: model.updated_at,
        })
    }
}

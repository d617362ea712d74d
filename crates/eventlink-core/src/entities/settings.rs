//! Per-user notification settings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::NotificationCategory;
use crate::value_objects::Snowflake;

/// Email digest mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestMode {
    #[default]
    Instant,
    Daily,
    Weekly,
}

impl DigestMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "instant" => Some(Self::Instant),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            _ => None,
        }
    }
}

/// Per-user email toggles and digest mode.
///
/// Users without a stored row get the defaults (everything on,
/// instant delivery).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    pub user_id: Snowflake,
    pub email_messages: bool,
    pub email_applications: bool,
    pub email_jobs: bool,
    pub email_ratings: bool,
    pub digest: DigestMode,
    pub updated_at: DateTime<Utc>,
}

impl NotificationSettings {
    /// Default settings for a user without a stored row
    pub fn defaults_for(user_id: Snowflake) -> Self {
        Self {
            user_id,
            email_messages: true,
            email_applications: true,
            email_jobs: true,
            email_ratings: true,
            digest: DigestMode::default(),
            updated_at: Utc::now(),
        }
    }

    /// Whether email is enabled for a badge category.
    ///
    /// Categories without an explicit toggle (feedback, contact
    /// messages) never produce email.
    pub fn email_enabled_for(&self, category: NotificationCategory) -> bool {
        match category {
            NotificationCategory::Messages => self.email_messages,
            NotificationCategory::Applications => self.email_applications,
            NotificationCategory::Jobs => self.email_jobs,
            NotificationCategory::Ratings => self.email_ratings,
            NotificationCategory::Feedback | NotificationCategory::ContactMessages => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_roundtrip() {
        for mode in [DigestMode::Instant, DigestMode::Daily, DigestMode::Weekly] {
            assert_eq!(DigestMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(DigestMode::parse("hourly"), None);
    }

    #[test]
    fn test_defaults_are_all_on_instant() {
        let settings = NotificationSettings::defaults_for(Snowflake::new(1));
        assert!(settings.email_messages);
        assert!(settings.email_applications);
        assert!(settings.email_jobs);
        assert!(settings.email_ratings);
        assert_eq!(settings.digest, DigestMode::Instant);
    }

    #[test]
    fn test_email_toggles_by_category() {
        let mut settings = NotificationSettings::defaults_for(Snowflake::new(1));
        settings.email_messages = false;

        assert!(!settings.email_enabled_for(NotificationCategory::Messages));
        assert!(settings.email_enabled_for(NotificationCategory::Applications));
        // No toggle exists for these, so never email
        assert!(!settings.email_enabled_for(NotificationCategory::Feedback));
        assert!(!settings.email_enabled_for(NotificationCategory::ContactMessages));
    }
}

//! Application entity - a freelancer's application to a job

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Application lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    Reviewed,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Reviewed => "reviewed",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "submitted" => Some(Self::Submitted),
            "reviewed" => Some(Self::Reviewed),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "withdrawn" => Some(Self::Withdrawn),
            _ => None,
        }
    }

    /// Statuses a recruiter may set on an application to their job
    #[inline]
    #[must_use]
    pub fn settable_by_recruiter(self) -> bool {
        matches!(self, Self::Reviewed | Self::Accepted | Self::Rejected)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application entity
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub id: Snowflake,
    pub job_id: Snowflake,
    pub freelancer_id: Snowflake,
    pub cover_note: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Create a freshly submitted application
    pub fn new(id: Snowflake, job_id: Snowflake, freelancer_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            job_id,
            freelancer_id,
            cover_note: None,
            status: ApplicationStatus::Submitted,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a cover note
    #[must_use]
    pub fn with_cover_note(mut self, note: impl Into<String>) -> Self {
        self.cover_note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            ApplicationStatus::Submitted,
            ApplicationStatus::Reviewed,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
            ApplicationStatus::Withdrawn,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApplicationStatus::parse("pending"), None);
    }

    #[test]
    fn test_recruiter_settable_statuses() {
        assert!(ApplicationStatus::Reviewed.settable_by_recruiter());
        assert!(ApplicationStatus::Accepted.settable_by_recruiter());
        assert!(ApplicationStatus::Rejected.settable_by_recruiter());
        assert!(!ApplicationStatus::Withdrawn.settable_by_recruiter());
        assert!(!ApplicationStatus::Submitted.settable_by_recruiter());
    }

    #[test]
    fn test_new_application_is_submitted() {
        let app = Application::new(Snowflake::new(1), Snowflake::new(2), Snowflake::new(3));
        assert_eq!(app.status, ApplicationStatus::Submitted);
        assert!(app.cover_note.is_none());
    }
}

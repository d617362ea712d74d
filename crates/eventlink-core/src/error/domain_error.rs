//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Job not found: {0}")]
    JobNotFound(Snowflake),

    #[error("Application not found: {0}")]
    ApplicationNotFound(Snowflake),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(Snowflake),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    #[error("Job alert not found: {0}")]
    JobAlertNotFound(Snowflake),

    #[error("Rating not found: {0}")]
    RatingNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Unknown notification category: {0}")]
    InvalidCategory(String),

    #[error("Rating score out of range: {0}")]
    InvalidScore(i16),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the notification owner")]
    NotNotificationOwner,

    #[error("Not the job owner")]
    NotJobOwner,

    #[error("Not a conversation participant")]
    NotParticipant,

    #[error("Admin role required")]
    AdminOnly,

    #[error("Freelancer role required")]
    FreelancerOnly,

    #[error("Recruiter role required")]
    RecruiterOnly,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Already applied to this job")]
    AlreadyApplied,

    #[error("Already rated this user for this job")]
    AlreadyRated,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Job is not accepting applications")]
    JobNotOpen,

    #[error("Cannot apply to your own job")]
    CannotApplyToOwnJob,

    #[error("Cannot message yourself")]
    CannotMessageSelf,

    #[error("Cannot rate yourself")]
    CannotRateSelf,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::JobNotFound(_) => "UNKNOWN_JOB",
            Self::ApplicationNotFound(_) => "UNKNOWN_APPLICATION",
            Self::ConversationNotFound(_) => "UNKNOWN_CONVERSATION",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::JobAlertNotFound(_) => "UNKNOWN_JOB_ALERT",
            Self::RatingNotFound(_) => "UNKNOWN_RATING",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidCategory(_) => "INVALID_CATEGORY",
            Self::InvalidScore(_) => "INVALID_SCORE",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::NotNotificationOwner => "NOT_NOTIFICATION_OWNER",
            Self::NotJobOwner => "NOT_JOB_OWNER",
            Self::NotParticipant => "NOT_PARTICIPANT",
            Self::AdminOnly => "ADMIN_ONLY",
            Self::FreelancerOnly => "FREELANCER_ONLY",
            Self::RecruiterOnly => "RECRUITER_ONLY",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyApplied => "ALREADY_APPLIED",
            Self::AlreadyRated => "ALREADY_RATED",

            // Business Rules
            Self::JobNotOpen => "JOB_NOT_OPEN",
            Self::CannotApplyToOwnJob => "CANNOT_APPLY_TO_OWN_JOB",
            Self::CannotMessageSelf => "CANNOT_MESSAGE_SELF",
            Self::CannotRateSelf => "CANNOT_RATE_SELF",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::JobNotFound(_)
                | Self::ApplicationNotFound(_)
                | Self::ConversationNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::JobAlertNotFound(_)
                | Self::RatingNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::InvalidCategory(_)
                | Self::InvalidScore(_)
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotNotificationOwner
                | Self::NotJobOwner
                | Self::NotParticipant
                | Self::AdminOnly
                | Self::FreelancerOnly
                | Self::RecruiterOnly
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::AlreadyApplied | Self::AlreadyRated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::NotificationNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_NOTIFICATION");

        let err = DomainError::InvalidCategory("bogus".to_string());
        assert_eq!(err.code(), "INVALID_CATEGORY");
    }

    #[test]
    fn test_classifiers() {
        assert!(DomainError::JobNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::NotNotificationOwner.is_authorization());
        assert!(DomainError::InvalidCategory("x".into()).is_validation());
        assert!(DomainError::AlreadyApplied.is_conflict());
        assert!(!DomainError::AlreadyApplied.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::UserNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "User not found: 123");

        let err = DomainError::InvalidScore(9);
        assert_eq!(err.to_string(), "Rating score out of range: 9");
    }
}

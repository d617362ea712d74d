//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and, where fields need it,
//! `Validate` for input validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(min = 2, max = 80, message = "Display name must be 2-80 characters"))]
    pub display_name: String,

    /// "freelancer" or "recruiter" (admin accounts are not self-service)
    pub role: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Update own profile
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 80, message = "Display name must be 2-80 characters"))]
    pub display_name: Option<String>,

    #[validate(length(max = 160, message = "Headline must be at most 160 characters"))]
    pub headline: Option<String>,

    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 120, message = "Location must be at most 120 characters"))]
    pub location: Option<String>,

    pub skills: Option<Vec<String>>,

    /// Avatar hash or null to remove
    pub avatar: Option<String>,
}

// ============================================================================
// Job Requests
// ============================================================================

/// Create job request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 3, max = 160, message = "Title must be 3-160 characters"))]
    pub title: String,

    #[validate(length(min = 10, max = 10000, message = "Description must be 10-10000 characters"))]
    pub description: String,

    #[validate(length(max = 120, message = "Location must be at most 120 characters"))]
    pub location: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    #[validate(range(min = 0, message = "Rate cannot be negative"))]
    pub rate: Option<i32>,
}

/// Update job request
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateJobRequest {
    #[validate(length(min = 3, max = 160, message = "Title must be 3-160 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 10, max = 10000, message = "Description must be 10-10000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 120, message = "Location must be at most 120 characters"))]
    pub location: Option<String>,

    pub skills: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    #[validate(range(min = 0, message = "Rate cannot be negative"))]
    pub rate: Option<i32>,

    /// "open", "closed", or "filled"
    pub status: Option<String>,
}

// ============================================================================
// Application Requests
// ============================================================================

/// Apply to a job
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct ApplyRequest {
    #[validate(length(max = 4000, message = "Cover note must be at most 4000 characters"))]
    pub cover_note: Option<String>,
}

/// Change an application's status
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateApplicationRequest {
    /// One of the application status strings
    pub status: String,
}

// ============================================================================
// Messaging Requests
// ============================================================================

/// Send a message to another user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub body: String,
}

// ============================================================================
// Notification Requests
// ============================================================================

/// Admin-only direct notification creation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    /// Recipient user ID (Snowflake as string)
    pub user_id: String,

    /// One of the notification type strings
    #[serde(rename = "type")]
    pub kind: String,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,

    /// "low", "normal", or "high"; defaults to "normal"
    pub priority: Option<String>,

    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<String>,
    pub action_url: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Upsert notification settings
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSettingsRequest {
    pub email_messages: Option<bool>,
    pub email_applications: Option<bool>,
    pub email_jobs: Option<bool>,
    pub email_ratings: Option<bool>,
    /// "instant", "daily", or "weekly"
    pub digest: Option<String>,
}

// ============================================================================
// Job Alert Requests
// ============================================================================

/// Create a saved job search
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct CreateJobAlertRequest {
    #[validate(length(max = 200, message = "Keywords must be at most 200 characters"))]
    pub keywords: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub locations: Vec<String>,

    pub starts_after: Option<NaiveDate>,
    pub starts_before: Option<NaiveDate>,
}

/// Update a saved job search
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateJobAlertRequest {
    #[validate(length(max = 200, message = "Keywords must be at most 200 characters"))]
    pub keywords: Option<String>,

    pub skills: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
    pub starts_after: Option<NaiveDate>,
    pub starts_before: Option<NaiveDate>,
    pub active: Option<bool>,
}

// ============================================================================
// Rating Requests
// ============================================================================

/// Create a rating
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRatingRequest {
    /// Job the rating refers to (Snowflake as string)
    pub job_id: String,

    /// User being rated (Snowflake as string)
    pub ratee_id: String,

    #[validate(range(min = 1, max = 5, message = "Score must be 1-5"))]
    pub score: i16,

    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub comment: Option<String>,
}

/// Ask a freelancer for a rating
#[derive(Debug, Clone, Deserialize)]
pub struct RequestRatingRequest {
    /// Job the request refers to (Snowflake as string)
    pub job_id: String,

    /// Freelancer to ask (Snowflake as string)
    pub freelancer_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            email: "crew@example.com".into(),
            password: "GoodPass1".into(),
            display_name: "Crew Member".into(),
            role: "freelancer".into(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".into(),
            ..ok.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".into(),
            ..ok
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_send_message_validation() {
        let empty = SendMessageRequest { body: String::new() };
        assert!(empty.validate().is_err());

        let ok = SendMessageRequest { body: "hi".into() };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_rating_score_range() {
        let ok = CreateRatingRequest {
            job_id: "1".into(),
            ratee_id: "2".into(),
            score: 5,
            comment: None,
        };
        assert!(ok.validate().is_ok());

        let out_of_range = CreateRatingRequest { score: 6, ..ok };
        assert!(out_of_range.validate().is_err());
    }
}

//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize`. Snowflake IDs serialize as
//! strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use eventlink_core::entities::{
    Application, Conversation, DigestMode, Job, JobAlert, Message, Notification,
    NotificationPriority, NotificationSettings, Rating, User, UserRole,
};
use eventlink_core::BadgeCounts;

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// The caller's own account
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            role: user.role,
            headline: user.headline.clone(),
            bio: user.bio.clone(),
            location: user.location.clone(),
            skills: user.skills.clone(),
            avatar: user.avatar.clone(),
            created_at: user.created_at,
        }
    }
}

/// Public profile (no email)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub display_name: String,
    pub role: UserRole,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub avatar: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            display_name: user.display_name.clone(),
            role: user.role,
            headline: user.headline.clone(),
            bio: user.bio.clone(),
            location: user.location.clone(),
            skills: user.skills.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

// ============================================================================
// Job Responses
// ============================================================================

/// Job posting
#[derive(Debug, Clone, Serialize)]
pub struct JobResponse {
    pub id: String,
    pub recruiter_id: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub rate: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Job> for JobResponse {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.to_string(),
            recruiter_id: job.recruiter_id.to_string(),
            title: job.title.clone(),
            description: job.description.clone(),
            location: job.location.clone(),
            skills: job.skills.clone(),
            start_date: job.start_date,
            end_date: job.end_date,
            rate: job.rate,
            status: job.status.as_str().to_string(),
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

// ============================================================================
// Application Responses
// ============================================================================

/// Job application
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
    pub id: String,
    pub job_id: String,
    pub freelancer_id: String,
    pub cover_note: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Application> for ApplicationResponse {
    fn from(application: &Application) -> Self {
        Self {
            id: application.id.to_string(),
            job_id: application.job_id.to_string(),
            freelancer_id: application.freelancer_id.to_string(),
            cover_note: application.cover_note.clone(),
            status: application.status.as_str().to_string(),
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

// ============================================================================
// Messaging Responses
// ============================================================================

/// One message in a conversation
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            conversation_id: message.conversation_id.to_string(),
            sender_id: message.sender_id.to_string(),
            body: message.body.clone(),
            is_read: message.is_read,
            created_at: message.created_at,
        }
    }
}

/// Conversation as shown in the caller's inbox list
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    /// The counterpart, from the caller's point of view
    pub other_participant: Option<UserResponse>,
    /// Messages unread by the caller
    pub unread_count: i64,
    pub updated_at: DateTime<Utc>,
}

impl ConversationResponse {
    pub fn new(
        conversation: &Conversation,
        other_participant: Option<UserResponse>,
        unread_count: i64,
    ) -> Self {
        Self {
            id: conversation.id.to_string(),
            other_participant,
            unread_count,
            updated_at: conversation.updated_at,
        }
    }
}

// ============================================================================
// Notification Responses
// ============================================================================

/// One notification
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub priority: NotificationPriority,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<String>,
    pub action_url: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationResponse {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            user_id: n.user_id.to_string(),
            kind: n.kind.as_str().to_string(),
            category: n.category().as_str().to_string(),
            title: n.title.clone(),
            message: n.message.clone(),
            is_read: n.is_read,
            priority: n.priority,
            related_entity_type: n.related_entity_type.clone(),
            related_entity_id: n.related_entity_id.map(|id| id.to_string()),
            action_url: n.action_url.clone(),
            metadata: n.metadata.clone(),
            expires_at: n.expires_at,
            created_at: n.created_at,
        }
    }
}

/// Plain unread total, for the polling endpoint
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

/// Badge counts are returned as-is
pub type CategoryCountsResponse = BadgeCounts;

/// Notification settings
#[derive(Debug, Clone, Serialize)]
pub struct NotificationSettingsResponse {
    pub email_messages: bool,
    pub email_applications: bool,
    pub email_jobs: bool,
    pub email_ratings: bool,
    pub digest: DigestMode,
}

impl From<&NotificationSettings> for NotificationSettingsResponse {
    fn from(s: &NotificationSettings) -> Self {
        Self {
            email_messages: s.email_messages,
            email_applications: s.email_applications,
            email_jobs: s.email_jobs,
            email_ratings: s.email_ratings,
            digest: s.digest,
        }
    }
}

// ============================================================================
// Job Alert Responses
// ============================================================================

/// Saved job search
#[derive(Debug, Clone, Serialize)]
pub struct JobAlertResponse {
    pub id: String,
    pub keywords: Option<String>,
    pub skills: Vec<String>,
    pub locations: Vec<String>,
    pub starts_after: Option<NaiveDate>,
    pub starts_before: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&JobAlert> for JobAlertResponse {
    fn from(alert: &JobAlert) -> Self {
        Self {
            id: alert.id.to_string(),
            keywords: alert.keywords.clone(),
            skills: alert.skills.clone(),
            locations: alert.locations.clone(),
            starts_after: alert.starts_after,
            starts_before: alert.starts_before,
            active: alert.active,
            created_at: alert.created_at,
            updated_at: alert.updated_at,
        }
    }
}

// ============================================================================
// Rating Responses
// ============================================================================

/// One rating
#[derive(Debug, Clone, Serialize)]
pub struct RatingResponse {
    pub id: String,
    pub job_id: String,
    pub rater_id: String,
    pub ratee_id: String,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Rating> for RatingResponse {
    fn from(rating: &Rating) -> Self {
        Self {
            id: rating.id.to_string(),
            job_id: rating.job_id.to_string(),
            rater_id: rating.rater_id.to_string(),
            ratee_id: rating.ratee_id.to_string(),
            score: rating.score,
            comment: rating.comment.clone(),
            created_at: rating.created_at,
        }
    }
}

/// Ratings received by a user, with their average
#[derive(Debug, Clone, Serialize)]
pub struct RatingListResponse {
    pub average: Option<f64>,
    pub ratings: Vec<RatingResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventlink_core::entities::NotificationType;
    use eventlink_core::Snowflake;

    #[test]
    fn test_notification_response_includes_category() {
        let n = Notification::new(
            Snowflake::new(1),
            Snowflake::new(2),
            NotificationType::ApplicationUpdate,
            "t".into(),
            "m".into(),
        );
        let response = NotificationResponse::from(&n);
        assert_eq!(response.kind, "application_update");
        assert_eq!(response.category, "applications");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "application_update");
        assert_eq!(json["id"], "1");
    }

    #[test]
    fn test_public_profile_has_no_email() {
        let user = User::new(
            Snowflake::new(1),
            "secret@example.com".into(),
            "Sam".into(),
            UserRole::Freelancer,
        );
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert!(json.get("email").is_none());
        assert_eq!(json["display_name"], "Sam");
    }
}

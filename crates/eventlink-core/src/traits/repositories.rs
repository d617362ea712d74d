//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Application, ApplicationStatus, Conversation, Job, JobAlert, Message, Notification,
    NotificationSettings, NotificationType, Participant, Rating, User, UserRole,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user's profile fields
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Soft delete a user
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// List users, optionally filtered by role
    async fn list(&self, role: Option<UserRole>, limit: i64, offset: i64) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Job Repository
// ============================================================================

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Find job by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Job>>;

    /// List open jobs, newest first
    async fn list_open(&self, limit: i64, offset: i64) -> RepoResult<Vec<Job>>;

    /// List jobs posted by a recruiter
    async fn find_by_recruiter(&self, recruiter_id: Snowflake) -> RepoResult<Vec<Job>>;

    /// Create a new job
    async fn create(&self, job: &Job) -> RepoResult<()>;

    /// Update an existing job
    async fn update(&self, job: &Job) -> RepoResult<()>;

    /// Soft delete a job
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Application Repository
// ============================================================================

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Find application by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Application>>;

    /// List applications for a job, newest first
    async fn find_by_job(&self, job_id: Snowflake) -> RepoResult<Vec<Application>>;

    /// List a freelancer's applications, newest first
    async fn find_by_freelancer(&self, freelancer_id: Snowflake) -> RepoResult<Vec<Application>>;

    /// Find the application of a freelancer to a specific job
    async fn find_by_job_and_freelancer(
        &self,
        job_id: Snowflake,
        freelancer_id: Snowflake,
    ) -> RepoResult<Option<Application>>;

    /// Create a new application
    async fn create(&self, application: &Application) -> RepoResult<()>;

    /// Update the status of an application
    async fn update_status(&self, id: Snowflake, status: ApplicationStatus) -> RepoResult<()>;
}

// ============================================================================
// Conversation Repository
// ============================================================================

/// Pagination options for message queries
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    pub before: Option<Snowflake>,
    pub limit: i64,
}

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find conversation by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Conversation>>;

    /// Find the conversation between two users, if any
    async fn find_between(&self, a: Snowflake, b: Snowflake) -> RepoResult<Option<Conversation>>;

    /// Create a conversation with its two participants
    async fn create(&self, conversation: &Conversation, a: Snowflake, b: Snowflake)
        -> RepoResult<()>;

    /// Get both participant rows (including per-user deletion state)
    async fn participants(&self, conversation_id: Snowflake) -> RepoResult<Vec<Participant>>;

    /// List conversations visible to a user, most recently updated first
    async fn find_visible_for(&self, user_id: Snowflake) -> RepoResult<Vec<Conversation>>;

    /// Insert a message
    async fn create_message(&self, message: &Message) -> RepoResult<()>;

    /// List messages in a conversation with pagination, newest first
    async fn find_messages(
        &self,
        conversation_id: Snowflake,
        query: MessageQuery,
    ) -> RepoResult<Vec<Message>>;

    /// Mark all messages from the counterpart as read for the reader.
    /// Returns the number of rows flipped.
    async fn mark_messages_read(
        &self,
        conversation_id: Snowflake,
        reader_id: Snowflake,
    ) -> RepoResult<u64>;

    /// Count messages unread by a participant in one conversation
    async fn unread_message_count(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<i64>;

    /// Hide the conversation from one participant's view
    async fn soft_delete_for(&self, conversation_id: Snowflake, user_id: Snowflake)
        -> RepoResult<()>;

    /// Clear a participant's deletion marker (new activity restores
    /// the conversation in their list)
    async fn restore_for(&self, conversation_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Bump the conversation's updated_at to now
    async fn touch(&self, conversation_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Find notification by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    /// List non-expired notifications for a user, newest first
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Notification>>;

    /// Insert a notification row
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Count unread, non-expired notifications for a user
    async fn count_unread(&self, user_id: Snowflake, now: DateTime<Utc>) -> RepoResult<i64>;

    /// Unread, non-expired counts grouped by notification type.
    ///
    /// The category fold happens in the domain layer so that every
    /// caller shares one mapping.
    async fn unread_counts_by_type(
        &self,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<(NotificationType, i64)>>;

    /// Flip one row to read. Returns false when the row was already read.
    async fn mark_read(&self, id: Snowflake) -> RepoResult<bool>;

    /// Flip all unread rows of the given types for a user. Returns rows flipped.
    async fn mark_read_by_types(
        &self,
        user_id: Snowflake,
        types: &[NotificationType],
    ) -> RepoResult<u64>;

    /// Flip all unread rows for a user. Returns rows flipped.
    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64>;

    /// Flip unread rows of one type tied to a related entity (e.g. the
    /// message notifications of one conversation). Returns rows flipped.
    async fn mark_read_for_related(
        &self,
        user_id: Snowflake,
        kind: NotificationType,
        related_entity_id: Snowflake,
    ) -> RepoResult<u64>;

    /// Hard delete one row. Returns false when it did not exist.
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Notification Settings Repository
// ============================================================================

#[async_trait]
pub trait NotificationSettingsRepository: Send + Sync {
    /// Get the stored settings row for a user, if any
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<NotificationSettings>>;

    /// Insert or replace the settings row for a user
    async fn upsert(&self, settings: &NotificationSettings) -> RepoResult<()>;
}

// ============================================================================
// Job Alert Repository
// ============================================================================

#[async_trait]
pub trait JobAlertRepository: Send + Sync {
    /// Find alert by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<JobAlert>>;

    /// List a user's alerts, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<JobAlert>>;

    /// List every active alert (for matching against a new job)
    async fn find_active(&self) -> RepoResult<Vec<JobAlert>>;

    /// Create a new alert
    async fn create(&self, alert: &JobAlert) -> RepoResult<()>;

    /// Update an existing alert
    async fn update(&self, alert: &JobAlert) -> RepoResult<()>;

    /// Delete an alert
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Rating Repository
// ============================================================================

#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Insert a rating
    async fn create(&self, rating: &Rating) -> RepoResult<()>;

    /// List ratings received by a user, newest first
    async fn find_by_ratee(&self, ratee_id: Snowflake) -> RepoResult<Vec<Rating>>;

    /// Whether a rating already exists for (job, rater, ratee)
    async fn exists(
        &self,
        job_id: Snowflake,
        rater_id: Snowflake,
        ratee_id: Snowflake,
    ) -> RepoResult<bool>;

    /// Average score received by a user
    async fn average_for(&self, ratee_id: Snowflake) -> RepoResult<Option<f64>>;
}

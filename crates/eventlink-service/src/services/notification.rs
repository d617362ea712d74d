//! Notification service - writer, badge-count aggregator, and
//! read-state reconciler
//!
//! The write path always commits the notification row first; the live
//! push and the email ride along afterwards as best-effort side
//! effects that can never fail the request. Badge counts are never
//! stored: both the polling endpoints and every push recompute them
//! from unread rows through the same function, so the two paths cannot
//! disagree.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, instrument, warn};

use eventlink_core::entities::{
    Notification, NotificationCategory, NotificationPriority, NotificationSettings,
    NotificationType, User,
};
use eventlink_core::{BadgeCounts, DomainError, Snowflake};
use eventlink_realtime::PushMessage;

use crate::dto::{
    CreateNotificationRequest, NotificationResponse, NotificationSettingsResponse,
    UpdateSettingsRequest,
};

use super::context::ServiceContext;
use super::email::send_detached;
use super::error::{ServiceError, ServiceResult};

/// Everything the writer needs to create one notification
#[derive(Debug, Clone)]
pub struct NotificationInput {
    pub user_id: Snowflake,
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub priority: NotificationPriority,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<Snowflake>,
    pub action_url: Option<String>,
    pub metadata: Option<Value>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NotificationInput {
    /// Create an input with the required fields
    pub fn new(
        user_id: Snowflake,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            kind,
            title: title.into(),
            message: message.into(),
            priority: NotificationPriority::default(),
            related_entity_type: None,
            related_entity_id: None,
            action_url: None,
            metadata: None,
            expires_at: None,
        }
    }

    /// Attach a related entity reference
    #[must_use]
    pub fn related(mut self, entity_type: impl Into<String>, entity_id: Snowflake) -> Self {
        self.related_entity_type = Some(entity_type.into());
        self.related_entity_id = Some(entity_id);
        self
    }

    /// Attach a client navigation target
    #[must_use]
    pub fn action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }

    /// Set the priority
    #[must_use]
    pub fn priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Writer
    // ========================================================================

    /// Write one notification row, then push and email best-effort.
    ///
    /// The row insert is the only step that can fail this call; push
    /// and email failures are logged and swallowed.
    #[instrument(skip(self, input), fields(user_id = %input.user_id, kind = %input.kind))]
    pub async fn notify(&self, input: NotificationInput) -> ServiceResult<Notification> {
        let mut notification = Notification::new(
            self.ctx.generate_id(),
            input.user_id,
            input.kind,
            input.title,
            input.message,
        );
        notification.priority = input.priority;
        notification.related_entity_type = input.related_entity_type;
        notification.related_entity_id = input.related_entity_id;
        notification.action_url = input.action_url;
        notification.metadata = input.metadata;
        notification.expires_at = input.expires_at;

        // The primary write: committed before any side effect is attempted
        self.ctx.notification_repo().create(&notification).await?;

        info!(notification_id = %notification.id, "Notification written");

        self.push_new(&notification).await;
        self.email_for(&notification).await;

        Ok(notification)
    }

    /// Admin-only direct creation
    #[instrument(skip(self, request))]
    pub async fn create_direct(
        &self,
        caller_id: Snowflake,
        request: CreateNotificationRequest,
    ) -> ServiceResult<NotificationResponse> {
        let caller = self.load_user(caller_id).await?;
        if !caller.role.is_admin() {
            return Err(DomainError::AdminOnly.into());
        }

        let recipient_id = parse_id(&request.user_id)?;
        // Recipient must exist
        self.load_user(recipient_id).await?;

        let kind = NotificationType::parse(&request.kind)
            .ok_or_else(|| ServiceError::validation(format!("Unknown notification type: {}", request.kind)))?;
        let priority = match &request.priority {
            Some(p) => NotificationPriority::parse(p)
                .ok_or_else(|| ServiceError::validation(format!("Unknown priority: {p}")))?,
            None => NotificationPriority::default(),
        };

        let mut input = NotificationInput::new(recipient_id, kind, request.title, request.message)
            .priority(priority);
        input.action_url = request.action_url;
        input.metadata = request.metadata;
        input.expires_at = request.expires_at;
        input.related_entity_type = request.related_entity_type;
        input.related_entity_id = request
            .related_entity_id
            .as_deref()
            .map(parse_id)
            .transpose()?;

        let notification = self.notify(input).await?;
        Ok(NotificationResponse::from(&notification))
    }

    // ========================================================================
    // Reads / aggregator
    // ========================================================================

    /// List the caller's non-expired notifications, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<NotificationResponse>> {
        let notifications = self
            .ctx
            .notification_repo()
            .find_by_user(user_id, Utc::now())
            .await?;

        Ok(notifications.iter().map(NotificationResponse::from).collect())
    }

    /// Unread total for the caller
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: Snowflake) -> ServiceResult<i64> {
        Ok(self
            .ctx
            .notification_repo()
            .count_unread(user_id, Utc::now())
            .await?)
    }

    /// Per-category unread counts.
    ///
    /// This is the single aggregation point: the HTTP polling endpoint
    /// and every push payload go through here, so they can never
    /// disagree. Pure read, safe to call arbitrarily often.
    #[instrument(skip(self))]
    pub async fn category_counts(&self, user_id: Snowflake) -> ServiceResult<BadgeCounts> {
        let by_type = self
            .ctx
            .notification_repo()
            .unread_counts_by_type(user_id, Utc::now())
            .await?;

        Ok(BadgeCounts::from_category_counts(
            by_type.into_iter().map(|(kind, n)| (kind.category(), n)),
        ))
    }

    // ========================================================================
    // Reconciler
    // ========================================================================

    /// Mark one notification read (owner or admin only).
    ///
    /// Idempotent: re-marking an already-read notification succeeds
    /// without further effect on counts.
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        caller_id: Snowflake,
        notification_id: Snowflake,
    ) -> ServiceResult<NotificationResponse> {
        let mut notification = self.authorize(caller_id, notification_id).await?;

        let flipped = self.ctx.notification_repo().mark_read(notification_id).await?;
        notification.is_read = true;

        if flipped {
            let counts = self.category_counts(notification.user_id).await?;
            let owner = notification.user_id;
            self.ctx
                .broadcaster()
                .notify(
                    owner,
                    &PushMessage::NotificationUpdated {
                        notification: serde_json::to_value(NotificationResponse::from(&notification))
                            .unwrap_or_default(),
                    },
                )
                .await;
            self.push_counts_value(owner, counts).await;
        }

        Ok(NotificationResponse::from(&notification))
    }

    /// Mark every unread notification of one category read for the caller
    #[instrument(skip(self))]
    pub async fn mark_category_read(
        &self,
        caller_id: Snowflake,
        category: &str,
    ) -> ServiceResult<BadgeCounts> {
        let category = NotificationCategory::parse(category)
            .ok_or_else(|| DomainError::InvalidCategory(category.to_string()))?;

        let flipped = self
            .ctx
            .notification_repo()
            .mark_read_by_types(caller_id, category.types())
            .await?;

        info!(category = %category, flipped, "Category marked read");

        let counts = self.category_counts(caller_id).await?;
        self.push_counts_value(caller_id, counts).await;

        Ok(counts)
    }

    /// Mark everything read for the caller.
    ///
    /// Pushes both the fresh counts and the full refreshed list, so
    /// connected tabs need no follow-up fetch.
    #[instrument(skip(self))]
    pub async fn mark_all_read(
        &self,
        caller_id: Snowflake,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let flipped = self.ctx.notification_repo().mark_all_read(caller_id).await?;

        info!(flipped, "All notifications marked read");

        let refreshed = self.list(caller_id).await?;
        let counts = self.category_counts(caller_id).await?;

        self.ctx
            .broadcaster()
            .notify(
                caller_id,
                &PushMessage::AllNotificationsUpdated {
                    notifications: serde_json::to_value(&refreshed).unwrap_or_default(),
                },
            )
            .await;
        self.push_counts_value(caller_id, counts).await;

        Ok(refreshed)
    }

    /// Delete one notification (owner or admin only)
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        caller_id: Snowflake,
        notification_id: Snowflake,
    ) -> ServiceResult<()> {
        let notification = self.authorize(caller_id, notification_id).await?;

        self.ctx.notification_repo().delete(notification_id).await?;

        let owner = notification.user_id;
        let counts = self.category_counts(owner).await?;
        self.push_counts_value(owner, counts).await;

        Ok(())
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// The caller's settings, falling back to the defaults
    #[instrument(skip(self))]
    pub async fn settings(&self, user_id: Snowflake) -> ServiceResult<NotificationSettingsResponse> {
        let settings = self.load_settings(user_id).await?;
        Ok(NotificationSettingsResponse::from(&settings))
    }

    /// Merge the request into the caller's settings and store them
    #[instrument(skip(self, request))]
    pub async fn update_settings(
        &self,
        user_id: Snowflake,
        request: UpdateSettingsRequest,
    ) -> ServiceResult<NotificationSettingsResponse> {
        let mut settings = self.load_settings(user_id).await?;

        if let Some(v) = request.email_messages {
            settings.email_messages = v;
        }
        if let Some(v) = request.email_applications {
            settings.email_applications = v;
        }
        if let Some(v) = request.email_jobs {
            settings.email_jobs = v;
        }
        if let Some(v) = request.email_ratings {
            settings.email_ratings = v;
        }
        if let Some(digest) = &request.digest {
            settings.digest = eventlink_core::entities::DigestMode::parse(digest)
                .ok_or_else(|| ServiceError::validation(format!("Unknown digest mode: {digest}")))?;
        }

        self.ctx.settings_repo().upsert(&settings).await?;

        Ok(NotificationSettingsResponse::from(&settings))
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    /// Recompute and push the caller's counts. Used by the other
    /// services after any mutation that could change unread state.
    pub async fn push_counts(&self, user_id: Snowflake) -> ServiceResult<BadgeCounts> {
        let counts = self.category_counts(user_id).await?;
        self.push_counts_value(user_id, counts).await;
        Ok(counts)
    }

    async fn push_counts_value(&self, user_id: Snowflake, counts: BadgeCounts) {
        self.ctx
            .broadcaster()
            .notify(user_id, &PushMessage::BadgeCountsUpdate { counts })
            .await;
    }

    async fn push_new(&self, notification: &Notification) {
        let owner = notification.user_id;
        self.ctx
            .broadcaster()
            .notify(
                owner,
                &PushMessage::NewNotification {
                    notification: serde_json::to_value(NotificationResponse::from(notification))
                        .unwrap_or_default(),
                },
            )
            .await;

        match self.category_counts(owner).await {
            Ok(counts) => self.push_counts_value(owner, counts).await,
            Err(e) => warn!(user_id = %owner, error = %e, "Count recompute for push failed"),
        }
    }

    /// Fire-and-forget email, honoring the recipient's settings
    async fn email_for(&self, notification: &Notification) {
        let settings = match self.load_settings(notification.user_id).await {
            Ok(s) => s,
            Err(e) => {
                warn!(user_id = %notification.user_id, error = %e, "Settings lookup failed, skipping email");
                return;
            }
        };

        if !settings.email_enabled_for(notification.category()) {
            return;
        }

        let recipient = match self.ctx.user_repo().find_by_id(notification.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return,
            Err(e) => {
                warn!(user_id = %notification.user_id, error = %e, "Recipient lookup failed, skipping email");
                return;
            }
        };

        send_detached(
            self.ctx.mailer().clone(),
            recipient.email,
            notification.title.clone(),
            notification.message.clone(),
        );
    }

    async fn load_settings(&self, user_id: Snowflake) -> ServiceResult<NotificationSettings> {
        Ok(self
            .ctx
            .settings_repo()
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| NotificationSettings::defaults_for(user_id)))
    }

    async fn load_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Load the notification and check owner-or-admin authorization
    async fn authorize(
        &self,
        caller_id: Snowflake,
        notification_id: Snowflake,
    ) -> ServiceResult<Notification> {
        let notification = self
            .ctx
            .notification_repo()
            .find_by_id(notification_id)
            .await?
            .ok_or(DomainError::NotificationNotFound(notification_id))?;

        if notification.user_id != caller_id {
            let caller = self.load_user(caller_id).await?;
            if !caller.role.is_admin() {
                return Err(DomainError::NotNotificationOwner.into());
            }
        }

        Ok(notification)
    }
}

fn parse_id(s: &str) -> Result<Snowflake, ServiceError> {
    s.parse()
        .map_err(|_| ServiceError::validation(format!("Invalid ID: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_builder() {
        let input = NotificationInput::new(
            Snowflake::new(1),
            NotificationType::NewMessage,
            "New message",
            "You have mail",
        )
        .related("conversation", Snowflake::new(9))
        .action_url("/messages/9")
        .priority(NotificationPriority::High);

        assert_eq!(input.related_entity_type.as_deref(), Some("conversation"));
        assert_eq!(input.related_entity_id, Some(Snowflake::new(9)));
        assert_eq!(input.action_url.as_deref(), Some("/messages/9"));
        assert_eq!(input.priority, NotificationPriority::High);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), Snowflake::new(42));
        assert!(parse_id("forty-two").is_err());
    }
}

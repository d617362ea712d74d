//! User service - profiles

use tracing::{instrument, warn};

use eventlink_core::entities::{NotificationType, User, UserRole};
use eventlink_core::{DomainError, Snowflake};

use crate::dto::{CurrentUserResponse, UpdateProfileRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::{NotificationInput, NotificationService};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's own account
    #[instrument(skip(self))]
    pub async fn me(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self.load_user(user_id).await?;
        Ok(CurrentUserResponse::from(&user))
    }

    /// Update the caller's profile
    #[instrument(skip(self, request))]
    pub async fn update_me(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self.load_user(user_id).await?;

        if let Some(display_name) = request.display_name {
            user.display_name = display_name;
        }
        if let Some(headline) = request.headline {
            user.headline = Some(headline);
        }
        if let Some(bio) = request.bio {
            user.bio = Some(bio);
        }
        if let Some(location) = request.location {
            user.location = Some(location);
        }
        if let Some(skills) = request.skills {
            user.skills = skills;
        }
        if let Some(avatar) = request.avatar {
            user.avatar = Some(avatar);
        }

        self.ctx.user_repo().update(&user).await?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// A public profile.
    ///
    /// A recruiter viewing a freelancer leaves a `profile_view`
    /// notification behind; the view itself never fails because of it.
    #[instrument(skip(self))]
    pub async fn get_public(
        &self,
        viewer_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<UserResponse> {
        let target = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or(DomainError::UserNotFound(target_id))?;

        if viewer_id != target_id {
            if let Ok(viewer) = self.load_user(viewer_id).await {
                if viewer.role.is_recruiter() && target.role.is_freelancer() {
                    let notifications = NotificationService::new(self.ctx);
                    if let Err(e) = notifications
                        .notify(
                            NotificationInput::new(
                                target_id,
                                NotificationType::ProfileView,
                                "Your profile was viewed".to_string(),
                                format!("{} looked at your profile", viewer.display_name),
                            )
                            .related("user", viewer_id),
                        )
                        .await
                    {
                        warn!(error = %e, "Profile-view notification failed (view kept)");
                    }
                }
            }
        }

        Ok(UserResponse::from(&target))
    }

    /// List profiles, optionally filtered by role
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        role: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<UserResponse>> {
        let role = match role {
            Some(s) => Some(
                UserRole::parse(s)
                    .ok_or_else(|| ServiceError::validation(format!("Unknown role: {s}")))?,
            ),
            None => None,
        };

        let users = self.ctx.user_repo().list(role, limit, offset).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    async fn load_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

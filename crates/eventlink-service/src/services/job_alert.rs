//! Job alert service - freelancer-owned saved searches

use tracing::{info, instrument};

use eventlink_core::entities::{JobAlert, User};
use eventlink_core::{DomainError, Snowflake};

use crate::dto::{CreateJobAlertRequest, JobAlertResponse, UpdateJobAlertRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Job alert service
pub struct JobAlertService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> JobAlertService<'a> {
    /// Create a new JobAlertService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's saved searches
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<JobAlertResponse>> {
        let alerts = self.ctx.job_alert_repo().find_by_user(user_id).await?;
        Ok(alerts.iter().map(JobAlertResponse::from).collect())
    }

    /// Create a saved search (freelancers only)
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: Snowflake,
        request: CreateJobAlertRequest,
    ) -> ServiceResult<JobAlertResponse> {
        let user = self.load_user(user_id).await?;
        if !user.role.is_freelancer() {
            return Err(DomainError::FreelancerOnly.into());
        }

        let mut alert = JobAlert::new(self.ctx.generate_id(), user_id);
        alert.keywords = request.keywords;
        alert.skills = request.skills;
        alert.locations = request.locations;
        alert.starts_after = request.starts_after;
        alert.starts_before = request.starts_before;

        self.ctx.job_alert_repo().create(&alert).await?;

        info!(alert_id = %alert.id, "Job alert created");

        Ok(JobAlertResponse::from(&alert))
    }

    /// Update a saved search.
    ///
    /// An alert owned by someone else is indistinguishable from a
    /// missing one: 404 either way.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Snowflake,
        alert_id: Snowflake,
        request: UpdateJobAlertRequest,
    ) -> ServiceResult<JobAlertResponse> {
        let mut alert = self.load_owned(user_id, alert_id).await?;

        if let Some(keywords) = request.keywords {
            alert.keywords = Some(keywords);
        }
        if let Some(skills) = request.skills {
            alert.skills = skills;
        }
        if let Some(locations) = request.locations {
            alert.locations = locations;
        }
        if let Some(starts_after) = request.starts_after {
            alert.starts_after = Some(starts_after);
        }
        if let Some(starts_before) = request.starts_before {
            alert.starts_before = Some(starts_before);
        }
        if let Some(active) = request.active {
            alert.active = active;
        }

        self.ctx.job_alert_repo().update(&alert).await?;

        Ok(JobAlertResponse::from(&alert))
    }

    /// Delete a saved search (owner only; 404 otherwise)
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Snowflake, alert_id: Snowflake) -> ServiceResult<()> {
        self.load_owned(user_id, alert_id).await?;
        self.ctx.job_alert_repo().delete(alert_id).await?;
        info!(alert_id = %alert_id, "Job alert deleted");
        Ok(())
    }

    async fn load_owned(&self, user_id: Snowflake, alert_id: Snowflake) -> ServiceResult<JobAlert> {
        let alert = self
            .ctx
            .job_alert_repo()
            .find_by_id(alert_id)
            .await?
            .ok_or(DomainError::JobAlertNotFound(alert_id))?;

        if alert.user_id != user_id {
            return Err(DomainError::JobAlertNotFound(alert_id).into());
        }

        Ok(alert)
    }

    async fn load_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

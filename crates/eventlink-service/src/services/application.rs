//! Application service - applying to jobs and tracking status

use tracing::{info, instrument};

use eventlink_core::entities::{Application, ApplicationStatus, NotificationType, User};
use eventlink_core::{DomainError, Snowflake};

use crate::dto::{ApplicationResponse, ApplyRequest, UpdateApplicationRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::{NotificationInput, NotificationService};

/// Application service
pub struct ApplicationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ApplicationService<'a> {
    /// Create a new ApplicationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply to an open job (freelancers only, once per job)
    #[instrument(skip(self, request))]
    pub async fn apply(
        &self,
        freelancer_id: Snowflake,
        job_id: Snowflake,
        request: ApplyRequest,
    ) -> ServiceResult<ApplicationResponse> {
        let freelancer = self.load_user(freelancer_id).await?;
        if !freelancer.role.is_freelancer() {
            return Err(DomainError::FreelancerOnly.into());
        }

        let job = self
            .ctx
            .job_repo()
            .find_by_id(job_id)
            .await?
            .ok_or(DomainError::JobNotFound(job_id))?;

        if !job.is_open() {
            return Err(DomainError::JobNotOpen.into());
        }
        if job.is_owned_by(freelancer_id) {
            return Err(DomainError::CannotApplyToOwnJob.into());
        }

        if self
            .ctx
            .application_repo()
            .find_by_job_and_freelancer(job_id, freelancer_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyApplied.into());
        }

        let mut application = Application::new(self.ctx.generate_id(), job_id, freelancer_id);
        application.cover_note = request.cover_note;

        self.ctx.application_repo().create(&application).await?;

        info!(application_id = %application.id, job_id = %job_id, "Application submitted");

        // Tell the recruiter; a failed notification write must not
        // undo the application itself
        let notifications = NotificationService::new(self.ctx);
        if let Err(e) = notifications
            .notify(
                NotificationInput::new(
                    job.recruiter_id,
                    NotificationType::ApplicationUpdate,
                    format!("New application for {}", job.title),
                    format!("{} applied to your job posting", freelancer.display_name),
                )
                .related("application", application.id)
                .action_url(format!("/jobs/{}/applications", job.id)),
            )
            .await
        {
            tracing::warn!(error = %e, "Recruiter notification failed (application kept)");
        }

        Ok(ApplicationResponse::from(&application))
    }

    /// Change an application's status.
    ///
    /// The job owner may set reviewed/accepted/rejected; the applicant
    /// may only withdraw. A recruiter-side change writes exactly one
    /// `application_update` notification to the freelancer.
    #[instrument(skip(self, request))]
    pub async fn update_status(
        &self,
        caller_id: Snowflake,
        application_id: Snowflake,
        request: UpdateApplicationRequest,
    ) -> ServiceResult<ApplicationResponse> {
        let status = ApplicationStatus::parse(&request.status)
            .ok_or_else(|| ServiceError::validation(format!("Unknown status: {}", request.status)))?;

        let mut application = self
            .ctx
            .application_repo()
            .find_by_id(application_id)
            .await?
            .ok_or(DomainError::ApplicationNotFound(application_id))?;

        let job = self
            .ctx
            .job_repo()
            .find_by_id(application.job_id)
            .await?
            .ok_or(DomainError::JobNotFound(application.job_id))?;

        let is_owner = job.is_owned_by(caller_id);
        let is_applicant = application.freelancer_id == caller_id;

        if is_owner {
            if !status.settable_by_recruiter() {
                return Err(ServiceError::validation(format!(
                    "Recruiters cannot set status '{status}'"
                )));
            }
        } else if is_applicant {
            if status != ApplicationStatus::Withdrawn {
                return Err(ServiceError::validation(
                    "Applicants can only withdraw their application",
                ));
            }
        } else {
            return Err(DomainError::NotJobOwner.into());
        }

        self.ctx
            .application_repo()
            .update_status(application_id, status)
            .await?;
        application.status = status;

        info!(application_id = %application_id, status = %status, "Application status changed");

        if is_owner {
            let notifications = NotificationService::new(self.ctx);
            if let Err(e) = notifications
                .notify(
                    NotificationInput::new(
                        application.freelancer_id,
                        NotificationType::ApplicationUpdate,
                        format!("Application {status}"),
                        format!("Your application for {} is now {status}", job.title),
                    )
                    .related("application", application.id)
                    .action_url("/applications".to_string()),
                )
                .await
            {
                tracing::warn!(error = %e, "Applicant notification failed (status kept)");
            }
        }

        Ok(ApplicationResponse::from(&application))
    }

    /// Applications for a job (job owner or admin)
    #[instrument(skip(self))]
    pub async fn list_for_job(
        &self,
        caller_id: Snowflake,
        job_id: Snowflake,
    ) -> ServiceResult<Vec<ApplicationResponse>> {
        let job = self
            .ctx
            .job_repo()
            .find_by_id(job_id)
            .await?
            .ok_or(DomainError::JobNotFound(job_id))?;

        if !job.is_owned_by(caller_id) {
            let caller = self.load_user(caller_id).await?;
            if !caller.role.is_admin() {
                return Err(DomainError::NotJobOwner.into());
            }
        }

        let applications = self.ctx.application_repo().find_by_job(job_id).await?;
        Ok(applications.iter().map(ApplicationResponse::from).collect())
    }

    /// The caller's own applications
    #[instrument(skip(self))]
    pub async fn list_own(&self, freelancer_id: Snowflake) -> ServiceResult<Vec<ApplicationResponse>> {
        let applications = self
            .ctx
            .application_repo()
            .find_by_freelancer(freelancer_id)
            .await?;
        Ok(applications.iter().map(ApplicationResponse::from).collect())
    }

    async fn load_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

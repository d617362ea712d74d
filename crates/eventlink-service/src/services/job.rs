//! Job service - postings, updates, and alert matching

use std::collections::HashSet;

use tracing::{info, instrument, warn};

use eventlink_core::entities::{Job, JobStatus, NotificationType, User};
use eventlink_core::{DomainError, Snowflake};

use crate::dto::{CreateJobRequest, JobResponse, UpdateJobRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::{NotificationInput, NotificationService};

/// Job service
pub struct JobService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> JobService<'a> {
    /// Create a new JobService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a new job (recruiters only).
    ///
    /// Active saved searches are matched against the posting; each
    /// matching freelancer gets a `job_update` notification (and email
    /// per their settings). Alert failures never fail the posting.
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        recruiter_id: Snowflake,
        request: CreateJobRequest,
    ) -> ServiceResult<JobResponse> {
        let recruiter = self.load_user(recruiter_id).await?;
        if !recruiter.role.is_recruiter() && !recruiter.role.is_admin() {
            return Err(DomainError::RecruiterOnly.into());
        }

        let mut job = Job::new(
            self.ctx.generate_id(),
            recruiter_id,
            request.title,
            request.description,
        );
        job.location = request.location;
        job.skills = request.skills;
        job.start_date = request.start_date;
        job.end_date = request.end_date;
        job.rate = request.rate;

        self.ctx.job_repo().create(&job).await?;

        info!(job_id = %job.id, "Job posted");

        if let Err(e) = self.fan_out_alerts(&job).await {
            warn!(job_id = %job.id, error = %e, "Job alert fan-out failed (posting kept)");
        }

        Ok(JobResponse::from(&job))
    }

    /// Fetch one job
    #[instrument(skip(self))]
    pub async fn get(&self, job_id: Snowflake) -> ServiceResult<JobResponse> {
        let job = self
            .ctx
            .job_repo()
            .find_by_id(job_id)
            .await?
            .ok_or(DomainError::JobNotFound(job_id))?;
        Ok(JobResponse::from(&job))
    }

    /// Open jobs, newest first
    #[instrument(skip(self))]
    pub async fn list_open(&self, limit: i64, offset: i64) -> ServiceResult<Vec<JobResponse>> {
        let jobs = self.ctx.job_repo().list_open(limit, offset).await?;
        Ok(jobs.iter().map(JobResponse::from).collect())
    }

    /// Update a posting (owner or admin). Applicants are told about
    /// the change.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        caller_id: Snowflake,
        job_id: Snowflake,
        request: UpdateJobRequest,
    ) -> ServiceResult<JobResponse> {
        let mut job = self.authorize(caller_id, job_id).await?;

        if let Some(title) = request.title {
            job.title = title;
        }
        if let Some(description) = request.description {
            job.description = description;
        }
        if let Some(location) = request.location {
            job.location = Some(location);
        }
        if let Some(skills) = request.skills {
            job.skills = skills;
        }
        if let Some(start_date) = request.start_date {
            job.start_date = Some(start_date);
        }
        if let Some(end_date) = request.end_date {
            job.end_date = Some(end_date);
        }
        if let Some(rate) = request.rate {
            job.rate = Some(rate);
        }
        if let Some(status) = &request.status {
            job.status = JobStatus::parse(status)
                .ok_or_else(|| ServiceError::validation(format!("Unknown status: {status}")))?;
        }

        self.ctx.job_repo().update(&job).await?;

        info!(job_id = %job.id, "Job updated");

        if let Err(e) = self.notify_applicants(&job).await {
            warn!(job_id = %job.id, error = %e, "Applicant notification failed (update kept)");
        }

        Ok(JobResponse::from(&job))
    }

    /// Remove a posting (owner or admin; soft delete)
    #[instrument(skip(self))]
    pub async fn delete(&self, caller_id: Snowflake, job_id: Snowflake) -> ServiceResult<()> {
        self.authorize(caller_id, job_id).await?;
        self.ctx.job_repo().delete(job_id).await?;
        info!(job_id = %job_id, "Job removed");
        Ok(())
    }

    /// Match active saved searches against a fresh posting
    async fn fan_out_alerts(&self, job: &Job) -> ServiceResult<()> {
        let alerts = self.ctx.job_alert_repo().find_active().await?;
        let notifications = NotificationService::new(self.ctx);

        // One notification per user even when several of their alerts match
        let mut notified: HashSet<Snowflake> = HashSet::new();

        for alert in alerts {
            if alert.user_id == job.recruiter_id || notified.contains(&alert.user_id) {
                continue;
            }
            if !alert.matches(job) {
                continue;
            }

            notifications
                .notify(
                    NotificationInput::new(
                        alert.user_id,
                        NotificationType::JobUpdate,
                        format!("New job: {}", job.title),
                        "A new job posting matches your saved search".to_string(),
                    )
                    .related("job", job.id)
                    .action_url(format!("/jobs/{}", job.id)),
                )
                .await?;

            notified.insert(alert.user_id);
        }

        if !notified.is_empty() {
            info!(job_id = %job.id, matched = notified.len(), "Job alerts fanned out");
        }

        Ok(())
    }

    /// Tell every applicant the posting changed
    async fn notify_applicants(&self, job: &Job) -> ServiceResult<()> {
        let applications = self.ctx.application_repo().find_by_job(job.id).await?;
        let notifications = NotificationService::new(self.ctx);

        let mut notified: HashSet<Snowflake> = HashSet::new();
        for application in applications {
            if !notified.insert(application.freelancer_id) {
                continue;
            }
            notifications
                .notify(
                    NotificationInput::new(
                        application.freelancer_id,
                        NotificationType::JobUpdate,
                        format!("Job updated: {}", job.title),
                        "A job you applied to was updated".to_string(),
                    )
                    .related("job", job.id)
                    .action_url(format!("/jobs/{}", job.id)),
                )
                .await?;
        }

        Ok(())
    }

    /// Load the job and check owner-or-admin authorization
    async fn authorize(&self, caller_id: Snowflake, job_id: Snowflake) -> ServiceResult<Job> {
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

        Ok(job)
    }

    async fn load_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

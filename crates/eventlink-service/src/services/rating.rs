//! Rating service - post-job feedback between the two sides

use tracing::{info, instrument, warn};

use eventlink_core::entities::{NotificationType, Rating, User};
use eventlink_core::{DomainError, Snowflake};

use crate::dto::{CreateRatingRequest, RatingListResponse, RatingResponse, RequestRatingRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::{NotificationInput, NotificationService};

/// Rating service
pub struct RatingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RatingService<'a> {
    /// Create a new RatingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Rate a counterpart for a job.
    ///
    /// The rater must have been involved with the job: as its owner,
    /// or as an applicant. One rating per (job, rater, ratee).
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        rater_id: Snowflake,
        request: CreateRatingRequest,
    ) -> ServiceResult<RatingResponse> {
        let job_id = parse_id(&request.job_id)?;
        let ratee_id = parse_id(&request.ratee_id)?;

        let job = self
            .ctx
            .job_repo()
            .find_by_id(job_id)
            .await?
            .ok_or(DomainError::JobNotFound(job_id))?;

        // Ratee must exist
        self.load_user(ratee_id).await?;

        let involved = job.is_owned_by(rater_id)
            || self
                .ctx
                .application_repo()
                .find_by_job_and_freelancer(job_id, rater_id)
                .await?
                .is_some();
        if !involved {
            return Err(ServiceError::permission_denied(
                "Only participants of the job can rate",
            ));
        }

        if self
            .ctx
            .rating_repo()
            .exists(job_id, rater_id, ratee_id)
            .await?
        {
            return Err(DomainError::AlreadyRated.into());
        }

        let mut rating = Rating::new(self.ctx.generate_id(), job_id, rater_id, ratee_id, request.score)?;
        rating.comment = request.comment;

        self.ctx.rating_repo().create(&rating).await?;

        info!(rating_id = %rating.id, score = rating.score, "Rating created");

        let rater = self.load_user(rater_id).await?;
        let notifications = NotificationService::new(self.ctx);
        if let Err(e) = notifications
            .notify(
                NotificationInput::new(
                    ratee_id,
                    NotificationType::RatingReceived,
                    format!("New rating from {}", rater.display_name),
                    format!("You received {} out of 5 stars for {}", rating.score, job.title),
                )
                .related("rating", rating.id),
            )
            .await
        {
            warn!(error = %e, "Ratee notification failed (rating kept)");
        }

        Ok(RatingResponse::from(&rating))
    }

    /// Ratings received by a user, with their average
    #[instrument(skip(self))]
    pub async fn list_for(&self, ratee_id: Snowflake) -> ServiceResult<RatingListResponse> {
        let ratings = self.ctx.rating_repo().find_by_ratee(ratee_id).await?;
        let average = self.ctx.rating_repo().average_for(ratee_id).await?;

        Ok(RatingListResponse {
            average,
            ratings: ratings.iter().map(RatingResponse::from).collect(),
        })
    }

    /// Ask a freelancer to rate the recruiter after a job
    #[instrument(skip(self, request))]
    pub async fn request_rating(
        &self,
        caller_id: Snowflake,
        request: RequestRatingRequest,
    ) -> ServiceResult<()> {
        let job_id = parse_id(&request.job_id)?;
        let freelancer_id = parse_id(&request.freelancer_id)?;

        let caller = self.load_user(caller_id).await?;
        if !caller.role.is_recruiter() && !caller.role.is_admin() {
            return Err(DomainError::RecruiterOnly.into());
        }

        let job = self
            .ctx
            .job_repo()
            .find_by_id(job_id)
            .await?
            .ok_or(DomainError::JobNotFound(job_id))?;

        if !job.is_owned_by(caller_id) && !caller.role.is_admin() {
            return Err(DomainError::NotJobOwner.into());
        }

        // The freelancer must exist
        self.load_user(freelancer_id).await?;

        let notifications = NotificationService::new(self.ctx);
        notifications
            .notify(
                NotificationInput::new(
                    freelancer_id,
                    NotificationType::RatingRequest,
                    format!("Rate your experience on {}", job.title),
                    format!("{} asked for your feedback", caller.display_name),
                )
                .related("job", job.id)
                .action_url(format!("/jobs/{}/rate", job.id)),
            )
            .await?;

        Ok(())
    }

    async fn load_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

fn parse_id(s: &str) -> Result<Snowflake, ServiceError> {
    s.parse()
        .map_err(|_| ServiceError::validation(format!("Invalid ID: {s}")))
}

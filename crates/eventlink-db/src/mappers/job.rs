//! Job entity <-> model mapper

use eventlink_core::entities::{Job, JobStatus};
use eventlink_core::{DomainError, Snowflake};

use crate::models::JobModel;

use super::bad_enum;

impl TryFrom<JobModel> for Job {
    type Error = DomainError;

    fn try_from(model: JobModel) -> Result<Self, Self::Error> {
        let status = JobStatus::parse(&model.status)
            .ok_or_else(|| bad_enum("jobs", "status", &model.status))?;

        Ok(Job {
            id: Snowflake::new(model.id),
            recruiter_id: Snowflake::new(model.recruiter_id),
            title: model.title,
            description: model.description,
            location: model.location,
            skills: model.skills,
            start_date: model.start_date,
            end_date: model.end_date,
            rate: model.rate,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

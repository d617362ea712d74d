//! Application entity <-> model mapper

use eventlink_core::entities::{Application, ApplicationStatus};
use eventlink_core::{DomainError, Snowflake};

use crate::models::ApplicationModel;

use super::bad_enum;

impl TryFrom<ApplicationModel> for Application {
    type Error = DomainError;

    fn try_from(model: ApplicationModel) -> Result<Self, Self::Error> {
        let status = ApplicationStatus::parse(&model.status)
            .ok_or_else(|| bad_enum("applications", "status", &model.status))?;

        Ok(Application {
            id: Snowflake::new(model.id),
            job_id: Snowflake::new(model.job_id),
            freelancer_id: Snowflake::new(model.freelancer_id),
            cover_note: model.cover_note,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

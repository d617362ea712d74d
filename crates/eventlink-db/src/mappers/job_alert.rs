//! Job alert entity <-> model mapper

use eventlink_core::entities::JobAlert;
use eventlink_core::Snowflake;

use crate::models::JobAlertModel;

impl From<JobAlertModel> for JobAlert {
    fn from(model: JobAlertModel) -> Self {
        JobAlert {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            keywords: model.keywords,
            skills: model.skills,
            locations: model.locations,
            starts_after: model.starts_after,
            starts_before: model.starts_before,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

//! Rating entity <-> model mapper

use eventlink_core::entities::Rating;
use eventlink_core::Snowflake;

use crate::models::RatingModel;

impl From<RatingModel> for Rating {
    fn from(model: RatingModel) -> Self {
        Rating {
            id: Snowflake::new(model.id),
            job_id: Snowflake::new(model.job_id),
            rater_id: Snowflake::new(model.rater_id),
            ratee_id: Snowflake::new(model.ratee_id),
            score: model.score,
            comment: model.comment,
            created_at: model.created_at,
        }
    }
}

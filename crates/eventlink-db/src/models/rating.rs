//! Rating database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the ratings table
#[derive(Debug, Clone, FromRow)]
pub struct RatingModel {
    pub id: i64,
    pub job_id: i64,
    pub rater_id: i64,
    pub ratee_id: i64,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

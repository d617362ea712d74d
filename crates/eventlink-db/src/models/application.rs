//! Application database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the applications table
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationModel {
    pub id: i64,
    pub job_id: i64,
    pub freelancer_id: i64,
    pub cover_note: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

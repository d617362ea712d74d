//! Job database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for the jobs table
#[derive(Debug, Clone, FromRow)]
pub struct JobModel {
    pub id: i64,
    pub recruiter_id: i64,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub rate: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl JobModel {
    /// Check if the job is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

//! Job alert database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for the job_alerts table
#[derive(Debug, Clone, FromRow)]
pub struct JobAlertModel {
    pub id: i64,
    pub user_id: i64,
    pub keywords: Option<String>,
    pub skills: Vec<String>,
    pub locations: Vec<String>,
    pub starts_after: Option<NaiveDate>,
    pub starts_before: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

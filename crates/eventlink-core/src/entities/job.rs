//! Job entity - a posting by a recruiter

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    Closed,
    Filled,
}

impl JobStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Filled => "filled",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            "filled" => Some(Self::Filled),
            _ => None,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job entity
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: Snowflake,
    pub recruiter_id: Snowflake,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Offered day rate in whole currency units
    pub rate: Option<i32>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a new open job
    pub fn new(id: Snowflake, recruiter_id: Snowflake, title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            recruiter_id,
            title,
            description,
            location: None,
            skills: Vec::new(),
            start_date: None,
            end_date: None,
            rate: None,
            status: JobStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether applications are accepted
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }

    /// Whether the given user owns this posting
    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.recruiter_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [JobStatus::Open, JobStatus::Closed, JobStatus::Filled] {
            assert_eq!(JobStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(JobStatus::parse("paused"), None);
    }

    #[test]
    fn test_new_job_is_open() {
        let job = Job::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "Lighting tech".into(),
            "Operate the rig".into(),
        );
        assert!(job.is_open());
        assert!(job.is_owned_by(Snowflake::new(2)));
        assert!(!job.is_owned_by(Snowflake::new(3)));
    }
}

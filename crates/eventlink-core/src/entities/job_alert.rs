//! Job alert entity - a freelancer's saved search
//!
//! New job postings are matched against active alerts to decide which
//! freelancers get a `job_update` notification/email.

use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::Job;
use crate::value_objects::Snowflake;

/// Saved search filters owned by a freelancer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobAlert {
    pub id: Snowflake,
    pub user_id: Snowflake,
    /// Free-text keywords matched against title and description
    pub keywords: Option<String>,
    pub skills: Vec<String>,
    pub locations: Vec<String>,
    /// Only match jobs starting on or after this date
    pub starts_after: Option<NaiveDate>,
    /// Only match jobs starting on or before this date
    pub starts_before: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobAlert {
    /// Create a new active alert with no filters (matches every job)
    pub fn new(id: Snowflake, user_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            keywords: None,
            skills: Vec::new(),
            locations: Vec::new(),
            starts_after: None,
            starts_before: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this alert matches the given job.
    ///
    /// Each populated filter must match; an empty filter matches
    /// everything. Keyword matching is a case-insensitive substring
    /// check against title and description; skills and locations match
    /// on any overlap, case-insensitively.
    pub fn matches(&self, job: &Job) -> bool {
        if !self.active {
            return false;
        }

        if let Some(keywords) = &self.keywords {
            let needle = keywords.to_lowercase();
            if !needle.trim().is_empty() {
                let haystack = format!("{} {}", job.title, job.description).to_lowercase();
                if !haystack.contains(needle.trim()) {
                    return false;
                }
            }
        }

        if !self.skills.is_empty() {
            let wanted: Vec<String> = self.skills.iter().map(|s| s.to_lowercase()).collect();
            let has_overlap = job
                .skills
                .iter()
                .any(|s| wanted.contains(&s.to_lowercase()));
            if !has_overlap {
                return false;
            }
        }

        if !self.locations.is_empty() {
            let Some(location) = &job.location else {
                return false;
            };
            let location = location.to_lowercase();
            if !self
                .locations
                .iter()
                .any(|l| l.to_lowercase() == location)
            {
                return false;
            }
        }

        if self.starts_after.is_some() || self.starts_before.is_some() {
            // A date-range filter cannot match a job without a start date
            let Some(start) = job.start_date else {
                return false;
            };
            if self.starts_after.is_some_and(|after| start < after) {
                return false;
            }
            if self.starts_before.is_some_and(|before| start > before) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::JobStatus;

    fn sample_job() -> Job {
        let mut job = Job::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "FOH sound engineer".into(),
            "Mix front of house for a three-day festival".into(),
        );
        job.location = Some("Berlin".into());
        job.skills = vec!["sound".into(), "mixing".into()];
        job
    }

    #[test]
    fn test_empty_alert_matches_everything() {
        let alert = JobAlert::new(Snowflake::new(9), Snowflake::new(8));
        assert!(alert.matches(&sample_job()));
    }

    #[test]
    fn test_inactive_alert_never_matches() {
        let mut alert = JobAlert::new(Snowflake::new(9), Snowflake::new(8));
        alert.active = false;
        assert!(!alert.matches(&sample_job()));
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        let mut alert = JobAlert::new(Snowflake::new(9), Snowflake::new(8));
        alert.keywords = Some("FESTIVAL".into());
        assert!(alert.matches(&sample_job()));

        alert.keywords = Some("corporate gala".into());
        assert!(!alert.matches(&sample_job()));
    }

    #[test]
    fn test_skill_overlap() {
        let mut alert = JobAlert::new(Snowflake::new(9), Snowflake::new(8));
        alert.skills = vec!["Mixing".into(), "rigging".into()];
        assert!(alert.matches(&sample_job()));

        alert.skills = vec!["pyrotechnics".into()];
        assert!(!alert.matches(&sample_job()));
    }

    #[test]
    fn test_location_filter() {
        let mut alert = JobAlert::new(Snowflake::new(9), Snowflake::new(8));
        alert.locations = vec!["berlin".into()];
        assert!(alert.matches(&sample_job()));

        alert.locations = vec!["Hamburg".into()];
        assert!(!alert.matches(&sample_job()));

        // A location filter cannot match a job without a location
        let mut nowhere = sample_job();
        nowhere.location = None;
        nowhere.status = JobStatus::Open;
        assert!(!alert.matches(&nowhere));
    }

    #[test]
    fn test_date_range_filter() {
        let mut alert = JobAlert::new(Snowflake::new(9), Snowflake::new(8));
        alert.starts_after = Some(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        alert.starts_before = Some(NaiveDate::from_ymd_opt(2026, 8, 31).unwrap());

        // No start date on the job: a date filter cannot match
        assert!(!alert.matches(&sample_job()));

        let mut july = sample_job();
        july.start_date = Some(NaiveDate::from_ymd_opt(2026, 7, 15).unwrap());
        assert!(alert.matches(&july));

        let mut too_early = sample_job();
        too_early.start_date = Some(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
        assert!(!alert.matches(&too_early));

        let mut too_late = sample_job();
        too_late.start_date = Some(NaiveDate::from_ymd_opt(2026, 9, 10).unwrap());
        assert!(!alert.matches(&too_late));
    }

    #[test]
    fn test_all_filters_must_match() {
        let mut alert = JobAlert::new(Snowflake::new(9), Snowflake::new(8));
        alert.keywords = Some("festival".into());
        alert.skills = vec!["sound".into()];
        alert.locations = vec!["Berlin".into()];
        assert!(alert.matches(&sample_job()));

        alert.locations = vec!["Munich".into()];
        assert!(!alert.matches(&sample_job()));
    }
}

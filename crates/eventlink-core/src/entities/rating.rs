//! Rating entity - feedback between the two sides after a job

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Minimum and maximum rating score
pub const MIN_SCORE: i16 = 1;
pub const MAX_SCORE: i16 = 5;

/// Rating entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub id: Snowflake,
    pub job_id: Snowflake,
    pub rater_id: Snowflake,
    pub ratee_id: Snowflake,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    /// Create a new rating, validating the score range and parties
    pub fn new(
        id: Snowflake,
        job_id: Snowflake,
        rater_id: Snowflake,
        ratee_id: Snowflake,
        score: i16,
    ) -> Result<Self, DomainError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(DomainError::InvalidScore(score));
        }
        if rater_id == ratee_id {
            return Err(DomainError::CannotRateSelf);
        }
        Ok(Self {
            id,
            job_id,
            rater_id,
            ratee_id,
            score,
            comment: None,
            created_at: Utc::now(),
        })
    }

    /// Attach a comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_range_enforced() {
        let ok = Rating::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            Snowflake::new(4),
            5,
        );
        assert!(ok.is_ok());

        for bad in [0, 6, -1] {
            let result = Rating::new(
                Snowflake::new(1),
                Snowflake::new(2),
                Snowflake::new(3),
                Snowflake::new(4),
                bad,
            );
            assert!(matches!(result, Err(DomainError::InvalidScore(_))));
        }
    }

    #[test]
    fn test_cannot_rate_self() {
        let result = Rating::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            Snowflake::new(3),
            4,
        );
        assert!(matches!(result, Err(DomainError::CannotRateSelf)));
    }
}

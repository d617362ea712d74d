//! PostgreSQL implementation of RatingRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use eventlink_core::entities::Rating;
use eventlink_core::traits::{RatingRepository, RepoResult};
use eventlink_core::value_objects::Snowflake;
use eventlink_core::DomainError;

use crate::models::RatingModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of RatingRepository
#[derive(Clone)]
pub struct PgRatingRepository {
    pool: PgPool,
}

impl PgRatingRepository {
    /// Create a new PgRatingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PgRatingRepository {
    #[instrument(skip(self, rating))]
    async fn create(&self, rating: &Rating) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ratings (id, job_id, rater_id, ratee_id, score, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(rating.id.into_inner())
        .bind(rating.job_id.into_inner())
        .bind(rating.rater_id.into_inner())
        .bind(rating.ratee_id.into_inner())
        .bind(rating.score)
        .bind(&rating.comment)
        .bind(rating.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyRated))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_ratee(&self, ratee_id: Snowflake) -> RepoResult<Vec<Rating>> {
        let results = sqlx::query_as::<_, RatingModel>(
            r#"
            SELECT id, job_id, rater_id, ratee_id, score, comment, created_at
            FROM ratings
            WHERE ratee_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(ratee_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Rating::from).collect())
    }

    #[instrument(skip(self))]
    async fn exists(
        &self,
        job_id: Snowflake,
        rater_id: Snowflake,
        ratee_id: Snowflake,
    ) -> RepoResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM ratings WHERE job_id = $1 AND rater_id = $2 AND ratee_id = $3)",
        )
        .bind(job_id.into_inner())
        .bind(rater_id.into_inner())
        .bind(ratee_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn average_for(&self, ratee_id: Snowflake) -> RepoResult<Option<f64>> {
        let average: Option<f64> =
            sqlx::query_scalar("SELECT AVG(score)::FLOAT8 FROM ratings WHERE ratee_id = $1")
                .bind(ratee_id.into_inner())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgRatingRepository>();
    }
}

//! Pagination extractor
//!
//! Extracts cursor/offset pagination parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use eventlink_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

/// Default page size
const DEFAULT_LIMIT: i64 = 50;
/// Maximum page size
const MAX_LIMIT: i64 = 100;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// Get items before this ID (cursor paths)
    #[serde(default)]
    pub before: Option<String>,
    /// Offset into the result set (list paths)
    #[serde(default)]
    pub offset: Option<i64>,
    /// Maximum number of items to return
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Validated pagination parameters
#[derive(Debug, Clone)]
pub struct Pagination {
    pub before: Option<Snowflake>,
    pub offset: i64,
    /// Validated to 1-100
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            before: None,
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        let before = params
            .before
            .map(|s| {
                s.parse::<Snowflake>()
                    .map_err(|_| ApiError::invalid_query("Invalid 'before' cursor format"))
            })
            .transpose()?;

        let offset = params.offset.unwrap_or(0).max(0);
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        Ok(Pagination {
            before,
            offset,
            limit,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Pagination::try_from(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pagination() {
        let pagination = Pagination::default();
        assert_eq!(pagination.limit, DEFAULT_LIMIT);
        assert_eq!(pagination.offset, 0);
        assert!(pagination.before.is_none());
    }

    #[test]
    fn test_limit_clamping() {
        let pagination = Pagination::try_from(PaginationParams {
            before: None,
            offset: Some(-3),
            limit: Some(500),
        })
        .unwrap();
        assert_eq!(pagination.limit, MAX_LIMIT);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn test_bad_cursor_rejected() {
        let result = Pagination::try_from(PaginationParams {
            before: Some("not-a-snowflake".to_string()),
            offset: None,
            limit: None,
        });
        assert!(result.is_err());
    }
}

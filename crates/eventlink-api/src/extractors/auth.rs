//! Authentication extractor
//!
//! Extracts and validates JWT bearer tokens. Blacklisted (logged-out)
//! tokens are rejected with 401 even when their signature still
//! verifies.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use eventlink_common::AppError;
use eventlink_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the JWT token
    pub user_id: Snowflake,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = AuthToken::from_request_parts(parts, state).await?;
        Ok(AuthUser::new(token.user_id))
    }
}

/// Authenticated user plus the raw bearer token.
///
/// The logout handler needs the token itself to blacklist it.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub user_id: Snowflake,
    pub token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthToken
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::InvalidAuthFormat
            })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid user ID in token");
            ApiError::InvalidAuthFormat
        })?;

        // A logged-out token stays structurally valid until expiry;
        // the blacklist is what actually revokes it
        let revoked = app_state
            .service_context()
            .token_blacklist()
            .is_revoked(bearer.token())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Token blacklist check failed");
                ApiError::internal(anyhow::anyhow!(e.to_string()))
            })?;

        if revoked {
            return Err(ApiError::App(AppError::TokenRevoked));
        }

        Ok(AuthToken {
            user_id,
            token: bearer.token().to_string(),
        })
    }
}

//! Authentication handlers
//!
//! Endpoints for registration, login, token refresh, and logout.

use axum::{extract::State, Json};
use eventlink_service::{
    AuthResponse, AuthService, LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest,
};

use crate::extractors::{AuthToken, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new account
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Rotate tokens
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    Ok(Json(response))
}

/// Logout: revoke the refresh token and blacklist the access token
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthToken,
    request: Option<Json<LogoutRequest>>,
) -> ApiResult<NoContent> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let service = AuthService::new(state.service_context());
    service.logout(&auth.token, request).await?;
    Ok(NoContent)
}

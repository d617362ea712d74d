//! User/profile handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use eventlink_service::{CurrentUserResponse, UpdateProfileRequest, UserResponse, UserService};
use serde::Deserialize;

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, ApiError};
use crate::state::AppState;

/// Get own account
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.me(auth.user_id).await?;
    Ok(Json(response))
}

/// Update own profile
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_me(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Get a public profile
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = UserService::new(state.service_context());
    let response = service.get_public(auth.user_id, user_id).await?;
    Ok(Json(response))
}

/// Role filter for profile listing
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<String>,
}

/// List profiles
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListUsersQuery>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service
        .list(query.role.as_deref(), pagination.limit, pagination.offset)
        .await?;
    Ok(Json(response))
}

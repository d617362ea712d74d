//! Rating handlers

use axum::{
    extract::{Path, State},
    Json,
};
use eventlink_service::{
    CreateRatingRequest, RatingListResponse, RatingResponse, RatingService, RequestRatingRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Rate a counterpart for a job
///
/// POST /ratings
pub async fn create_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateRatingRequest>,
) -> ApiResult<Created<Json<RatingResponse>>> {
    let service = RatingService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Ratings received by a user
///
/// GET /users/{user_id}/ratings
pub async fn list_ratings(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<RatingListResponse>> {
    let user_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = RatingService::new(state.service_context());
    let response = service.list_for(user_id).await?;
    Ok(Json(response))
}

/// Ask a freelancer for a rating
///
/// POST /ratings/requests
pub async fn request_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<RequestRatingRequest>,
) -> ApiResult<NoContent> {
    let service = RatingService::new(state.service_context());
    service.request_rating(auth.user_id, request).await?;
    Ok(NoContent)
}

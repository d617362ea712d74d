//! Application handlers

use axum::{
    extract::{Path, State},
    Json,
};
use eventlink_service::{
    ApplicationResponse, ApplicationService, ApplyRequest, UpdateApplicationRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Apply to a job
///
/// POST /jobs/{job_id}/applications
pub async fn apply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<String>,
    ValidatedJson(request): ValidatedJson<ApplyRequest>,
) -> ApiResult<Created<Json<ApplicationResponse>>> {
    let job_id = job_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid job_id format"))?;

    let service = ApplicationService::new(state.service_context());
    let response = service.apply(auth.user_id, job_id, request).await?;
    Ok(Created(Json(response)))
}

/// List applications for a job (job owner)
///
/// GET /jobs/{job_id}/applications
pub async fn list_for_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<String>,
) -> ApiResult<Json<Vec<ApplicationResponse>>> {
    let job_id = job_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid job_id format"))?;

    let service = ApplicationService::new(state.service_context());
    let response = service.list_for_job(auth.user_id, job_id).await?;
    Ok(Json(response))
}

/// List own applications
///
/// GET /applications
pub async fn list_own(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ApplicationResponse>>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.list_own(auth.user_id).await?;
    Ok(Json(response))
}

/// Change an application's status
///
/// PATCH /applications/{application_id}
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(application_id): Path<String>,
    Json(request): Json<UpdateApplicationRequest>,
) -> ApiResult<Json<ApplicationResponse>> {
    let application_id = application_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid application_id format"))?;

    let service = ApplicationService::new(state.service_context());
    let response = service
        .update_status(auth.user_id, application_id, request)
        .await?;
    Ok(Json(response))
}

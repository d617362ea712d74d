//! Job handlers

use axum::{
    extract::{Path, State},
    Json,
};
use eventlink_service::{CreateJobRequest, JobResponse, JobService, UpdateJobRequest};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Post a job
///
/// POST /jobs
pub async fn create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateJobRequest>,
) -> ApiResult<Created<Json<JobResponse>>> {
    let service = JobService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List open jobs
///
/// GET /jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    _auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<JobResponse>>> {
    let service = JobService::new(state.service_context());
    let response = service
        .list_open(pagination.limit, pagination.offset)
        .await?;
    Ok(Json(response))
}

/// Get one job
///
/// GET /jobs/{job_id}
pub async fn get_job(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(job_id): Path<String>,
) -> ApiResult<Json<JobResponse>> {
    let job_id = job_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid job_id format"))?;

    let service = JobService::new(state.service_context());
    let response = service.get(job_id).await?;
    Ok(Json(response))
}

/// Update a job
///
/// PATCH /jobs/{job_id}
pub async fn update_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateJobRequest>,
) -> ApiResult<Json<JobResponse>> {
    let job_id = job_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid job_id format"))?;

    let service = JobService::new(state.service_context());
    let response = service.update(auth.user_id, job_id, request).await?;
    Ok(Json(response))
}

/// Remove a job
///
/// DELETE /jobs/{job_id}
pub async fn delete_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<String>,
) -> ApiResult<NoContent> {
    let job_id = job_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid job_id format"))?;

    let service = JobService::new(state.service_context());
    service.delete(auth.user_id, job_id).await?;
    Ok(NoContent)
}

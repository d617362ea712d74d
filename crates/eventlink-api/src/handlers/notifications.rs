//! Notification handlers
//!
//! The count endpoints return no-cache headers; badge counts are
//! always recomputed server-side and must never be cached.

use axum::{
    extract::{Path, State},
    Json,
};
use eventlink_service::{
    CategoryCountsResponse, CreateJobAlertRequest, CreateNotificationRequest, JobAlertResponse,
    JobAlertService, NotificationResponse, NotificationService, NotificationSettingsResponse,
    UnreadCountResponse, UpdateJobAlertRequest, UpdateSettingsRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoCacheJson, NoContent};
use crate::state::AppState;

/// List the caller's notifications
///
/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let response = service.list(auth.user_id).await?;
    Ok(Json(response))
}

/// Unread total
///
/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoCacheJson<UnreadCountResponse>> {
    let service = NotificationService::new(state.service_context());
    let count = service.unread_count(auth.user_id).await?;
    Ok(NoCacheJson(UnreadCountResponse { count }))
}

/// Per-category unread counts
///
/// GET /notifications/category-counts
pub async fn category_counts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoCacheJson<CategoryCountsResponse>> {
    let service = NotificationService::new(state.service_context());
    let counts = service.category_counts(auth.user_id).await?;
    Ok(NoCacheJson(counts))
}

/// Admin-only direct creation
///
/// POST /notifications
pub async fn create_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateNotificationRequest>,
) -> ApiResult<Created<Json<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let response = service.create_direct(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Mark one notification read
///
/// PATCH /notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<String>,
) -> ApiResult<Json<NotificationResponse>> {
    let notification_id = notification_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid notification_id format"))?;

    let service = NotificationService::new(state.service_context());
    let response = service.mark_read(auth.user_id, notification_id).await?;
    Ok(Json(response))
}

/// Mark everything read
///
/// PATCH /notifications/mark-all-read
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let response = service.mark_all_read(auth.user_id).await?;
    Ok(Json(response))
}

/// Mark one category read
///
/// PATCH /notifications/mark-category-read/{category}
pub async fn mark_category_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category): Path<String>,
) -> ApiResult<NoCacheJson<CategoryCountsResponse>> {
    let service = NotificationService::new(state.service_context());
    let counts = service.mark_category_read(auth.user_id, &category).await?;
    Ok(NoCacheJson(counts))
}

/// Delete one notification
///
/// DELETE /notifications/{notification_id}
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<String>,
) -> ApiResult<NoContent> {
    let notification_id = notification_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid notification_id format"))?;

    let service = NotificationService::new(state.service_context());
    service.delete(auth.user_id, notification_id).await?;
    Ok(NoContent)
}

// ============================================================================
// Settings
// ============================================================================

/// Get notification settings
///
/// GET /notifications/settings
pub async fn get_settings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<NotificationSettingsResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.settings(auth.user_id).await?;
    Ok(Json(response))
}

/// Update notification settings
///
/// POST /notifications/settings
pub async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<UpdateSettingsRequest>,
) -> ApiResult<Json<NotificationSettingsResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.update_settings(auth.user_id, request).await?;
    Ok(Json(response))
}

// ============================================================================
// Job alerts
// ============================================================================

/// List the caller's job alerts
///
/// GET /notifications/job-alerts
pub async fn list_job_alerts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<JobAlertResponse>>> {
    let service = JobAlertService::new(state.service_context());
    let response = service.list(auth.user_id).await?;
    Ok(Json(response))
}

/// Create a job alert
///
/// POST /notifications/job-alerts
pub async fn create_job_alert(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateJobAlertRequest>,
) -> ApiResult<Created<Json<JobAlertResponse>>> {
    let service = JobAlertService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Update a job alert
///
/// PATCH /notifications/job-alerts/{alert_id}
pub async fn update_job_alert(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(alert_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateJobAlertRequest>,
) -> ApiResult<Json<JobAlertResponse>> {
    let alert_id = alert_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid alert_id format"))?;

    let service = JobAlertService::new(state.service_context());
    let response = service.update(auth.user_id, alert_id, request).await?;
    Ok(Json(response))
}

/// Delete a job alert
///
/// DELETE /notifications/job-alerts/{alert_id}
pub async fn delete_job_alert(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(alert_id): Path<String>,
) -> ApiResult<NoContent> {
    let alert_id = alert_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid alert_id format"))?;

    let service = JobAlertService::new(state.service_context());
    service.delete(auth.user_id, alert_id).await?;
    Ok(NoContent)
}

//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{
    applications, auth, conversations, health, jobs, notifications, ratings, users,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health, which
/// bypasses rate limiting, and /ws, which is mounted by the server)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(job_routes())
        .merge(application_routes())
        .merge(conversation_routes())
        .merge(notification_routes())
        .merge(rating_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
}

/// User/profile routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me", patch(users::update_current_user))
        .route("/users", get(users::list_users))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/ratings", get(ratings::list_ratings))
}

/// Job routes
fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", post(jobs::create_job))
        .route("/jobs", get(jobs::list_jobs))
        .route("/jobs/:job_id", get(jobs::get_job))
        .route("/jobs/:job_id", patch(jobs::update_job))
        .route("/jobs/:job_id", delete(jobs::delete_job))
        .route("/jobs/:job_id/applications", post(applications::apply))
        .route("/jobs/:job_id/applications", get(applications::list_for_job))
}

/// Application routes
fn application_routes() -> Router<AppState> {
    Router::new()
        .route("/applications", get(applications::list_own))
        .route("/applications/:application_id", patch(applications::update_status))
}

/// Messaging routes
fn conversation_routes() -> Router<AppState> {
    Router::new()
        .route("/conversations", get(conversations::list_conversations))
        .route("/conversations/:user_id/messages", post(conversations::send_message))
        .route(
            "/conversations/:conversation_id/messages",
            get(conversations::list_messages),
        )
        .route(
            "/conversations/:conversation_id",
            delete(conversations::delete_conversation),
        )
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications", post(notifications::create_notification))
        .route("/notifications/unread-count", get(notifications::unread_count))
        .route(
            "/notifications/category-counts",
            get(notifications::category_counts),
        )
        .route(
            "/notifications/mark-all-read",
            patch(notifications::mark_all_read),
        )
        .route(
            "/notifications/mark-category-read/:category",
            patch(notifications::mark_category_read),
        )
        .route(
            "/notifications/:notification_id/read",
            patch(notifications::mark_read),
        )
        .route(
            "/notifications/:notification_id",
            delete(notifications::delete_notification),
        )
        .route("/notifications/settings", get(notifications::get_settings))
        .route("/notifications/settings", post(notifications::update_settings))
        .route("/notifications/job-alerts", get(notifications::list_job_alerts))
        .route("/notifications/job-alerts", post(notifications::create_job_alert))
        .route(
            "/notifications/job-alerts/:alert_id",
            patch(notifications::update_job_alert),
        )
        .route(
            "/notifications/job-alerts/:alert_id",
            delete(notifications::delete_job_alert),
        )
}

/// Rating routes
fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/ratings", post(ratings::create_rating))
        .route("/ratings/requests", post(ratings::request_rating))
}

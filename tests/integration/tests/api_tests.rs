//! API integration tests
//!
//! These tests require:
//! - Running PostgreSQL instance (migrated)
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::freelancer();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(auth.user.role, "freelancer");
    assert!(!auth.access_token.is_empty());

    let response = server
        .post(
            "/api/v1/auth/login",
            &json!({"email": request.email, "password": request.password}),
        )
        .await
        .unwrap();
    let login: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.user.id, auth.user.id);
}

#[tokio::test]
async fn test_admin_role_is_not_self_service() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::freelancer();
    request.role = "admin".to_string();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_logout_blacklists_access_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server, RegisterRequest::freelancer()).await;

    let response = server
        .post_auth(
            "/api/v1/auth/logout",
            &auth.access_token,
            &json!({"refresh_token": auth.refresh_token}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // The same token is rejected afterwards
    let response = server
        .get_auth("/api/v1/users/@me", &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Application flow: recruiter posts, freelancer applies, status change
// ============================================================================

#[tokio::test]
async fn test_application_update_notification_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let recruiter = register(&server, RegisterRequest::recruiter()).await;
    let freelancer = register(&server, RegisterRequest::freelancer()).await;

    // Recruiter posts a job
    let response = server
        .post_auth("/api/v1/jobs", &recruiter.access_token, &CreateJobRequest::unique())
        .await
        .unwrap();
    let job: JobResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(job.status, "open");

    // Freelancer applies
    let response = server
        .post_auth(
            &format!("/api/v1/jobs/{}/applications", job.id),
            &freelancer.access_token,
            &json!({"cover_note": "I have done this before"}),
        )
        .await
        .unwrap();
    let application: ApplicationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(application.status, "submitted");

    // Recruiter marks the application reviewed
    let response = server
        .patch_auth(
            &format!("/api/v1/applications/{}", application.id),
            &recruiter.access_token,
            &json!({"status": "reviewed"}),
        )
        .await
        .unwrap();
    let updated: ApplicationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.status, "reviewed");

    // Exactly one application_update notification for the freelancer
    let response = server
        .get_auth("/api/v1/notifications", &freelancer.access_token)
        .await
        .unwrap();
    let notifications: Vec<NotificationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let updates: Vec<_> = notifications
        .iter()
        .filter(|n| n.kind == "application_update" && !n.is_read)
        .collect();
    assert_eq!(updates.len(), 1);

    // category-counts.applications == 1
    let counts = category_counts(&server, &freelancer.access_token).await;
    assert_eq!(counts.applications, 1);
    assert_eq!(counts.total, counts.messages + counts.applications + counts.jobs
        + counts.ratings + counts.feedback + counts.contact_messages);
}

#[tokio::test]
async fn test_duplicate_application_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let recruiter = register(&server, RegisterRequest::recruiter()).await;
    let freelancer = register(&server, RegisterRequest::freelancer()).await;

    let job = post_job(&server, &recruiter.access_token).await;

    let path = format!("/api/v1/jobs/{}/applications", job.id);
    let response = server
        .post_auth(&path, &freelancer.access_token, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(&path, &freelancer.access_token, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

// ============================================================================
// Messaging: unread counts are scoped per participant
// ============================================================================

#[tokio::test]
async fn test_message_flow_increments_and_clears_counts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let sender = register(&server, RegisterRequest::recruiter()).await;
    let recipient = register(&server, RegisterRequest::freelancer()).await;

    // Sender opens the conversation with a first message
    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{}/messages", recipient.user.id),
            &sender.access_token,
            &json!({"body": "Are you free next weekend?"}),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Recipient's messages category increments by exactly 1
    let counts = category_counts(&server, &recipient.access_token).await;
    assert_eq!(counts.messages, 1);

    // Sender's counts are untouched
    let sender_counts = category_counts(&server, &sender.access_token).await;
    assert_eq!(sender_counts.messages, 0);

    // Opening the conversation marks it read; the count returns to 0
    let response = server
        .get_auth(
            &format!("/api/v1/conversations/{}/messages", message.conversation_id),
            &recipient.access_token,
        )
        .await
        .unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(messages.len(), 1);

    let counts = category_counts(&server, &recipient.access_token).await;
    assert_eq!(counts.messages, 0);
}

#[tokio::test]
async fn test_conversation_delete_is_per_participant() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let a = register(&server, RegisterRequest::recruiter()).await;
    let b = register(&server, RegisterRequest::freelancer()).await;

    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{}/messages", b.user.id),
            &a.access_token,
            &json!({"body": "hello"}),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // A deletes the conversation from their own view
    let response = server
        .delete_auth(
            &format!("/api/v1/conversations/{}", message.conversation_id),
            &a.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // A no longer sees it
    let response = server
        .get_auth("/api/v1/conversations", &a.access_token)
        .await
        .unwrap();
    let a_list: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(a_list
        .iter()
        .all(|c| c["id"] != message.conversation_id.as_str()));

    // B's view and unread count are untouched
    let response = server
        .get_auth("/api/v1/conversations", &b.access_token)
        .await
        .unwrap();
    let b_list: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    let entry = b_list
        .iter()
        .find(|c| c["id"] == message.conversation_id.as_str())
        .expect("B should still see the conversation");
    assert_eq!(entry["unread_count"], 1);

    let counts = category_counts(&server, &b.access_token).await;
    assert_eq!(counts.messages, 1);
}

// ============================================================================
// Reconciler
// ============================================================================

#[tokio::test]
async fn test_mark_read_is_owner_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let sender = register(&server, RegisterRequest::recruiter()).await;
    let owner = register(&server, RegisterRequest::freelancer()).await;
    let outsider = register(&server, RegisterRequest::freelancer()).await;

    send_message(&server, &sender.access_token, &owner.user.id, "ping").await;
    let notification = first_notification(&server, &owner.access_token).await;

    // A different non-admin user gets 403 and nothing changes
    let response = server
        .patch_auth_empty(
            &format!("/api/v1/notifications/{}/read", notification.id),
            &outsider.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let unchanged = first_notification(&server, &owner.access_token).await;
    assert!(!unchanged.is_read);
}

#[tokio::test]
async fn test_mark_read_is_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let sender = register(&server, RegisterRequest::recruiter()).await;
    let owner = register(&server, RegisterRequest::freelancer()).await;

    send_message(&server, &sender.access_token, &owner.user.id, "ping").await;
    let notification = first_notification(&server, &owner.access_token).await;

    let path = format!("/api/v1/notifications/{}/read", notification.id);
    let response = server.patch_auth_empty(&path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let counts_after_first = category_counts(&server, &owner.access_token).await;

    // Second call succeeds and changes nothing further
    let response = server.patch_auth_empty(&path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let counts_after_second = category_counts(&server, &owner.access_token).await;
    assert_eq!(counts_after_first.total, counts_after_second.total);
    assert!(counts_after_second.total >= 0);
}

#[tokio::test]
async fn test_mark_all_read_zeroes_counts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let sender = register(&server, RegisterRequest::recruiter()).await;
    let owner = register(&server, RegisterRequest::freelancer()).await;

    send_message(&server, &sender.access_token, &owner.user.id, "one").await;
    send_message(&server, &sender.access_token, &owner.user.id, "two").await;

    let counts = category_counts(&server, &owner.access_token).await;
    assert!(counts.total > 0);

    let response = server
        .patch_auth_empty("/api/v1/notifications/mark-all-read", &owner.access_token)
        .await
        .unwrap();
    let refreshed: Vec<NotificationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(refreshed.iter().all(|n| n.is_read));

    let counts = category_counts(&server, &owner.access_token).await;
    assert_eq!(counts.total, 0);
    assert_eq!(counts.messages, 0);
    assert_eq!(counts.applications, 0);
    assert_eq!(counts.jobs, 0);
    assert_eq!(counts.ratings, 0);
    assert_eq!(counts.feedback, 0);
    assert_eq!(counts.contact_messages, 0);
}

#[tokio::test]
async fn test_bogus_category_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let sender = register(&server, RegisterRequest::recruiter()).await;
    let owner = register(&server, RegisterRequest::freelancer()).await;

    send_message(&server, &sender.access_token, &owner.user.id, "ping").await;

    let response = server
        .patch_auth_empty(
            "/api/v1/notifications/mark-category-read/bogus-category",
            &owner.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Nothing was mutated
    let counts = category_counts(&server, &owner.access_token).await;
    assert_eq!(counts.messages, 1);
}

#[tokio::test]
async fn test_mark_category_read() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let sender = register(&server, RegisterRequest::recruiter()).await;
    let owner = register(&server, RegisterRequest::freelancer()).await;

    send_message(&server, &sender.access_token, &owner.user.id, "ping").await;

    let response = server
        .patch_auth_empty(
            "/api/v1/notifications/mark-category-read/messages",
            &owner.access_token,
        )
        .await
        .unwrap();
    let counts: BadgeCounts = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(counts.messages, 0);
}

// ============================================================================
// Count endpoints
// ============================================================================

#[tokio::test]
async fn test_count_endpoints_send_no_cache_headers() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server, RegisterRequest::freelancer()).await;

    for path in [
        "/api/v1/notifications/unread-count",
        "/api/v1/notifications/category-counts",
    ] {
        let response = server.get_auth(path, &user.access_token).await.unwrap();
        let cache_control = response
            .headers()
            .get("cache-control")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(cache_control.contains("no-store"), "{path} must be uncacheable");
        assert_status(response, StatusCode::OK).await.unwrap();
    }
}

// ============================================================================
// Notification settings & job alerts
// ============================================================================

#[tokio::test]
async fn test_settings_default_and_upsert() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server, RegisterRequest::freelancer()).await;

    let response = server
        .get_auth("/api/v1/notifications/settings", &user.access_token)
        .await
        .unwrap();
    let defaults: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(defaults["email_messages"], true);
    assert_eq!(defaults["digest"], "instant");

    let response = server
        .post_auth(
            "/api/v1/notifications/settings",
            &user.access_token,
            &json!({"email_messages": false, "digest": "weekly"}),
        )
        .await
        .unwrap();
    let updated: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated["email_messages"], false);
    assert_eq!(updated["digest"], "weekly");
}

#[tokio::test]
async fn test_job_alerts_are_freelancer_only_and_owned() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let freelancer = register(&server, RegisterRequest::freelancer()).await;
    let recruiter = register(&server, RegisterRequest::recruiter()).await;

    // Recruiters cannot save searches
    let response = server
        .post_auth(
            "/api/v1/notifications/job-alerts",
            &recruiter.access_token,
            &json!({"keywords": "festival"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Freelancer creates one
    let response = server
        .post_auth(
            "/api/v1/notifications/job-alerts",
            &freelancer.access_token,
            &json!({"keywords": "festival", "skills": ["sound"]}),
        )
        .await
        .unwrap();
    let alert: serde_json::Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let alert_id = alert["id"].as_str().unwrap().to_string();

    // Another user's alert is indistinguishable from a missing one
    let other = register(&server, RegisterRequest::freelancer()).await;
    let response = server
        .delete_auth(
            &format!("/api/v1/notifications/job-alerts/{alert_id}"),
            &other.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_matching_job_alert_fires_notification() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let freelancer = register(&server, RegisterRequest::freelancer()).await;
    let recruiter = register(&server, RegisterRequest::recruiter()).await;

    // A skill no other test's job posting carries, so concurrent tests
    // cannot trip this alert
    let skill = format!("laser-ops-{}", unique_suffix());

    let response = server
        .post_auth(
            "/api/v1/notifications/job-alerts",
            &freelancer.access_token,
            &json!({"skills": [skill]}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/jobs",
            &recruiter.access_token,
            &json!({
                "title": "Laser operator",
                "description": "Operate the laser rig for an arena show",
                "skills": [skill],
            }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let counts = category_counts(&server, &freelancer.access_token).await;
    assert_eq!(counts.jobs, 1);
}

// ============================================================================
// Helpers
// ============================================================================

async fn register(server: &TestServer, request: RegisterRequest) -> AuthResponse {
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn post_job(server: &TestServer, token: &str) -> JobResponse {
    let response = server
        .post_auth("/api/v1/jobs", token, &CreateJobRequest::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn send_message(server: &TestServer, token: &str, recipient_id: &str, body: &str) {
    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{recipient_id}/messages"),
            token,
            &json!({"body": body}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

async fn first_notification(server: &TestServer, token: &str) -> NotificationResponse {
    let response = server.get_auth("/api/v1/notifications", token).await.unwrap();
    let mut notifications: Vec<NotificationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!notifications.is_empty(), "expected at least one notification");
    notifications.remove(0)
}

async fn category_counts(server: &TestServer, token: &str) -> BadgeCounts {
    let response = server
        .get_auth("/api/v1/notifications/category-counts", token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

//! Test fixtures and data generators
//!
//! Reusable request/response shapes for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: String,
}

impl RegisterRequest {
    pub fn freelancer() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("crew{suffix}@example.com"),
            password: "TestPass123".to_string(),
            display_name: format!("Crew {suffix}"),
            role: "freelancer".to_string(),
        }
    }

    pub fn recruiter() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("recruiter{suffix}@example.com"),
            password: "TestPass123".to_string(),
            display_name: format!("Recruiter {suffix}"),
            role: "recruiter".to_string(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub display_name: String,
    pub role: String,
}

/// Create job request
#[derive(Debug, Serialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub skills: Vec<String>,
}

impl CreateJobRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Stage tech needed {suffix}"),
            description: "Set up and operate stage equipment for a weekend festival".to_string(),
            location: Some("Berlin".to_string()),
            skills: vec!["rigging".to_string(), "sound".to_string()],
        }
    }
}

/// Job response
#[derive(Debug, Deserialize)]
pub struct JobResponse {
    pub id: String,
    pub recruiter_id: String,
    pub title: String,
    pub status: String,
}

/// Application response
#[derive(Debug, Deserialize)]
pub struct ApplicationResponse {
    pub id: String,
    pub job_id: String,
    pub freelancer_id: String,
    pub status: String,
}

/// Message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub body: String,
    pub is_read: bool,
}

/// Notification response
#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub title: String,
    pub is_read: bool,
}

/// Badge counts
#[derive(Debug, Deserialize)]
pub struct BadgeCounts {
    pub messages: i64,
    pub applications: i64,
    pub jobs: i64,
    pub ratings: i64,
    pub feedback: i64,
    pub contact_messages: i64,
    pub total: i64,
}

/// Unread count response
#[derive(Debug, Deserialize)]
pub struct UnreadCount {
    pub count: i64,
}

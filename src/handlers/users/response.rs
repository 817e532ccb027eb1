//! User response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{handlers::submissions::response::SubmissionResponse, models::UnifiedEnrollment};

/// Public view of a user
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// User list response
#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub users: Vec<UserResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// A user's submissions
#[derive(Debug, Serialize)]
pub struct UserSubmissionsResponse {
    pub submissions: Vec<SubmissionResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Unified enrollment view across both tracking mechanisms
#[derive(Debug, Serialize)]
pub struct UnifiedEnrollmentsResponse {
    pub user_id: Uuid,
    pub enrollments: Vec<UnifiedEnrollment>,
    pub total: i64,
}

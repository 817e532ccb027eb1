//! Admin response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Entity counts across the platform
#[derive(Debug, Serialize)]
pub struct PlatformStatsResponse {
    pub users: i64,
    pub courses: i64,
    pub problem_sets: i64,
    pub enrollments: i64,
    pub submissions: i64,
    pub contests: i64,
}

/// Admin view of a user
#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub ban_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Maintenance mode status
#[derive(Debug, Serialize)]
pub struct MaintenanceResponse {
    pub enabled: bool,
    pub message: Option<String>,
}

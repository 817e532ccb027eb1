//! Enrollment response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Enrollment;

/// Enrollment response
#[derive(Debug, Serialize)]
pub struct EnrollmentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_id: Uuid,
    pub target_kind: String,
    pub status: String,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(e: Enrollment) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            target_id: e.target_id,
            target_kind: e.target_kind,
            status: e.status,
            enrolled_at: e.enrolled_at,
            completed_at: e.completed_at,
        }
    }
}

/// Enrollment list response
#[derive(Debug, Serialize)]
pub struct EnrollmentsListResponse {
    pub enrollments: Vec<EnrollmentResponse>,
    pub total: i64,
}

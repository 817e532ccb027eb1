//! Enrollment request DTOs

use serde::Deserialize;
use uuid::Uuid;

use crate::models::EnrollmentTarget;

/// Enroll request
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    /// Course or problem set to enroll in
    pub target_id: Uuid,

    pub target_kind: EnrollmentTarget,

    /// Required for invite-only courses
    pub invite_code: Option<String>,
}

/// Update enrollment request
#[derive(Debug, Deserialize)]
pub struct UpdateEnrollmentRequest {
    /// New status (active, completed, dropped)
    pub status: String,
}

/// List enrollments query parameters
#[derive(Debug, Deserialize)]
pub struct ListEnrollmentsQuery {
    /// Admins may inspect another user's enrollments
    pub user_id: Option<Uuid>,
}

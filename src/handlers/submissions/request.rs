//! Submission request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create submission request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubmissionRequest {
    /// Problem instance being solved
    pub problem_instance_id: Uuid,

    /// Submission language (defaults to python)
    pub language: Option<String>,

    #[validate(length(min = 1))]
    pub source_code: String,
}

/// List submissions query parameters
#[derive(Debug, Deserialize)]
pub struct ListSubmissionsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Admins may filter by user
    pub user_id: Option<Uuid>,
    pub problem_instance_id: Option<Uuid>,
}

//! Problem set response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Problem set response with ordered instances
#[derive(Debug, Serialize)]
pub struct ProblemSetResponse {
    pub id: Uuid,
    pub course_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub author_id: Uuid,
    pub problems: Vec<ProblemInstanceResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Problem set list response
#[derive(Debug, Serialize)]
pub struct ProblemSetsListResponse {
    pub problem_sets: Vec<ProblemSetSummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Problem set summary for list views
#[derive(Debug, Serialize)]
pub struct ProblemSetSummary {
    pub id: Uuid,
    pub course_id: Option<Uuid>,
    pub title: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub problem_count: i64,
}

/// Problem instance response
#[derive(Debug, Serialize)]
pub struct ProblemInstanceResponse {
    pub id: Uuid,
    pub problem_set_id: Uuid,
    pub source_problem_id: Option<Uuid>,
    pub title: String,
    pub statement: String,
    pub points: i32,
    pub position: i32,
    pub sample_input: Option<String>,
    /// Only present for the set author and staff
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    pub time_limit_ms: i32,
    pub memory_limit_kb: i32,
    pub created_at: DateTime<Utc>,
}

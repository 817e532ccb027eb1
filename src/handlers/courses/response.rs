//! Course response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Course response
#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub rating: f64,
    pub rating_count: i64,
    pub completion_rate: f64,
    pub is_published: bool,
    pub requires_invite: bool,
    pub author_id: Uuid,
    pub author_name: String,
    pub problem_set_ids: Vec<Uuid>,
    pub enrollment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course list response
#[derive(Debug, Serialize)]
pub struct CoursesListResponse {
    pub courses: Vec<CourseSummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Course summary for list views
#[derive(Debug, Serialize)]
pub struct CourseSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub rating: f64,
    pub completion_rate: f64,
    pub is_published: bool,
}

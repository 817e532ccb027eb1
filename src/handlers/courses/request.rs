//! Course request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_COURSE_DESCRIPTION_LENGTH, MAX_COURSE_TITLE_LENGTH, MAX_SLUG_LENGTH};

/// Create course request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = MAX_COURSE_TITLE_LENGTH))]
    pub title: String,

    /// URL-safe unique identifier
    #[validate(length(min = 1, max = MAX_SLUG_LENGTH))]
    pub slug: String,

    #[validate(length(max = MAX_COURSE_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    /// Difficulty level (beginner, intermediate, advanced, expert)
    pub difficulty: Option<String>,

    /// Tags for categorization
    pub tags: Option<Vec<String>>,

    /// Is this course visible to students?
    pub is_published: Option<bool>,

    /// Require an invite code to enroll?
    pub requires_invite: Option<bool>,
}

/// Update course request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = MAX_COURSE_TITLE_LENGTH))]
    pub title: Option<String>,

    #[validate(length(max = MAX_COURSE_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    pub difficulty: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
    pub requires_invite: Option<bool>,
}

/// List courses query parameters
#[derive(Debug, Deserialize)]
pub struct ListCoursesQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub difficulty: Option<String>,
    pub tag: Option<String>,
}

/// Rate course request
#[derive(Debug, Deserialize)]
pub struct RateCourseRequest {
    /// Rating from 1 to 5
    pub rating: u8,
}

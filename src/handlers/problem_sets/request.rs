//! Problem set request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::{MAX_PROBLEM_SET_TITLE_LENGTH, MAX_PROBLEM_STATEMENT_LENGTH};

/// Create problem set request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProblemSetRequest {
    /// Owning course, if any
    pub course_id: Option<Uuid>,

    #[validate(length(min = 1, max = MAX_PROBLEM_SET_TITLE_LENGTH))]
    pub title: String,

    pub description: Option<String>,

    pub difficulty: Option<String>,

    pub tags: Option<Vec<String>>,

    pub is_published: Option<bool>,
}

/// Update problem set request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProblemSetRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_SET_TITLE_LENGTH))]
    pub title: Option<String>,

    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
    pub course_id: Option<Uuid>,
}

/// List problem sets query parameters
#[derive(Debug, Deserialize)]
pub struct ListProblemSetsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub course_id: Option<Uuid>,
    pub search: Option<String>,
    pub difficulty: Option<String>,
}

/// Add a problem instance to a set
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProblemInstanceRequest {
    /// Problem this instance was copied from, if any
    pub source_problem_id: Option<Uuid>,

    #[validate(length(min = 1, max = MAX_PROBLEM_SET_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(max = MAX_PROBLEM_STATEMENT_LENGTH))]
    pub statement: Option<String>,

    /// Points awarded for passing
    pub points: Option<i32>,

    /// Stdin fed to the submission
    pub sample_input: Option<String>,

    /// Expected stdout for grading
    pub expected_output: Option<String>,

    /// Time limit in milliseconds
    pub time_limit_ms: Option<i32>,

    /// Memory limit in kilobytes
    pub memory_limit_kb: Option<i32>,
}

/// Update a problem instance
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProblemInstanceRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_SET_TITLE_LENGTH))]
    pub title: Option<String>,

    #[validate(length(max = MAX_PROBLEM_STATEMENT_LENGTH))]
    pub statement: Option<String>,

    pub points: Option<i32>,
    pub sample_input: Option<String>,
    pub expected_output: Option<String>,
    pub time_limit_ms: Option<i32>,
    pub memory_limit_kb: Option<i32>,
}

/// Reorder the problems of a set
///
/// Must list every problem instance id of the set exactly once, in the
/// desired order.
#[derive(Debug, Deserialize)]
pub struct ReorderProblemsRequest {
    pub problem_ids: Vec<Uuid>,
}

//! Contest request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_CONTEST_TITLE_LENGTH;

/// Create contest request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContestRequest {
    #[validate(length(min = 1, max = MAX_CONTEST_TITLE_LENGTH))]
    pub title: String,

    pub description: Option<String>,

    /// public or private
    pub visibility: Option<String>,

    /// open, closed, or invite_only
    pub registration_mode: Option<String>,

    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub registration_start: Option<DateTime<Utc>>,
    pub registration_end: Option<DateTime<Utc>>,
}

/// Update contest request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContestRequest {
    #[validate(length(min = 1, max = MAX_CONTEST_TITLE_LENGTH))]
    pub title: Option<String>,

    pub description: Option<String>,
    pub visibility: Option<String>,
    pub registration_mode: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub registration_start: Option<DateTime<Utc>>,
    pub registration_end: Option<DateTime<Utc>>,
}

/// List contests query parameters
#[derive(Debug, Deserialize)]
pub struct ListContestsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub visibility: Option<String>,
    pub search: Option<String>,
}

/// List participants query parameters
#[derive(Debug, Deserialize)]
pub struct ListParticipantsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

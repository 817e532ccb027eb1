//! Contest response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::ContestStatus;

/// Contest response
#[derive(Debug, Serialize)]
pub struct ContestResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub organizer_id: Uuid,
    pub organizer_name: String,
    pub visibility: String,
    pub registration_mode: String,
    pub status: ContestStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub registration_start: Option<DateTime<Utc>>,
    pub registration_end: Option<DateTime<Utc>>,
    pub problem_set_ids: Vec<Uuid>,
    pub participant_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contest list response
#[derive(Debug, Serialize)]
pub struct ContestsListResponse {
    pub contests: Vec<ContestSummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Contest summary for list views
#[derive(Debug, Serialize)]
pub struct ContestSummary {
    pub id: Uuid,
    pub title: String,
    pub visibility: String,
    pub status: ContestStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Registration confirmation
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub message: String,
    pub contest_id: Uuid,
    pub registered_at: DateTime<Utc>,
}

/// Contest participant
#[derive(Debug, Serialize)]
pub struct ParticipantResponse {
    pub user_id: Uuid,
    pub username: String,
    pub registered_at: DateTime<Utc>,
}

/// Participant list response
#[derive(Debug, Serialize)]
pub struct ParticipantsListResponse {
    pub participants: Vec<ParticipantResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

//! Submission handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::{ExecutionService, SubmissionService},
    state::AppState,
};

use super::{
    request::{CreateSubmissionRequest, ListSubmissionsQuery},
    response::{SubmissionResponse, SubmissionSourceResponse, SubmissionsListResponse},
};

/// Create a submission and kick off sandbox execution
pub async fn create_submission(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateSubmissionRequest>,
) -> AppResult<(StatusCode, Json<SubmissionResponse>)> {
    payload.validate()?;

    let submission = SubmissionService::create_submission(
        state.db(),
        &auth_user.id,
        &auth_user.role,
        payload,
    )
    .await?;

    // Judge in the background; the client polls the submission status
    let submission_id = submission.id;
    tokio::spawn(ExecutionService::execute_submission(state.clone(), submission_id));

    let response = SubmissionResponse {
        id: submission.id,
        user_id: submission.user_id,
        problem_instance_id: submission.problem_instance_id,
        language: submission.language,
        status: submission.status,
        runtime_ms: submission.runtime_ms,
        memory_kb: submission.memory_kb,
        output: submission.output,
        error_message: submission.error_message,
        submitted_at: submission.submitted_at,
        judged_at: submission.judged_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// List submissions (own, or all for admins)
pub async fn list_submissions(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<Json<SubmissionsListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    let (submissions, total) = SubmissionService::list_submissions(
        state.db(),
        &auth_user.id,
        &auth_user.role,
        &query,
        page,
        per_page,
    )
    .await?;

    Ok(Json(SubmissionsListResponse {
        submissions,
        total,
        page,
        per_page,
    }))
}

/// Get a specific submission
pub async fn get_submission(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionResponse>> {
    let submission = SubmissionService::get_submission(
        state.db(),
        &id,
        &auth_user.id,
        &auth_user.role,
    )
    .await?;

    Ok(Json(submission))
}

/// Get the source code of a submission
pub async fn get_submission_source(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionSourceResponse>> {
    let source = SubmissionService::get_submission_source(
        state.db(),
        &id,
        &auth_user.id,
        &auth_user.role,
    )
    .await?;

    Ok(Json(source))
}

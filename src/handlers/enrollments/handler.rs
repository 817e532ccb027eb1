//! Enrollment handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::EnrollmentService,
    state::AppState,
};

use super::{
    request::{EnrollRequest, ListEnrollmentsQuery, UpdateEnrollmentRequest},
    response::{EnrollmentResponse, EnrollmentsListResponse},
};

/// Enroll the current user in a course or problem set
pub async fn enroll(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<EnrollRequest>,
) -> AppResult<(StatusCode, Json<EnrollmentResponse>)> {
    let enrollment = EnrollmentService::enroll(state.db(), &auth_user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(enrollment.into())))
}

/// List enrollments (own, or any user's for admins)
pub async fn list_enrollments(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListEnrollmentsQuery>,
) -> AppResult<Json<EnrollmentsListResponse>> {
    let enrollments = EnrollmentService::list_enrollments(
        state.db(),
        &auth_user.id,
        &auth_user.role,
        query.user_id.as_ref(),
    )
    .await?;

    let total = enrollments.len() as i64;
    let enrollments = enrollments.into_iter().map(EnrollmentResponse::from).collect();

    Ok(Json(EnrollmentsListResponse { enrollments, total }))
}

/// Update an enrollment's status
pub async fn update_enrollment(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEnrollmentRequest>,
) -> AppResult<Json<EnrollmentResponse>> {
    let enrollment = EnrollmentService::update_enrollment(
        state.db(),
        &id,
        &auth_user.id,
        &auth_user.role,
        payload,
    )
    .await?;

    Ok(Json(enrollment.into()))
}

/// Delete an enrollment
pub async fn unenroll(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    EnrollmentService::unenroll(state.db(), &id, &auth_user.id, &auth_user.role).await?;

    Ok(StatusCode::NO_CONTENT)
}

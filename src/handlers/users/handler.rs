//! User handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::{AppError, AppResult},
    handlers::submissions::request::ListSubmissionsQuery,
    middleware::auth::AuthenticatedUser,
    services::{SubmissionService, UserService},
    state::AppState,
};

use super::{
    request::{ListUsersQuery, UpdateUserRequest, UserSubmissionsQuery},
    response::{
        UnifiedEnrollmentsResponse, UserResponse, UserSubmissionsResponse, UsersListResponse,
    },
};

/// List all users (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<UsersListResponse>> {
    if !auth_user.is_admin() {
        return Err(AppError::Forbidden("Only admins can list users".to_string()));
    }

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    let (users, total) = UserService::list_users(state.db(), page, per_page).await?;

    Ok(Json(UsersListResponse {
        users,
        total,
        page,
        per_page,
    }))
}

/// Get a user profile
pub async fn get_user(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = UserService::get_user(state.db(), &id).await?;
    Ok(Json(user))
}

/// Update a user profile (self or admin)
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    payload.validate()?;

    let user = UserService::update_user(
        state.db(),
        &id,
        &auth_user.id,
        &auth_user.role,
        payload,
    )
    .await?;

    Ok(Json(user))
}

/// List a user's submissions (self or admin)
pub async fn get_user_submissions(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<UserSubmissionsQuery>,
) -> AppResult<Json<UserSubmissionsResponse>> {
    if id != auth_user.id && !auth_user.is_admin() {
        return Err(AppError::Forbidden(
            "Cannot view other users' submissions".to_string(),
        ));
    }

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    let list_query = ListSubmissionsQuery {
        page: None,
        per_page: None,
        user_id: Some(id),
        problem_instance_id: None,
    };

    let (submissions, total) = SubmissionService::list_submissions(
        state.db(),
        &id,
        &auth_user.role,
        &list_query,
        page,
        per_page,
    )
    .await?;

    Ok(Json(UserSubmissionsResponse {
        submissions,
        total,
        page,
        per_page,
    }))
}

/// Unified enrollments for a user (self or admin).
///
/// Unions the legacy enrolled_course_ids array with enrollments rows;
/// table rows win on conflict.
pub async fn get_user_enrollments(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UnifiedEnrollmentsResponse>> {
    let response = UserService::get_unified_enrollments(
        state.db(),
        &id,
        &auth_user.id,
        &auth_user.role,
    )
    .await?;

    Ok(Json(response))
}

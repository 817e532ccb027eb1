//! Course handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::{AppError, AppResult},
    middleware::auth::{AuthenticatedUser, OptionalAuth},
    services::CourseService,
    state::AppState,
};

use super::{
    request::{CreateCourseRequest, ListCoursesQuery, RateCourseRequest, UpdateCourseRequest},
    response::{CourseResponse, CoursesListResponse},
};

/// List all courses (paginated)
pub async fn list_courses(
    State(state): State<AppState>,
    OptionalAuth(auth_user): OptionalAuth,
    Query(query): Query<ListCoursesQuery>,
) -> AppResult<Json<CoursesListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    // Students only see published courses, staff see all
    let show_all = auth_user
        .as_ref()
        .map(|u| u.can_manage_content())
        .unwrap_or(false);

    let (courses, total) =
        CourseService::list_courses(state.db(), &query, page, per_page, show_all).await?;

    Ok(Json(CoursesListResponse {
        courses,
        total,
        page,
        per_page,
    }))
}

/// Create a new course
pub async fn create_course(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<CourseResponse>)> {
    payload.validate()?;

    // Only instructors and admins can create courses
    if !auth_user.can_manage_content() {
        return Err(AppError::Forbidden(
            "Only instructors can create courses".to_string(),
        ));
    }

    let course = CourseService::create_course(state.db(), &auth_user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(course)))
}

/// Get a specific course
pub async fn get_course(
    State(state): State<AppState>,
    OptionalAuth(auth_user): OptionalAuth,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CourseResponse>> {
    let is_staff = auth_user
        .as_ref()
        .map(|u| u.can_manage_content())
        .unwrap_or(false);

    let course = CourseService::get_course(
        state.db(),
        &id,
        auth_user.as_ref().map(|u| &u.id),
        is_staff,
    )
    .await?;

    Ok(Json(course))
}

/// Update a course
pub async fn update_course(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCourseRequest>,
) -> AppResult<Json<CourseResponse>> {
    payload.validate()?;

    let course = CourseService::update_course(
        state.db(),
        &id,
        &auth_user.id,
        &auth_user.role,
        payload,
    )
    .await?;

    Ok(Json(course))
}

/// Delete a course
pub async fn delete_course(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    CourseService::delete_course(state.db(), &id, &auth_user.id, &auth_user.role).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rate a course (enrolled users only)
pub async fn rate_course(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RateCourseRequest>,
) -> AppResult<Json<CourseResponse>> {
    let course =
        CourseService::rate_course(state.db(), &id, &auth_user.id, payload.rating).await?;

    Ok(Json(course))
}

/// Attach a problem set to a course
pub async fn attach_problem_set(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((id, set_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    CourseService::attach_problem_set(
        state.db(),
        &id,
        &set_id,
        &auth_user.id,
        &auth_user.role,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Detach a problem set from a course
pub async fn detach_problem_set(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((id, set_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    CourseService::detach_problem_set(
        state.db(),
        &id,
        &set_id,
        &auth_user.id,
        &auth_user.role,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

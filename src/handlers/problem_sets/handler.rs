//! Problem set handler implementations

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
    services::ProblemSetService,
    state::AppState,
};

use super::{
    request::{
        CreateProblemInstanceRequest, CreateProblemSetRequest, ListProblemSetsQuery,
        ReorderProblemsRequest, UpdateProblemInstanceRequest, UpdateProblemSetRequest,
    },
    response::{ProblemInstanceResponse, ProblemSetResponse, ProblemSetsListResponse},
};

/// List all problem sets (paginated)
pub async fn list_problem_sets(
    State(state): State<AppState>,
    OptionalAuth(auth_user): OptionalAuth,
    Query(query): Query<ListProblemSetsQuery>,
) -> AppResult<Json<ProblemSetsListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    let show_all = auth_user
        .as_ref()
        .map(|u| u.can_manage_content())
        .unwrap_or(false);

    let (problem_sets, total) =
        ProblemSetService::list_sets(state.db(), &query, page, per_page, show_all).await?;

    Ok(Json(ProblemSetsListResponse {
        problem_sets,
        total,
        page,
        per_page,
    }))
}

/// Create a new problem set
pub async fn create_problem_set(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateProblemSetRequest>,
) -> AppResult<(StatusCode, Json<ProblemSetResponse>)> {
    payload.validate()?;

    if !auth_user.can_manage_content() {
        return Err(AppError::Forbidden(
            "Only instructors can create problem sets".to_string(),
        ));
    }

    let set = ProblemSetService::create_set(state.db(), &auth_user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(set)))
}

/// Get a specific problem set with its ordered problems
pub async fn get_problem_set(
    State(state): State<AppState>,
    OptionalAuth(auth_user): OptionalAuth,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProblemSetResponse>> {
    let is_staff = auth_user
        .as_ref()
        .map(|u| u.can_manage_content())
        .unwrap_or(false);

    let set = ProblemSetService::get_set(
        state.db(),
        &id,
        auth_user.as_ref().map(|u| &u.id),
        is_staff,
    )
    .await?;

    Ok(Json(set))
}

/// Update a problem set
pub async fn update_problem_set(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProblemSetRequest>,
) -> AppResult<Json<ProblemSetResponse>> {
    payload.validate()?;

    let set = ProblemSetService::update_set(
        state.db(),
        &id,
        &auth_user.id,
        &auth_user.role,
        payload,
    )
    .await?;

    Ok(Json(set))
}

/// Delete a problem set
pub async fn delete_problem_set(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    ProblemSetService::delete_set(state.db(), &id, &auth_user.id, &auth_user.role).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Append a problem instance to a set
pub async fn add_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateProblemInstanceRequest>,
) -> AppResult<(StatusCode, Json<ProblemInstanceResponse>)> {
    payload.validate()?;

    let problem = ProblemSetService::add_problem(
        state.db(),
        &id,
        &auth_user.id,
        &auth_user.role,
        payload,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(problem)))
}

/// Update a problem instance
pub async fn update_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((id, pid)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateProblemInstanceRequest>,
) -> AppResult<Json<ProblemInstanceResponse>> {
    payload.validate()?;

    let problem = ProblemSetService::update_problem(
        state.db(),
        &id,
        &pid,
        &auth_user.id,
        &auth_user.role,
        payload,
    )
    .await?;

    Ok(Json(problem))
}

/// Remove a problem instance from a set
pub async fn remove_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((id, pid)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    ProblemSetService::remove_problem(
        state.db(),
        &id,
        &pid,
        &auth_user.id,
        &auth_user.role,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Reorder the problems of a set
pub async fn reorder_problems(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReorderProblemsRequest>,
) -> AppResult<Json<ProblemSetResponse>> {
    let set = ProblemSetService::reorder_problems(
        state.db(),
        &id,
        &auth_user.id,
        &auth_user.role,
        payload,
    )
    .await?;

    Ok(Json(set))
}

//! Contest handler implementations

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
    middleware::auth::AuthenticatedUser,
    services::ContestService,
    state::AppState,
};

use super::{
    request::{
        CreateContestRequest, ListContestsQuery, ListParticipantsQuery, UpdateContestRequest,
    },
    response::{
        ContestResponse, ContestsListResponse, ParticipantsListResponse, RegistrationResponse,
    },
};

/// List contests (paginated)
pub async fn list_contests(
    State(state): State<AppState>,
    Query(query): Query<ListContestsQuery>,
) -> AppResult<Json<ContestsListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    let (contests, total) =
        ContestService::list_contests(state.db(), &query, page, per_page).await?;

    Ok(Json(ContestsListResponse {
        contests,
        total,
        page,
        per_page,
    }))
}

/// Create a new contest
pub async fn create_contest(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateContestRequest>,
) -> AppResult<(StatusCode, Json<ContestResponse>)> {
    payload.validate()?;

    if !auth_user.can_manage_content() {
        return Err(AppError::Forbidden(
            "Only instructors can create contests".to_string(),
        ));
    }

    let contest = ContestService::create_contest(state.db(), &auth_user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(contest)))
}

/// Get a specific contest
pub async fn get_contest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContestResponse>> {
    let contest = ContestService::get_contest(state.db(), &id).await?;
    Ok(Json(contest))
}

/// Update a contest
pub async fn update_contest(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContestRequest>,
) -> AppResult<Json<ContestResponse>> {
    payload.validate()?;

    let contest = ContestService::update_contest(
        state.db(),
        &id,
        &auth_user.id,
        &auth_user.role,
        payload,
    )
    .await?;

    Ok(Json(contest))
}

/// Delete a contest
pub async fn delete_contest(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    ContestService::delete_contest(state.db(), &id, &auth_user.id, &auth_user.role).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Register for a contest
pub async fn register(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<RegistrationResponse>)> {
    let registration =
        ContestService::register_participant(state.db(), &id, &auth_user.id).await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

/// Unregister from a contest
pub async fn unregister(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    ContestService::unregister_participant(state.db(), &id, &auth_user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List contest participants
pub async fn list_participants(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListParticipantsQuery>,
) -> AppResult<Json<ParticipantsListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    let (participants, total) =
        ContestService::list_participants(state.db(), &id, page, per_page).await?;

    Ok(Json(ParticipantsListResponse {
        participants,
        total,
        page,
        per_page,
    }))
}

/// Attach a problem set to a contest
pub async fn attach_problem_set(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((id, set_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    ContestService::attach_problem_set(
        state.db(),
        &id,
        &set_id,
        &auth_user.id,
        &auth_user.role,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Detach a problem set from a contest
pub async fn detach_problem_set(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((id, set_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    ContestService::detach_problem_set(
        state.db(),
        &id,
        &set_id,
        &auth_user.id,
        &auth_user.role,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

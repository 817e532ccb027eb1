//! Contest service

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::roles,
    db::repositories::{ContestRepository, ProblemSetRepository},
    error::{AppError, AppResult},
    handlers::contests::{
        request::{CreateContestRequest, ListContestsQuery, UpdateContestRequest},
        response::{
            ContestResponse, ContestSummary, ParticipantResponse, RegistrationResponse,
        },
    },
    models::{Contest, ContestStatus},
    utils::validation,
};

/// Contest service for business logic
pub struct ContestService;

impl ContestService {
    /// Create a new contest
    pub async fn create_contest(
        pool: &PgPool,
        organizer_id: &Uuid,
        payload: CreateContestRequest,
    ) -> AppResult<ContestResponse> {
        if payload.end_time <= payload.start_time {
            return Err(AppError::Validation(
                "Contest end time must be after start time".to_string(),
            ));
        }

        if let Some(visibility) = payload.visibility.as_deref() {
            validation::validate_visibility(visibility)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }

        if let Some(mode) = payload.registration_mode.as_deref() {
            validation::validate_registration_mode(mode)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }

        let contest = ContestRepository::create(
            pool,
            &payload.title,
            payload.description.as_deref(),
            organizer_id,
            payload.visibility.as_deref().unwrap_or("public"),
            payload.registration_mode.as_deref().unwrap_or("open"),
            payload.start_time,
            payload.end_time,
            payload.registration_start,
            payload.registration_end,
        )
        .await?;

        Self::to_contest_response(pool, contest).await
    }

    /// Get contest by ID
    pub async fn get_contest(pool: &PgPool, id: &Uuid) -> AppResult<ContestResponse> {
        let contest = ContestRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        Self::to_contest_response(pool, contest).await
    }

    /// Update contest
    pub async fn update_contest(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        payload: UpdateContestRequest,
    ) -> AppResult<ContestResponse> {
        let contest = Self::find_owned(pool, id, requester_id, requester_role, "update").await?;

        if let Some(visibility) = payload.visibility.as_deref() {
            validation::validate_visibility(visibility)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }

        if let Some(mode) = payload.registration_mode.as_deref() {
            validation::validate_registration_mode(mode)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }

        let updated = ContestRepository::update(
            pool,
            &contest.id,
            payload.title.as_deref(),
            payload.description.as_deref(),
            payload.visibility.as_deref(),
            payload.registration_mode.as_deref(),
            payload.start_time,
            payload.end_time,
            payload.registration_start,
            payload.registration_end,
        )
        .await?;

        if updated.end_time <= updated.start_time {
            return Err(AppError::Validation(
                "Contest end time must be after start time".to_string(),
            ));
        }

        Self::to_contest_response(pool, updated).await
    }

    /// Delete contest
    pub async fn delete_contest(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<()> {
        let contest = Self::find_owned(pool, id, requester_id, requester_role, "delete").await?;
        ContestRepository::delete(pool, &contest.id).await
    }

    /// List contests with pagination
    pub async fn list_contests(
        pool: &PgPool,
        query: &ListContestsQuery,
        page: u32,
        per_page: u32,
    ) -> AppResult<(Vec<ContestSummary>, i64)> {
        let offset = ((page - 1) * per_page) as i64;
        let limit = per_page as i64;

        let (contests, total) = ContestRepository::list(
            pool,
            offset,
            limit,
            query.visibility.as_deref(),
            query.search.as_deref(),
        )
        .await?;

        let summaries = contests.into_iter().map(Self::to_contest_summary).collect();

        Ok((summaries, total))
    }

    /// Register the requesting user for a contest
    pub async fn register_participant(
        pool: &PgPool,
        contest_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<RegistrationResponse> {
        let contest = ContestRepository::find_by_id(pool, contest_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        // Check if registration is open
        if !contest.is_registration_open() {
            return Err(AppError::Validation("Registration is not open".to_string()));
        }

        // Check if already registered
        if ContestRepository::is_participant(pool, contest_id, user_id).await? {
            return Err(AppError::AlreadyExists(
                "Already registered for this contest".to_string(),
            ));
        }

        ContestRepository::register_participant(pool, contest_id, user_id).await?;

        Ok(RegistrationResponse {
            message: "Successfully registered for contest".to_string(),
            contest_id: *contest_id,
            registered_at: Utc::now(),
        })
    }

    /// Unregister the requesting user from a contest
    pub async fn unregister_participant(
        pool: &PgPool,
        contest_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<()> {
        let contest = ContestRepository::find_by_id(pool, contest_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        // Can't unregister after contest starts
        if contest.status() != ContestStatus::Upcoming {
            return Err(AppError::Validation(
                "Cannot unregister after contest starts".to_string(),
            ));
        }

        if !ContestRepository::is_participant(pool, contest_id, user_id).await? {
            return Err(AppError::NotFound(
                "Not registered for this contest".to_string(),
            ));
        }

        ContestRepository::unregister_participant(pool, contest_id, user_id).await
    }

    /// List participants
    pub async fn list_participants(
        pool: &PgPool,
        contest_id: &Uuid,
        page: u32,
        per_page: u32,
    ) -> AppResult<(Vec<ParticipantResponse>, i64)> {
        ContestRepository::find_by_id(pool, contest_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        let offset = ((page - 1) * per_page) as i64;
        let limit = per_page as i64;

        let (participants, total) =
            ContestRepository::list_participants(pool, contest_id, offset, limit).await?;

        let responses = futures::future::try_join_all(participants.into_iter().map(|p| async move {
            let username: Option<String> =
                sqlx::query_scalar(r#"SELECT username FROM users WHERE id = $1"#)
                    .bind(p.user_id)
                    .fetch_optional(pool)
                    .await?;

            Ok::<_, AppError>(ParticipantResponse {
                user_id: p.user_id,
                username: username.unwrap_or_default(),
                registered_at: p.registered_at,
            })
        }))
        .await?;

        Ok((responses, total))
    }

    /// Attach a problem set to a contest
    pub async fn attach_problem_set(
        pool: &PgPool,
        contest_id: &Uuid,
        set_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<()> {
        Self::find_owned(pool, contest_id, requester_id, requester_role, "modify").await?;

        ProblemSetRepository::find_by_id(pool, set_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem set not found".to_string()))?;

        ContestRepository::attach_problem_set(pool, contest_id, set_id).await
    }

    /// Detach a problem set from a contest
    pub async fn detach_problem_set(
        pool: &PgPool,
        contest_id: &Uuid,
        set_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<()> {
        let contest =
            Self::find_owned(pool, contest_id, requester_id, requester_role, "modify").await?;

        if !contest.has_problem_set(set_id) {
            return Err(AppError::NotFound(
                "Problem set is not attached to this contest".to_string(),
            ));
        }

        ContestRepository::detach_problem_set(pool, contest_id, set_id).await
    }

    // Helper functions

    async fn find_owned(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        action: &str,
    ) -> AppResult<Contest> {
        let contest = ContestRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        if contest.organizer_id != *requester_id && requester_role != roles::ADMIN {
            return Err(AppError::Forbidden(format!(
                "Cannot {} other users' contests",
                action
            )));
        }

        Ok(contest)
    }

    async fn to_contest_response(pool: &PgPool, contest: Contest) -> AppResult<ContestResponse> {
        let organizer: Option<String> =
            sqlx::query_scalar(r#"SELECT username FROM users WHERE id = $1"#)
                .bind(contest.organizer_id)
                .fetch_optional(pool)
                .await?;

        let participant_count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM contest_participants WHERE contest_id = $1"#,
        )
        .bind(contest.id)
        .fetch_one(pool)
        .await?;

        let status = contest.status();

        Ok(ContestResponse {
            id: contest.id,
            title: contest.title,
            description: contest.description,
            organizer_id: contest.organizer_id,
            organizer_name: organizer.unwrap_or_default(),
            visibility: contest.visibility,
            registration_mode: contest.registration_mode,
            status,
            start_time: contest.start_time,
            end_time: contest.end_time,
            registration_start: contest.registration_start,
            registration_end: contest.registration_end,
            problem_set_ids: contest.problem_set_ids,
            participant_count,
            created_at: contest.created_at,
            updated_at: contest.updated_at,
        })
    }

    fn to_contest_summary(contest: Contest) -> ContestSummary {
        let status = contest.status();
        ContestSummary {
            id: contest.id,
            title: contest.title,
            visibility: contest.visibility,
            status,
            start_time: contest.start_time,
            end_time: contest.end_time,
        }
    }
}

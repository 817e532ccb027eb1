//! Problem set service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::CONFIG,
    constants::roles,
    db::repositories::ProblemSetRepository,
    error::{AppError, AppResult},
    handlers::problem_sets::{
        request::{
            CreateProblemInstanceRequest, CreateProblemSetRequest, ListProblemSetsQuery,
            ReorderProblemsRequest, UpdateProblemInstanceRequest, UpdateProblemSetRequest,
        },
        response::{ProblemInstanceResponse, ProblemSetResponse, ProblemSetSummary},
    },
    models::{problem_set::reorder_positions, ProblemInstance, ProblemSet},
    utils::validation,
};

/// Problem set service for business logic
pub struct ProblemSetService;

impl ProblemSetService {
    /// Create a new problem set
    pub async fn create_set(
        pool: &PgPool,
        author_id: &Uuid,
        payload: CreateProblemSetRequest,
    ) -> AppResult<ProblemSetResponse> {
        if let Some(difficulty) = payload.difficulty.as_deref() {
            validation::validate_difficulty(difficulty)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }

        let tags = payload.tags.unwrap_or_default();
        validation::validate_tags(&tags).map_err(|e| AppError::Validation(e.to_string()))?;

        let set = ProblemSetRepository::create(
            pool,
            payload.course_id.as_ref(),
            &payload.title,
            payload.description.as_deref().unwrap_or(""),
            payload.difficulty.as_deref().unwrap_or("beginner"),
            &tags,
            payload.is_published.unwrap_or(false),
            author_id,
        )
        .await?;

        Self::to_set_response(pool, set, true).await
    }

    /// Get a problem set with its ordered instances
    pub async fn get_set(
        pool: &PgPool,
        id: &Uuid,
        requester_id: Option<&Uuid>,
        is_staff: bool,
    ) -> AppResult<ProblemSetResponse> {
        let set = ProblemSetRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem set not found".to_string()))?;

        if !set.is_accessible_by(requester_id, is_staff) {
            return Err(AppError::NotFound("Problem set not found".to_string()));
        }

        let show_answers = is_staff || requester_id == Some(&set.author_id);
        Self::to_set_response(pool, set, show_answers).await
    }

    /// Update problem set
    pub async fn update_set(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        payload: UpdateProblemSetRequest,
    ) -> AppResult<ProblemSetResponse> {
        let set = Self::find_owned(pool, id, requester_id, requester_role, "update").await?;

        if let Some(difficulty) = payload.difficulty.as_deref() {
            validation::validate_difficulty(difficulty)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }

        if let Some(tags) = payload.tags.as_deref() {
            validation::validate_tags(tags).map_err(|e| AppError::Validation(e.to_string()))?;
        }

        let updated = ProblemSetRepository::update(
            pool,
            &set.id,
            payload.title.as_deref(),
            payload.description.as_deref(),
            payload.difficulty.as_deref(),
            payload.tags.as_deref(),
            payload.is_published,
            payload.course_id.as_ref(),
        )
        .await?;

        Self::to_set_response(pool, updated, true).await
    }

    /// Delete problem set
    pub async fn delete_set(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<()> {
        let set = Self::find_owned(pool, id, requester_id, requester_role, "delete").await?;
        ProblemSetRepository::delete(pool, &set.id).await
    }

    /// List problem sets
    pub async fn list_sets(
        pool: &PgPool,
        query: &ListProblemSetsQuery,
        page: u32,
        per_page: u32,
        show_all: bool,
    ) -> AppResult<(Vec<ProblemSetSummary>, i64)> {
        let offset = ((page - 1) * per_page) as i64;
        let limit = per_page as i64;

        let (sets, total) = ProblemSetRepository::list(
            pool,
            offset,
            limit,
            query.course_id.as_ref(),
            query.search.as_deref(),
            query.difficulty.as_deref(),
            show_all,
        )
        .await?;

        let summaries = futures::future::try_join_all(
            sets.into_iter().map(|s| Self::to_set_summary(pool, s)),
        )
        .await?;

        Ok((summaries, total))
    }

    /// Append a problem instance to a set
    pub async fn add_problem(
        pool: &PgPool,
        set_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        payload: CreateProblemInstanceRequest,
    ) -> AppResult<ProblemInstanceResponse> {
        let set = Self::find_owned(pool, set_id, requester_id, requester_role, "modify").await?;

        let time_limit_ms = payload
            .time_limit_ms
            .unwrap_or(CONFIG.execution.default_time_limit_ms);
        let memory_limit_kb = payload
            .memory_limit_kb
            .unwrap_or(CONFIG.execution.default_memory_limit_kb);

        if !(100..=crate::constants::MAX_TIME_LIMIT_MS).contains(&time_limit_ms) {
            return Err(AppError::Validation("Time limit out of range".to_string()));
        }
        if !(1024..=crate::constants::MAX_MEMORY_LIMIT_KB).contains(&memory_limit_kb) {
            return Err(AppError::Validation("Memory limit out of range".to_string()));
        }

        let position = ProblemSetRepository::next_position(pool, &set.id).await?;

        let instance = ProblemSetRepository::create_instance(
            pool,
            &set.id,
            payload.source_problem_id.as_ref(),
            &payload.title,
            payload.statement.as_deref().unwrap_or(""),
            payload.points.unwrap_or(100),
            position,
            payload.sample_input.as_deref(),
            payload.expected_output.as_deref(),
            time_limit_ms,
            memory_limit_kb,
        )
        .await?;

        Ok(Self::to_instance_response(instance, true))
    }

    /// Update a problem instance
    pub async fn update_problem(
        pool: &PgPool,
        set_id: &Uuid,
        instance_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        payload: UpdateProblemInstanceRequest,
    ) -> AppResult<ProblemInstanceResponse> {
        Self::find_owned(pool, set_id, requester_id, requester_role, "modify").await?;

        let instance = Self::find_instance_in_set(pool, set_id, instance_id).await?;

        let updated = ProblemSetRepository::update_instance(
            pool,
            &instance.id,
            payload.title.as_deref(),
            payload.statement.as_deref(),
            payload.points,
            payload.sample_input.as_deref(),
            payload.expected_output.as_deref(),
            payload.time_limit_ms,
            payload.memory_limit_kb,
        )
        .await?;

        Ok(Self::to_instance_response(updated, true))
    }

    /// Remove a problem instance; remaining positions are re-compacted
    pub async fn remove_problem(
        pool: &PgPool,
        set_id: &Uuid,
        instance_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<()> {
        Self::find_owned(pool, set_id, requester_id, requester_role, "modify").await?;

        let instance = Self::find_instance_in_set(pool, set_id, instance_id).await?;

        ProblemSetRepository::delete_instance(pool, &instance.id, set_id).await
    }

    /// Reorder the problems of a set.
    ///
    /// The request must list every instance id exactly once; positions are
    /// rewritten 0..n-1 in the given order.
    pub async fn reorder_problems(
        pool: &PgPool,
        set_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        payload: ReorderProblemsRequest,
    ) -> AppResult<ProblemSetResponse> {
        let set = Self::find_owned(pool, set_id, requester_id, requester_role, "modify").await?;

        let current = ProblemSetRepository::list_instances(pool, &set.id).await?;

        let moves = reorder_positions(&current, &payload.problem_ids)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        ProblemSetRepository::apply_reorder(pool, &set.id, &moves).await?;

        Self::to_set_response(pool, set, true).await
    }

    // Helper functions

    /// Load a set and check write permissions on it
    async fn find_owned(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        action: &str,
    ) -> AppResult<ProblemSet> {
        let set = ProblemSetRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem set not found".to_string()))?;

        if set.author_id != *requester_id && requester_role != roles::ADMIN {
            return Err(AppError::Forbidden(format!(
                "Cannot {} other users' problem sets",
                action
            )));
        }

        Ok(set)
    }

    async fn find_instance_in_set(
        pool: &PgPool,
        set_id: &Uuid,
        instance_id: &Uuid,
    ) -> AppResult<ProblemInstance> {
        let instance = ProblemSetRepository::find_instance(pool, instance_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        if instance.problem_set_id != *set_id {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }

        Ok(instance)
    }

    async fn to_set_response(
        pool: &PgPool,
        set: ProblemSet,
        show_answers: bool,
    ) -> AppResult<ProblemSetResponse> {
        let instances = ProblemSetRepository::list_instances(pool, &set.id).await?;

        let problems = instances
            .into_iter()
            .map(|i| Self::to_instance_response(i, show_answers))
            .collect();

        Ok(ProblemSetResponse {
            id: set.id,
            course_id: set.course_id,
            title: set.title,
            description: set.description,
            difficulty: set.difficulty,
            tags: set.tags,
            is_published: set.is_published,
            author_id: set.author_id,
            problems,
            created_at: set.created_at,
            updated_at: set.updated_at,
        })
    }

    async fn to_set_summary(pool: &PgPool, set: ProblemSet) -> AppResult<ProblemSetSummary> {
        let problem_count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM problem_instances WHERE problem_set_id = $1"#,
        )
        .bind(set.id)
        .fetch_one(pool)
        .await?;

        Ok(ProblemSetSummary {
            id: set.id,
            course_id: set.course_id,
            title: set.title,
            difficulty: set.difficulty,
            tags: set.tags,
            is_published: set.is_published,
            problem_count,
        })
    }

    fn to_instance_response(instance: ProblemInstance, show_answers: bool) -> ProblemInstanceResponse {
        ProblemInstanceResponse {
            id: instance.id,
            problem_set_id: instance.problem_set_id,
            source_problem_id: instance.source_problem_id,
            title: instance.title,
            statement: instance.statement,
            points: instance.points,
            position: instance.position,
            sample_input: instance.sample_input,
            expected_output: if show_answers {
                instance.expected_output
            } else {
                None
            },
            time_limit_ms: instance.time_limit_ms,
            memory_limit_kb: instance.memory_limit_kb,
            created_at: instance.created_at,
        }
    }
}

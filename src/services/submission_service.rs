//! Submission service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{enrollment_targets, languages, roles},
    db::repositories::{EnrollmentRepository, ProblemSetRepository, SubmissionRepository},
    error::{AppError, AppResult},
    handlers::submissions::{
        request::{CreateSubmissionRequest, ListSubmissionsQuery},
        response::{SubmissionResponse, SubmissionSourceResponse},
    },
    models::Submission,
    services::CourseService,
    utils::validation,
};

/// Submission service for business logic
pub struct SubmissionService;

impl SubmissionService {
    /// Create a new submission in the pending state.
    ///
    /// The caller must be enrolled in the owning problem set or in its
    /// course (either tracking mechanism counts), unless they authored
    /// the set or are an admin.
    pub async fn create_submission(
        pool: &PgPool,
        user_id: &Uuid,
        role: &str,
        payload: CreateSubmissionRequest,
    ) -> AppResult<Submission> {
        let language = payload.language.as_deref().unwrap_or(languages::PYTHON);
        validation::validate_language(language)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        validation::validate_source_code(&payload.source_code)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let instance = ProblemSetRepository::find_instance(pool, &payload.problem_instance_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        let set = ProblemSetRepository::find_by_id(pool, &instance.problem_set_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem set not found".to_string()))?;

        let is_staff = role == roles::ADMIN || set.author_id == *user_id;
        if !is_staff && !Self::may_submit(pool, user_id, &set.id, set.course_id.as_ref()).await? {
            return Err(AppError::Forbidden(
                "Enroll in the problem set or its course before submitting".to_string(),
            ));
        }

        SubmissionRepository::create(
            pool,
            user_id,
            &instance.id,
            language,
            &payload.source_code,
        )
        .await
    }

    /// Get a submission (owner or admin)
    pub async fn get_submission(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<SubmissionResponse> {
        let submission = Self::find_visible(pool, id, requester_id, requester_role).await?;
        Ok(Self::to_submission_response(submission))
    }

    /// Get the source code of a submission (owner or admin)
    pub async fn get_submission_source(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<SubmissionSourceResponse> {
        let submission = Self::find_visible(pool, id, requester_id, requester_role).await?;

        Ok(SubmissionSourceResponse {
            id: submission.id,
            language: submission.language,
            source_code: submission.source_code,
        })
    }

    /// List submissions; non-admins only see their own
    pub async fn list_submissions(
        pool: &PgPool,
        requester_id: &Uuid,
        requester_role: &str,
        query: &ListSubmissionsQuery,
        page: u32,
        per_page: u32,
    ) -> AppResult<(Vec<SubmissionResponse>, i64)> {
        let offset = ((page - 1) * per_page) as i64;
        let limit = per_page as i64;

        let user_filter = if requester_role == roles::ADMIN {
            query.user_id.as_ref()
        } else {
            Some(requester_id)
        };

        let (submissions, total) = SubmissionRepository::list(
            pool,
            offset,
            limit,
            user_filter,
            query.problem_instance_id.as_ref(),
        )
        .await?;

        let responses = submissions
            .into_iter()
            .map(Self::to_submission_response)
            .collect();

        Ok((responses, total))
    }

    // Helper functions

    async fn may_submit(
        pool: &PgPool,
        user_id: &Uuid,
        set_id: &Uuid,
        course_id: Option<&Uuid>,
    ) -> AppResult<bool> {
        if let Some(enrollment) = EnrollmentRepository::find_for_target(
            pool,
            user_id,
            set_id,
            enrollment_targets::PROBLEM_SET,
        )
        .await?
        {
            if enrollment.grants_access() {
                return Ok(true);
            }
        }

        if let Some(course_id) = course_id {
            return CourseService::is_enrolled(pool, user_id, course_id).await;
        }

        Ok(false)
    }

    async fn find_visible(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<Submission> {
        let submission = SubmissionRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        if submission.user_id != *requester_id && requester_role != roles::ADMIN {
            return Err(AppError::Forbidden(
                "Cannot view other users' submissions".to_string(),
            ));
        }

        Ok(submission)
    }

    fn to_submission_response(submission: Submission) -> SubmissionResponse {
        SubmissionResponse {
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
        }
    }
}

//! Submission execution service
//!
//! Bridges the HTTP layer and the sandbox: claims a pending submission,
//! runs it, and persists the terminal result. Launched as a background
//! tokio task right after a submission is created.

use uuid::Uuid;

use crate::{
    constants::submission_statuses,
    db::repositories::{ProblemSetRepository, SubmissionRepository},
    error::{AppError, AppResult},
    execution::PythonRunner,
    models::SubmissionStatus,
    state::AppState,
};

/// Execution service
pub struct ExecutionService;

impl ExecutionService {
    /// Execute a submission end to end and persist the result.
    ///
    /// Any failure before or during the sandbox run is recorded as an
    /// internal_error result so the submission never sticks in pending.
    pub async fn execute_submission(state: AppState, submission_id: Uuid) {
        if let Err(e) = Self::run(&state, &submission_id).await {
            tracing::error!(submission_id = %submission_id, error = %e, "Submission execution failed");

            let message = match &e {
                AppError::Docker(_) => "Sandbox unavailable".to_string(),
                _ => "Execution failed".to_string(),
            };

            if let Err(e) = SubmissionRepository::record_result(
                state.db(),
                &submission_id,
                submission_statuses::INTERNAL_ERROR,
                None,
                None,
                None,
                Some(&message),
            )
            .await
            {
                tracing::error!(submission_id = %submission_id, error = %e, "Failed to record execution failure");
            }
        }
    }

    async fn run(state: &AppState, submission_id: &Uuid) -> AppResult<()> {
        let pool = state.db();

        let submission = SubmissionRepository::find_by_id(pool, submission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        if SubmissionStatus::from_str(&submission.status)
            .map(|s| s.is_final())
            .unwrap_or(false)
        {
            // Already judged, nothing to do
            return Ok(());
        }

        let instance = ProblemSetRepository::find_instance(pool, &submission.problem_instance_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        SubmissionRepository::mark_running(pool, submission_id).await?;

        tracing::info!(
            submission_id = %submission_id,
            problem = %instance.title,
            time_limit_ms = instance.time_limit_ms,
            memory_limit_kb = instance.memory_limit_kb,
            "Executing submission"
        );

        let runner = PythonRunner::new(state.docker().clone(), state.config().clone());
        let outcome = runner
            .run(submission_id, &submission.source_code, &instance)
            .await?;

        tracing::info!(
            submission_id = %submission_id,
            status = %outcome.status,
            runtime_ms = ?outcome.runtime_ms,
            memory_kb = ?outcome.memory_kb,
            "Submission judged"
        );

        SubmissionRepository::record_result(
            pool,
            submission_id,
            outcome.status.as_str(),
            outcome.runtime_ms,
            outcome.memory_kb,
            outcome.output.as_deref(),
            outcome.error_message.as_deref(),
        )
        .await
    }
}

//! Submission repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Submission};

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Create a new submission in the pending state
    pub async fn create(
        pool: &PgPool,
        user_id: &Uuid,
        problem_instance_id: &Uuid,
        language: &str,
        source_code: &str,
    ) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (user_id, problem_instance_id, language, source_code)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(problem_instance_id)
        .bind(language)
        .bind(source_code)
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// Find submission by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Submission>> {
        let submission =
            sqlx::query_as::<_, Submission>(r#"SELECT * FROM submissions WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(submission)
    }

    /// Mark a submission as running
    pub async fn mark_running(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"UPDATE submissions SET status = 'running' WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Persist a terminal judging result
    pub async fn record_result(
        pool: &PgPool,
        id: &Uuid,
        status: &str,
        runtime_ms: Option<f64>,
        memory_kb: Option<i64>,
        output: Option<&str>,
        error_message: Option<&str>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE submissions
            SET status = $2,
                runtime_ms = $3,
                memory_kb = $4,
                output = $5,
                error_message = $6,
                judged_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(runtime_ms)
        .bind(memory_kb)
        .bind(output)
        .bind(error_message)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// List submissions with pagination and optional filters
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        user_id: Option<&Uuid>,
        problem_instance_id: Option<&Uuid>,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE
                ($1::uuid IS NULL OR user_id = $1)
                AND ($2::uuid IS NULL OR problem_instance_id = $2)
            ORDER BY submitted_at DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(problem_instance_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM submissions
            WHERE
                ($1::uuid IS NULL OR user_id = $1)
                AND ($2::uuid IS NULL OR problem_instance_id = $2)
            "#,
        )
        .bind(user_id)
        .bind(problem_instance_id)
        .fetch_one(pool)
        .await?;

        Ok((submissions, count))
    }

    /// Count total submissions
    pub async fn count(pool: &PgPool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM submissions"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

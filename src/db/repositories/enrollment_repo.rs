//! Enrollment repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Enrollment};

/// Repository for enrollment database operations
pub struct EnrollmentRepository;

impl EnrollmentRepository {
    /// Create an enrollment
    pub async fn create(
        pool: &PgPool,
        user_id: &Uuid,
        target_id: &Uuid,
        target_kind: &str,
    ) -> AppResult<Enrollment> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (user_id, target_id, target_kind)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(target_id)
        .bind(target_kind)
        .fetch_one(pool)
        .await?;

        Ok(enrollment)
    }

    /// Find enrollment by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Enrollment>> {
        let enrollment =
            sqlx::query_as::<_, Enrollment>(r#"SELECT * FROM enrollments WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(enrollment)
    }

    /// Find a user's enrollment for a specific target
    pub async fn find_for_target(
        pool: &PgPool,
        user_id: &Uuid,
        target_id: &Uuid,
        target_kind: &str,
    ) -> AppResult<Option<Enrollment>> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT * FROM enrollments
            WHERE user_id = $1 AND target_id = $2 AND target_kind = $3
            "#,
        )
        .bind(user_id)
        .bind(target_id)
        .bind(target_kind)
        .fetch_optional(pool)
        .await?;

        Ok(enrollment)
    }

    /// List all enrollments of a user
    pub async fn list_for_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<Enrollment>> {
        let enrollments = sqlx::query_as::<_, Enrollment>(
            r#"SELECT * FROM enrollments WHERE user_id = $1 ORDER BY enrolled_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(enrollments)
    }

    /// Update the status of an enrollment
    pub async fn update_status(
        pool: &PgPool,
        id: &Uuid,
        status: &str,
    ) -> AppResult<Enrollment> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            UPDATE enrollments
            SET status = $2,
                completed_at = CASE WHEN $2 = 'completed' THEN NOW() ELSE completed_at END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(enrollment)
    }

    /// Delete an enrollment
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM enrollments WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Count enrollments for a target
    pub async fn count_for_target(
        pool: &PgPool,
        target_id: &Uuid,
        target_kind: &str,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM enrollments WHERE target_id = $1 AND target_kind = $2"#,
        )
        .bind(target_id)
        .bind(target_kind)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Count completed enrollments for a target
    pub async fn count_completed_for_target(
        pool: &PgPool,
        target_id: &Uuid,
        target_kind: &str,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM enrollments
            WHERE target_id = $1 AND target_kind = $2 AND status = 'completed'
            "#,
        )
        .bind(target_id)
        .bind(target_kind)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Count total enrollments
    pub async fn count(pool: &PgPool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM enrollments"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

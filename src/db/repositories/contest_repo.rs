//! Contest repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Contest, ContestParticipant},
};

/// Repository for contest database operations
pub struct ContestRepository;

impl ContestRepository {
    /// Create a new contest
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: Option<&str>,
        organizer_id: &Uuid,
        visibility: &str,
        registration_mode: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        registration_start: Option<DateTime<Utc>>,
        registration_end: Option<DateTime<Utc>>,
    ) -> AppResult<Contest> {
        let contest = sqlx::query_as::<_, Contest>(
            r#"
            INSERT INTO contests (
                title, description, organizer_id, visibility, registration_mode,
                start_time, end_time, registration_start, registration_end
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(organizer_id)
        .bind(visibility)
        .bind(registration_mode)
        .bind(start_time)
        .bind(end_time)
        .bind(registration_start)
        .bind(registration_end)
        .fetch_one(pool)
        .await?;

        Ok(contest)
    }

    /// Find contest by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Contest>> {
        let contest = sqlx::query_as::<_, Contest>(r#"SELECT * FROM contests WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(contest)
    }

    /// Update contest
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        title: Option<&str>,
        description: Option<&str>,
        visibility: Option<&str>,
        registration_mode: Option<&str>,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
        registration_start: Option<DateTime<Utc>>,
        registration_end: Option<DateTime<Utc>>,
    ) -> AppResult<Contest> {
        let contest = sqlx::query_as::<_, Contest>(
            r#"
            UPDATE contests
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                visibility = COALESCE($4, visibility),
                registration_mode = COALESCE($5, registration_mode),
                start_time = COALESCE($6, start_time),
                end_time = COALESCE($7, end_time),
                registration_start = COALESCE($8, registration_start),
                registration_end = COALESCE($9, registration_end),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(visibility)
        .bind(registration_mode)
        .bind(start_time)
        .bind(end_time)
        .bind(registration_start)
        .bind(registration_end)
        .fetch_one(pool)
        .await?;

        Ok(contest)
    }

    /// Delete contest
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM contests WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Attach a problem set id to the contest's app-side array (idempotent)
    pub async fn attach_problem_set(pool: &PgPool, id: &Uuid, set_id: &Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE contests
            SET problem_set_ids = array_append(problem_set_ids, $2),
                updated_at = NOW()
            WHERE id = $1 AND NOT ($2 = ANY(problem_set_ids))
            "#,
        )
        .bind(id)
        .bind(set_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Detach a problem set id from the contest's app-side array
    pub async fn detach_problem_set(pool: &PgPool, id: &Uuid, set_id: &Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE contests
            SET problem_set_ids = array_remove(problem_set_ids, $2),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(set_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// List contests with pagination
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        visibility: Option<&str>,
        search: Option<&str>,
    ) -> AppResult<(Vec<Contest>, i64)> {
        let search_pattern = search.map(|s| format!("%{}%", s));

        let contests = sqlx::query_as::<_, Contest>(
            r#"
            SELECT * FROM contests
            WHERE
                ($1::text IS NULL OR visibility = $1)
                AND ($2::text IS NULL OR title ILIKE $2)
            ORDER BY start_time DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(visibility)
        .bind(&search_pattern)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM contests
            WHERE
                ($1::text IS NULL OR visibility = $1)
                AND ($2::text IS NULL OR title ILIKE $2)
            "#,
        )
        .bind(visibility)
        .bind(&search_pattern)
        .fetch_one(pool)
        .await?;

        Ok((contests, count))
    }

    /// Register a participant
    pub async fn register_participant(
        pool: &PgPool,
        contest_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<ContestParticipant> {
        let participant = sqlx::query_as::<_, ContestParticipant>(
            r#"
            INSERT INTO contest_participants (contest_id, user_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(participant)
    }

    /// Remove a participant
    pub async fn unregister_participant(
        pool: &PgPool,
        contest_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            r#"DELETE FROM contest_participants WHERE contest_id = $1 AND user_id = $2"#,
        )
        .bind(contest_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Check if a user is registered
    pub async fn is_participant(
        pool: &PgPool,
        contest_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM contest_participants WHERE contest_id = $1 AND user_id = $2"#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(count > 0)
    }

    /// List participants with pagination
    pub async fn list_participants(
        pool: &PgPool,
        contest_id: &Uuid,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<ContestParticipant>, i64)> {
        let participants = sqlx::query_as::<_, ContestParticipant>(
            r#"
            SELECT * FROM contest_participants
            WHERE contest_id = $1
            ORDER BY registered_at
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(contest_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM contest_participants WHERE contest_id = $1"#,
        )
        .bind(contest_id)
        .fetch_one(pool)
        .await?;

        Ok((participants, count))
    }

    /// Count total contests
    pub async fn count(pool: &PgPool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM contests"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

//! Course repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Course};

/// Repository for course database operations
pub struct CourseRepository;

impl CourseRepository {
    /// Create a new course
    pub async fn create(
        pool: &PgPool,
        title: &str,
        slug: &str,
        description: &str,
        difficulty: &str,
        tags: &[String],
        is_published: bool,
        requires_invite: bool,
        invite_code: Option<&str>,
        author_id: &Uuid,
    ) -> AppResult<Course> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (
                title, slug, description, difficulty, tags,
                is_published, requires_invite, invite_code, author_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(slug)
        .bind(description)
        .bind(difficulty)
        .bind(tags)
        .bind(is_published)
        .bind(requires_invite)
        .bind(invite_code)
        .bind(author_id)
        .fetch_one(pool)
        .await?;

        Ok(course)
    }

    /// Find course by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(r#"SELECT * FROM courses WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(course)
    }

    /// Find course by slug
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> AppResult<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(r#"SELECT * FROM courses WHERE slug = $1"#)
            .bind(slug)
            .fetch_optional(pool)
            .await?;

        Ok(course)
    }

    /// Update course
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        title: Option<&str>,
        description: Option<&str>,
        difficulty: Option<&str>,
        tags: Option<&[String]>,
        is_published: Option<bool>,
        requires_invite: Option<bool>,
        invite_code: Option<&str>,
    ) -> AppResult<Course> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                difficulty = COALESCE($4, difficulty),
                tags = COALESCE($5, tags),
                is_published = COALESCE($6, is_published),
                requires_invite = COALESCE($7, requires_invite),
                invite_code = COALESCE($8, invite_code),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(difficulty)
        .bind(tags)
        .bind(is_published)
        .bind(requires_invite)
        .bind(invite_code)
        .fetch_one(pool)
        .await?;

        Ok(course)
    }

    /// Persist a new rating average
    pub async fn update_rating(
        pool: &PgPool,
        id: &Uuid,
        rating: f64,
        rating_count: i64,
    ) -> AppResult<Course> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses
            SET rating = $2, rating_count = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(rating)
        .bind(rating_count)
        .fetch_one(pool)
        .await?;

        Ok(course)
    }

    /// Persist a new completion rate
    pub async fn update_completion_rate(
        pool: &PgPool,
        id: &Uuid,
        completion_rate: f64,
    ) -> AppResult<()> {
        sqlx::query(
            r#"UPDATE courses SET completion_rate = $2, updated_at = NOW() WHERE id = $1"#,
        )
        .bind(id)
        .bind(completion_rate)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Attach a problem set id to the course's app-side array (idempotent)
    pub async fn attach_problem_set(pool: &PgPool, id: &Uuid, set_id: &Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE courses
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

    /// Detach a problem set id from the course's app-side array
    pub async fn detach_problem_set(pool: &PgPool, id: &Uuid, set_id: &Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE courses
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

    /// Delete course
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM courses WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// List courses with pagination
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        search: Option<&str>,
        difficulty: Option<&str>,
        tag: Option<&str>,
        show_all: bool,
    ) -> AppResult<(Vec<Course>, i64)> {
        let search_pattern = search.map(|s| format!("%{}%", s));

        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT * FROM courses
            WHERE
                ($1 OR is_published = true)
                AND ($2::text IS NULL OR title ILIKE $2)
                AND ($3::text IS NULL OR difficulty = $3)
                AND ($4::text IS NULL OR $4 = ANY(tags))
            ORDER BY created_at DESC
            OFFSET $5 LIMIT $6
            "#,
        )
        .bind(show_all)
        .bind(&search_pattern)
        .bind(difficulty)
        .bind(tag)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM courses
            WHERE
                ($1 OR is_published = true)
                AND ($2::text IS NULL OR title ILIKE $2)
                AND ($3::text IS NULL OR difficulty = $3)
                AND ($4::text IS NULL OR $4 = ANY(tags))
            "#,
        )
        .bind(show_all)
        .bind(&search_pattern)
        .bind(difficulty)
        .bind(tag)
        .fetch_one(pool)
        .await?;

        Ok((courses, count))
    }

    /// Count total courses
    pub async fn count(pool: &PgPool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM courses"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

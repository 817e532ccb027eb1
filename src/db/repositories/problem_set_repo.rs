//! Problem set repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ProblemInstance, ProblemSet},
};

/// Repository for problem set and problem instance database operations
pub struct ProblemSetRepository;

impl ProblemSetRepository {
    /// Create a new problem set
    pub async fn create(
        pool: &PgPool,
        course_id: Option<&Uuid>,
        title: &str,
        description: &str,
        difficulty: &str,
        tags: &[String],
        is_published: bool,
        author_id: &Uuid,
    ) -> AppResult<ProblemSet> {
        let set = sqlx::query_as::<_, ProblemSet>(
            r#"
            INSERT INTO problem_sets (
                course_id, title, description, difficulty, tags, is_published, author_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(course_id)
        .bind(title)
        .bind(description)
        .bind(difficulty)
        .bind(tags)
        .bind(is_published)
        .bind(author_id)
        .fetch_one(pool)
        .await?;

        Ok(set)
    }

    /// Find problem set by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<ProblemSet>> {
        let set = sqlx::query_as::<_, ProblemSet>(r#"SELECT * FROM problem_sets WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(set)
    }

    /// Update problem set
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        title: Option<&str>,
        description: Option<&str>,
        difficulty: Option<&str>,
        tags: Option<&[String]>,
        is_published: Option<bool>,
        course_id: Option<&Uuid>,
    ) -> AppResult<ProblemSet> {
        let set = sqlx::query_as::<_, ProblemSet>(
            r#"
            UPDATE problem_sets
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                difficulty = COALESCE($4, difficulty),
                tags = COALESCE($5, tags),
                is_published = COALESCE($6, is_published),
                course_id = COALESCE($7, course_id),
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
        .bind(course_id)
        .fetch_one(pool)
        .await?;

        Ok(set)
    }

    /// Delete problem set
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM problem_sets WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// List problem sets with pagination
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        course_id: Option<&Uuid>,
        search: Option<&str>,
        difficulty: Option<&str>,
        show_all: bool,
    ) -> AppResult<(Vec<ProblemSet>, i64)> {
        let search_pattern = search.map(|s| format!("%{}%", s));

        let sets = sqlx::query_as::<_, ProblemSet>(
            r#"
            SELECT * FROM problem_sets
            WHERE
                ($1 OR is_published = true)
                AND ($2::uuid IS NULL OR course_id = $2)
                AND ($3::text IS NULL OR title ILIKE $3)
                AND ($4::text IS NULL OR difficulty = $4)
            ORDER BY created_at DESC
            OFFSET $5 LIMIT $6
            "#,
        )
        .bind(show_all)
        .bind(course_id)
        .bind(&search_pattern)
        .bind(difficulty)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM problem_sets
            WHERE
                ($1 OR is_published = true)
                AND ($2::uuid IS NULL OR course_id = $2)
                AND ($3::text IS NULL OR title ILIKE $3)
                AND ($4::text IS NULL OR difficulty = $4)
            "#,
        )
        .bind(show_all)
        .bind(course_id)
        .bind(&search_pattern)
        .bind(difficulty)
        .fetch_one(pool)
        .await?;

        Ok((sets, count))
    }

    /// Count total problem sets
    pub async fn count(pool: &PgPool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM problem_sets"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Problem instances
    // =========================================================================

    /// Append a problem instance at the given position
    pub async fn create_instance(
        pool: &PgPool,
        problem_set_id: &Uuid,
        source_problem_id: Option<&Uuid>,
        title: &str,
        statement: &str,
        points: i32,
        position: i32,
        sample_input: Option<&str>,
        expected_output: Option<&str>,
        time_limit_ms: i32,
        memory_limit_kb: i32,
    ) -> AppResult<ProblemInstance> {
        let instance = sqlx::query_as::<_, ProblemInstance>(
            r#"
            INSERT INTO problem_instances (
                problem_set_id, source_problem_id, title, statement, points,
                position, sample_input, expected_output, time_limit_ms, memory_limit_kb
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(problem_set_id)
        .bind(source_problem_id)
        .bind(title)
        .bind(statement)
        .bind(points)
        .bind(position)
        .bind(sample_input)
        .bind(expected_output)
        .bind(time_limit_ms)
        .bind(memory_limit_kb)
        .fetch_one(pool)
        .await?;

        Ok(instance)
    }

    /// Find a problem instance by ID
    pub async fn find_instance(pool: &PgPool, id: &Uuid) -> AppResult<Option<ProblemInstance>> {
        let instance = sqlx::query_as::<_, ProblemInstance>(
            r#"SELECT * FROM problem_instances WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(instance)
    }

    /// Get all instances of a set, ordered by position
    pub async fn list_instances(
        pool: &PgPool,
        problem_set_id: &Uuid,
    ) -> AppResult<Vec<ProblemInstance>> {
        let instances = sqlx::query_as::<_, ProblemInstance>(
            r#"SELECT * FROM problem_instances WHERE problem_set_id = $1 ORDER BY position"#,
        )
        .bind(problem_set_id)
        .fetch_all(pool)
        .await?;

        Ok(instances)
    }

    /// Next free position in a set (0 for an empty set)
    pub async fn next_position(pool: &PgPool, problem_set_id: &Uuid) -> AppResult<i32> {
        let max: Option<i32> = sqlx::query_scalar(
            r#"SELECT MAX(position) FROM problem_instances WHERE problem_set_id = $1"#,
        )
        .bind(problem_set_id)
        .fetch_one(pool)
        .await?;

        Ok(max.map(|m| m + 1).unwrap_or(0))
    }

    /// Update a problem instance
    pub async fn update_instance(
        pool: &PgPool,
        id: &Uuid,
        title: Option<&str>,
        statement: Option<&str>,
        points: Option<i32>,
        sample_input: Option<&str>,
        expected_output: Option<&str>,
        time_limit_ms: Option<i32>,
        memory_limit_kb: Option<i32>,
    ) -> AppResult<ProblemInstance> {
        let instance = sqlx::query_as::<_, ProblemInstance>(
            r#"
            UPDATE problem_instances
            SET
                title = COALESCE($2, title),
                statement = COALESCE($3, statement),
                points = COALESCE($4, points),
                sample_input = COALESCE($5, sample_input),
                expected_output = COALESCE($6, expected_output),
                time_limit_ms = COALESCE($7, time_limit_ms),
                memory_limit_kb = COALESCE($8, memory_limit_kb),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(statement)
        .bind(points)
        .bind(sample_input)
        .bind(expected_output)
        .bind(time_limit_ms)
        .bind(memory_limit_kb)
        .fetch_one(pool)
        .await?;

        Ok(instance)
    }

    /// Delete a problem instance and re-compact the remaining positions
    pub async fn delete_instance(pool: &PgPool, id: &Uuid, problem_set_id: &Uuid) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        sqlx::query(r#"DELETE FROM problem_instances WHERE id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Rewrite positions 0..n-1 keeping the current order
        sqlx::query(
            r#"
            UPDATE problem_instances p
            SET position = ranked.new_position
            FROM (
                SELECT id, ROW_NUMBER() OVER (ORDER BY position) - 1 AS new_position
                FROM problem_instances
                WHERE problem_set_id = $1
            ) ranked
            WHERE p.id = ranked.id AND p.position <> ranked.new_position
            "#,
        )
        .bind(problem_set_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Apply a full reorder: (id, position) pairs computed by the caller.
    ///
    /// All rewrites happen in one transaction; the deferred unique
    /// constraint on (problem_set_id, position) is checked at commit.
    pub async fn apply_reorder(
        pool: &PgPool,
        problem_set_id: &Uuid,
        moves: &[(Uuid, i32)],
    ) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        for (id, position) in moves {
            sqlx::query(
                r#"
                UPDATE problem_instances
                SET position = $3, updated_at = NOW()
                WHERE id = $1 AND problem_set_id = $2
                "#,
            )
            .bind(id)
            .bind(problem_set_id)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}

//! Course service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{enrollment_targets, roles},
    db::repositories::{CourseRepository, EnrollmentRepository, ProblemSetRepository, UserRepository},
    error::{AppError, AppResult},
    handlers::courses::{
        request::{CreateCourseRequest, ListCoursesQuery, UpdateCourseRequest},
        response::{CourseResponse, CourseSummary},
    },
    models::Course,
    utils::{crypto, validation},
};

/// Course service for business logic
pub struct CourseService;

impl CourseService {
    /// Create a new course
    pub async fn create_course(
        pool: &PgPool,
        author_id: &Uuid,
        payload: CreateCourseRequest,
    ) -> AppResult<CourseResponse> {
        validation::validate_slug(&payload.slug)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(difficulty) = payload.difficulty.as_deref() {
            validation::validate_difficulty(difficulty)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }

        let tags = payload.tags.unwrap_or_default();
        validation::validate_tags(&tags).map_err(|e| AppError::Validation(e.to_string()))?;

        if CourseRepository::find_by_slug(pool, &payload.slug).await?.is_some() {
            return Err(AppError::AlreadyExists("Course slug already in use".to_string()));
        }

        let requires_invite = payload.requires_invite.unwrap_or(false);
        let invite_code = requires_invite.then(crypto::generate_invite_code);

        let course = CourseRepository::create(
            pool,
            &payload.title,
            &payload.slug,
            payload.description.as_deref().unwrap_or(""),
            payload.difficulty.as_deref().unwrap_or("beginner"),
            &tags,
            payload.is_published.unwrap_or(false),
            requires_invite,
            invite_code.as_deref(),
            author_id,
        )
        .await?;

        Self::to_course_response(pool, course).await
    }

    /// Get course by ID
    pub async fn get_course(
        pool: &PgPool,
        id: &Uuid,
        requester_id: Option<&Uuid>,
        is_staff: bool,
    ) -> AppResult<CourseResponse> {
        let course = CourseRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if !course.is_accessible_by(requester_id, is_staff) {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        Self::to_course_response(pool, course).await
    }

    /// Update course
    pub async fn update_course(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        payload: UpdateCourseRequest,
    ) -> AppResult<CourseResponse> {
        let course = CourseRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        // Check permissions
        if course.author_id != *requester_id && requester_role != roles::ADMIN {
            return Err(AppError::Forbidden(
                "Cannot update other users' courses".to_string(),
            ));
        }

        if let Some(difficulty) = payload.difficulty.as_deref() {
            validation::validate_difficulty(difficulty)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }

        if let Some(tags) = payload.tags.as_deref() {
            validation::validate_tags(tags).map_err(|e| AppError::Validation(e.to_string()))?;
        }

        // Flipping a course to invite-only mints a code if it never had one
        let invite_code = match (payload.requires_invite, &course.invite_code) {
            (Some(true), None) => Some(crypto::generate_invite_code()),
            _ => None,
        };

        let updated = CourseRepository::update(
            pool,
            id,
            payload.title.as_deref(),
            payload.description.as_deref(),
            payload.difficulty.as_deref(),
            payload.tags.as_deref(),
            payload.is_published,
            payload.requires_invite,
            invite_code.as_deref(),
        )
        .await?;

        Self::to_course_response(pool, updated).await
    }

    /// Delete course
    pub async fn delete_course(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<()> {
        let course = CourseRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        // Check permissions
        if course.author_id != *requester_id && requester_role != roles::ADMIN {
            return Err(AppError::Forbidden(
                "Cannot delete other users' courses".to_string(),
            ));
        }

        CourseRepository::delete(pool, id).await
    }

    /// List courses
    pub async fn list_courses(
        pool: &PgPool,
        query: &ListCoursesQuery,
        page: u32,
        per_page: u32,
        show_all: bool,
    ) -> AppResult<(Vec<CourseSummary>, i64)> {
        let offset = ((page - 1) * per_page) as i64;
        let limit = per_page as i64;

        let (courses, total) = CourseRepository::list(
            pool,
            offset,
            limit,
            query.search.as_deref(),
            query.difficulty.as_deref(),
            query.tag.as_deref(),
            show_all,
        )
        .await?;

        let summaries = courses.into_iter().map(Self::to_course_summary).collect();

        Ok((summaries, total))
    }

    /// Rate a course (enrolled users only)
    pub async fn rate_course(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        rating: u8,
    ) -> AppResult<CourseResponse> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::Validation("Rating must be between 1 and 5".to_string()));
        }

        let course = CourseRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if !Self::is_enrolled(pool, requester_id, id).await? {
            return Err(AppError::Forbidden(
                "Only enrolled users can rate a course".to_string(),
            ));
        }

        let (new_rating, new_count) = course.apply_rating(rating);
        let updated = CourseRepository::update_rating(pool, id, new_rating, new_count).await?;

        Self::to_course_response(pool, updated).await
    }

    /// Attach a problem set to a course
    pub async fn attach_problem_set(
        pool: &PgPool,
        id: &Uuid,
        set_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<()> {
        let course = CourseRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if course.author_id != *requester_id && requester_role != roles::ADMIN {
            return Err(AppError::Forbidden(
                "Cannot modify other users' courses".to_string(),
            ));
        }

        ProblemSetRepository::find_by_id(pool, set_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem set not found".to_string()))?;

        CourseRepository::attach_problem_set(pool, id, set_id).await
    }

    /// Detach a problem set from a course
    pub async fn detach_problem_set(
        pool: &PgPool,
        id: &Uuid,
        set_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<()> {
        let course = CourseRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if course.author_id != *requester_id && requester_role != roles::ADMIN {
            return Err(AppError::Forbidden(
                "Cannot modify other users' courses".to_string(),
            ));
        }

        if !course.has_problem_set(set_id) {
            return Err(AppError::NotFound(
                "Problem set is not attached to this course".to_string(),
            ));
        }

        CourseRepository::detach_problem_set(pool, id, set_id).await
    }

    /// Check course enrollment through either tracking mechanism
    pub async fn is_enrolled(pool: &PgPool, user_id: &Uuid, course_id: &Uuid) -> AppResult<bool> {
        if let Some(enrollment) =
            EnrollmentRepository::find_for_target(pool, user_id, course_id, enrollment_targets::COURSE)
                .await?
        {
            if enrollment.grants_access() {
                return Ok(true);
            }
        }

        // Fall back to the legacy array
        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.has_legacy_enrollment(course_id))
    }

    // Helper functions
    async fn to_course_response(pool: &PgPool, course: Course) -> AppResult<CourseResponse> {
        let author: Option<String> =
            sqlx::query_scalar(r#"SELECT username FROM users WHERE id = $1"#)
                .bind(course.author_id)
                .fetch_optional(pool)
                .await?;

        let enrollment_count = EnrollmentRepository::count_for_target(
            pool,
            &course.id,
            enrollment_targets::COURSE,
        )
        .await?;

        Ok(CourseResponse {
            id: course.id,
            title: course.title,
            slug: course.slug,
            description: course.description,
            difficulty: course.difficulty,
            tags: course.tags,
            rating: course.rating,
            rating_count: course.rating_count,
            completion_rate: course.completion_rate,
            is_published: course.is_published,
            requires_invite: course.requires_invite,
            author_id: course.author_id,
            author_name: author.unwrap_or_default(),
            problem_set_ids: course.problem_set_ids,
            enrollment_count,
            created_at: course.created_at,
            updated_at: course.updated_at,
        })
    }

    fn to_course_summary(course: Course) -> CourseSummary {
        CourseSummary {
            id: course.id,
            title: course.title,
            slug: course.slug,
            difficulty: course.difficulty,
            tags: course.tags,
            rating: course.rating,
            completion_rate: course.completion_rate,
            is_published: course.is_published,
        }
    }
}

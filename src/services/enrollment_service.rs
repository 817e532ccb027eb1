//! Enrollment service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{enrollment_targets, roles},
    db::repositories::{CourseRepository, EnrollmentRepository, ProblemSetRepository},
    error::{AppError, AppResult},
    handlers::enrollments::request::{EnrollRequest, UpdateEnrollmentRequest},
    models::{Course, Enrollment},
    utils::validation,
};

/// Enrollment service for business logic
pub struct EnrollmentService;

impl EnrollmentService {
    /// Enroll the requesting user in a course or problem set.
    ///
    /// New enrollments are only written to the enrollments table; the
    /// legacy array on users is read-only compatibility data.
    pub async fn enroll(
        pool: &PgPool,
        user_id: &Uuid,
        payload: EnrollRequest,
    ) -> AppResult<Enrollment> {
        let target_kind = payload.target_kind.as_str();

        match target_kind {
            enrollment_targets::COURSE => {
                let course = CourseRepository::find_by_id(pool, &payload.target_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

                if !course.is_published {
                    return Err(AppError::NotFound("Course not found".to_string()));
                }

                Self::check_invite(&course, payload.invite_code.as_deref())?;
            }
            enrollment_targets::PROBLEM_SET => {
                let set = ProblemSetRepository::find_by_id(pool, &payload.target_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Problem set not found".to_string()))?;

                if !set.is_published {
                    return Err(AppError::NotFound("Problem set not found".to_string()));
                }
            }
            _ => {
                return Err(AppError::Validation("Invalid enrollment target kind".to_string()));
            }
        }

        if EnrollmentRepository::find_for_target(pool, user_id, &payload.target_id, target_kind)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists("Already enrolled".to_string()));
        }

        EnrollmentRepository::create(pool, user_id, &payload.target_id, target_kind).await
    }

    /// List enrollments, own by default; admins may inspect any user
    pub async fn list_enrollments(
        pool: &PgPool,
        requester_id: &Uuid,
        requester_role: &str,
        user_id: Option<&Uuid>,
    ) -> AppResult<Vec<Enrollment>> {
        let subject = match user_id {
            Some(id) if id != requester_id => {
                if requester_role != roles::ADMIN {
                    return Err(AppError::Forbidden(
                        "Cannot view other users' enrollments".to_string(),
                    ));
                }
                id
            }
            _ => requester_id,
        };

        EnrollmentRepository::list_for_user(pool, subject).await
    }

    /// Update the status of an enrollment
    pub async fn update_enrollment(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        payload: UpdateEnrollmentRequest,
    ) -> AppResult<Enrollment> {
        validation::validate_enrollment_status(&payload.status)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let enrollment = Self::find_owned(pool, id, requester_id, requester_role).await?;

        let updated =
            EnrollmentRepository::update_status(pool, &enrollment.id, &payload.status).await?;

        // Completions move the course completion rate
        if updated.target_kind == enrollment_targets::COURSE {
            Self::refresh_completion_rate(pool, &updated.target_id).await?;
        }

        Ok(updated)
    }

    /// Delete an enrollment
    pub async fn unenroll(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<()> {
        let enrollment = Self::find_owned(pool, id, requester_id, requester_role).await?;
        EnrollmentRepository::delete(pool, &enrollment.id).await
    }

    // Helper functions

    fn check_invite(course: &Course, invite_code: Option<&str>) -> AppResult<()> {
        if !course.requires_invite {
            return Ok(());
        }

        match (course.invite_code.as_deref(), invite_code) {
            (Some(expected), Some(given)) if expected == given => Ok(()),
            _ => Err(AppError::Forbidden(
                "A valid invite code is required for this course".to_string(),
            )),
        }
    }

    async fn find_owned(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<Enrollment> {
        let enrollment = EnrollmentRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;

        if enrollment.user_id != *requester_id && requester_role != roles::ADMIN {
            return Err(AppError::Forbidden(
                "Cannot modify other users' enrollments".to_string(),
            ));
        }

        Ok(enrollment)
    }

    async fn refresh_completion_rate(pool: &PgPool, course_id: &Uuid) -> AppResult<()> {
        let total =
            EnrollmentRepository::count_for_target(pool, course_id, enrollment_targets::COURSE)
                .await?;
        let completed = EnrollmentRepository::count_completed_for_target(
            pool,
            course_id,
            enrollment_targets::COURSE,
        )
        .await?;

        let rate = if total > 0 {
            Course::clamp_completion_rate(completed as f64 * 100.0 / total as f64)
        } else {
            0.0
        };

        CourseRepository::update_completion_rate(pool, course_id, rate).await
    }
}

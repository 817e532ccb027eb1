//! Admin service

use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{MAINTENANCE_FLAG_KEY, MAINTENANCE_MESSAGE_KEY},
    db::repositories::{
        ContestRepository, CourseRepository, EnrollmentRepository, ProblemSetRepository,
        SubmissionRepository, UserRepository,
    },
    error::{AppError, AppResult},
    handlers::admin::response::{MaintenanceResponse, PlatformStatsResponse},
    models::User,
    utils::validation,
};

/// Admin service for business logic
pub struct AdminService;

impl AdminService {
    /// Entity counts across the platform
    pub async fn platform_stats(pool: &PgPool) -> AppResult<PlatformStatsResponse> {
        let users = UserRepository::count(pool).await?;
        let courses = CourseRepository::count(pool).await?;
        let problem_sets = ProblemSetRepository::count(pool).await?;
        let enrollments = EnrollmentRepository::count(pool).await?;
        let submissions = SubmissionRepository::count(pool).await?;
        let contests = ContestRepository::count(pool).await?;

        Ok(PlatformStatsResponse {
            users,
            courses,
            problem_sets,
            enrollments,
            submissions,
            contests,
        })
    }

    /// Change a user's role
    pub async fn update_role(pool: &PgPool, user_id: &Uuid, role: &str) -> AppResult<User> {
        validation::validate_role(role).map_err(|e| AppError::Validation(e.to_string()))?;

        UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        UserRepository::update_role(pool, user_id, role).await
    }

    /// Ban a user
    pub async fn ban_user(
        pool: &PgPool,
        user_id: &Uuid,
        requester_id: &Uuid,
        reason: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<User> {
        if user_id == requester_id {
            return Err(AppError::Validation("Cannot ban yourself".to_string()));
        }

        UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        UserRepository::set_ban(pool, user_id, true, reason, expires_at).await
    }

    /// Lift a ban
    pub async fn unban_user(pool: &PgPool, user_id: &Uuid) -> AppResult<User> {
        UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        UserRepository::set_ban(pool, user_id, false, None, None).await
    }

    /// Read the maintenance flag
    pub async fn maintenance_status(mut redis: ConnectionManager) -> AppResult<MaintenanceResponse> {
        let enabled: Option<String> = redis.get(MAINTENANCE_FLAG_KEY).await?;
        let message: Option<String> = redis.get(MAINTENANCE_MESSAGE_KEY).await?;

        Ok(MaintenanceResponse {
            enabled: enabled.as_deref() == Some("1"),
            message,
        })
    }

    /// Set or clear the maintenance flag
    pub async fn set_maintenance(
        mut redis: ConnectionManager,
        enabled: bool,
        message: Option<&str>,
    ) -> AppResult<MaintenanceResponse> {
        if enabled {
            redis.set::<_, _, ()>(MAINTENANCE_FLAG_KEY, "1").await?;
            match message {
                Some(msg) => redis.set::<_, _, ()>(MAINTENANCE_MESSAGE_KEY, msg).await?,
                None => redis.del::<_, ()>(MAINTENANCE_MESSAGE_KEY).await?,
            }
        } else {
            redis.del::<_, ()>(MAINTENANCE_FLAG_KEY).await?;
            redis.del::<_, ()>(MAINTENANCE_MESSAGE_KEY).await?;
        }

        Ok(MaintenanceResponse {
            enabled,
            message: message.map(str::to_string),
        })
    }
}

//! User service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::roles,
    db::repositories::{EnrollmentRepository, UserRepository},
    error::{AppError, AppResult},
    handlers::users::{
        request::UpdateUserRequest,
        response::{UnifiedEnrollmentsResponse, UserResponse},
    },
    models::{unify_enrollments, User},
    services::AuthService,
    utils::validation,
};

/// User service for business logic
pub struct UserService;

impl UserService {
    /// List users (admin only, enforced by the handler)
    pub async fn list_users(
        pool: &PgPool,
        page: u32,
        per_page: u32,
    ) -> AppResult<(Vec<UserResponse>, i64)> {
        let offset = ((page - 1) * per_page) as i64;
        let limit = per_page as i64;

        let (users, total) = UserRepository::list(pool, offset, limit).await?;

        Ok((users.into_iter().map(Self::to_user_response).collect(), total))
    }

    /// Get user by ID
    pub async fn get_user(pool: &PgPool, id: &Uuid) -> AppResult<UserResponse> {
        let user = UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(Self::to_user_response(user))
    }

    /// Update a user's own profile (or any profile, for admins)
    pub async fn update_user(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        payload: UpdateUserRequest,
    ) -> AppResult<UserResponse> {
        if id != requester_id && requester_role != roles::ADMIN {
            return Err(AppError::Forbidden(
                "Cannot update other users' profiles".to_string(),
            ));
        }

        UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if let Some(email) = payload.email.as_deref() {
            validation::validate_email(email).map_err(|e| AppError::Validation(e.to_string()))?;
        }

        let password_hash = match payload.password.as_deref() {
            Some(password) => {
                validation::validate_password(password)
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                Some(AuthService::hash_password(password)?)
            }
            None => None,
        };

        let user = UserRepository::update(
            pool,
            id,
            payload.email.as_deref(),
            payload.display_name.as_deref(),
            password_hash.as_deref(),
        )
        .await?;

        Ok(Self::to_user_response(user))
    }

    /// Unified enrollment view for a user.
    ///
    /// This is the compatibility endpoint reconciling the two
    /// enrollment-tracking mechanisms: the legacy enrolled_course_ids
    /// array on the user record and the enrollments table.
    pub async fn get_unified_enrollments(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<UnifiedEnrollmentsResponse> {
        if id != requester_id && requester_role != roles::ADMIN {
            return Err(AppError::Forbidden(
                "Cannot view other users' enrollments".to_string(),
            ));
        }

        let user = UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let rows = EnrollmentRepository::list_for_user(pool, id).await?;
        let unified = unify_enrollments(&user.enrolled_course_ids, &rows);
        let total = unified.len() as i64;

        Ok(UnifiedEnrollmentsResponse {
            user_id: *id,
            enrollments: unified,
            total,
        })
    }

    fn to_user_response(user: User) -> UserResponse {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

//! Admin handler implementations

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::User,
    services::AdminService,
    state::AppState,
};

use super::{
    request::{BanUserRequest, SetMaintenanceRequest, UpdateRoleRequest},
    response::{AdminUserResponse, MaintenanceResponse, PlatformStatsResponse},
};

fn require_admin(auth_user: &AuthenticatedUser) -> AppResult<()> {
    if auth_user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}

fn to_admin_user(user: User) -> AdminUserResponse {
    AdminUserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        role: user.role,
        is_banned: user.is_banned,
        ban_reason: user.ban_reason,
        ban_expires_at: user.ban_expires_at,
        created_at: user.created_at,
    }
}

/// Platform entity counts
pub async fn platform_stats(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<PlatformStatsResponse>> {
    require_admin(&auth_user)?;

    let stats = AdminService::platform_stats(state.db()).await?;
    Ok(Json(stats))
}

/// Change a user's role
pub async fn update_role(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> AppResult<Json<AdminUserResponse>> {
    require_admin(&auth_user)?;

    let user = AdminService::update_role(state.db(), &id, &payload.role).await?;
    Ok(Json(to_admin_user(user)))
}

/// Ban a user
pub async fn ban_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<BanUserRequest>,
) -> AppResult<Json<AdminUserResponse>> {
    require_admin(&auth_user)?;

    let user = AdminService::ban_user(
        state.db(),
        &id,
        &auth_user.id,
        payload.reason.as_deref(),
        payload.expires_at,
    )
    .await?;

    Ok(Json(to_admin_user(user)))
}

/// Lift a user's ban
pub async fn unban_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AdminUserResponse>> {
    require_admin(&auth_user)?;

    let user = AdminService::unban_user(state.db(), &id).await?;
    Ok(Json(to_admin_user(user)))
}

/// Read the maintenance flag
pub async fn maintenance_status(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<MaintenanceResponse>> {
    require_admin(&auth_user)?;

    let status = AdminService::maintenance_status(state.redis()).await?;
    Ok(Json(status))
}

/// Set or clear the maintenance flag
pub async fn set_maintenance(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<SetMaintenanceRequest>,
) -> AppResult<Json<MaintenanceResponse>> {
    require_admin(&auth_user)?;

    let status = AdminService::set_maintenance(
        state.redis(),
        payload.enabled,
        payload.message.as_deref(),
    )
    .await?;

    Ok(Json(status))
}

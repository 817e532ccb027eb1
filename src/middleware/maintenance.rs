//! Maintenance-mode middleware
//!
//! When the maintenance flag is set in Redis, every request from a
//! non-admin gets a 503 JSON response. Health checks and login stay
//! reachable so operators can still authenticate and lift the flag.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;

use crate::{
    constants::MAINTENANCE_FLAG_KEY,
    error::AppError,
    middleware::auth::AuthenticatedUser,
    state::AppState,
};

/// Paths that must keep working during maintenance
fn is_exempt(path: &str) -> bool {
    path.ends_with("/health") || path.ends_with("/auth/login") || path.ends_with("/auth/refresh")
}

/// Maintenance-mode middleware
pub async fn maintenance_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path();

    if is_exempt(path) {
        return Ok(next.run(request).await);
    }

    // Admins bypass maintenance mode; auth middleware runs earlier on
    // protected routes, so the extension is present when available.
    let is_admin = request
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|u| u.is_admin())
        .unwrap_or(false);

    if !is_admin {
        let mut redis = state.redis();
        let enabled: Option<String> = redis.get(MAINTENANCE_FLAG_KEY).await.unwrap_or(None);

        if enabled.as_deref() == Some("1") {
            tracing::debug!(path = %path, "Request rejected: maintenance mode");
            return Err(AppError::Maintenance);
        }
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exempt_paths() {
        assert!(is_exempt("/api/v1/health"));
        assert!(is_exempt("/api/v1/auth/login"));
        assert!(is_exempt("/api/v1/auth/refresh"));
        assert!(!is_exempt("/api/v1/courses"));
        assert!(!is_exempt("/api/v1/auth/register"));
    }
}

//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod contests;
pub mod courses;
pub mod enrollments;
pub mod health;
pub mod problem_sets;
pub mod submissions;
pub mod users;

use axum::{http::StatusCode, middleware, Json, Router};

use crate::{
    error::{ErrorDetails, ErrorResponse},
    middleware::auth::auth_middleware,
    state::AppState,
};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes())
        .nest("/users", users::routes())
        .nest("/courses", courses::routes())
        .nest("/problem-sets", problem_sets::routes())
        .nest("/enrollments", enrollments::routes())
        .nest("/submissions", submissions::routes())
        .nest("/contests", contests::routes())
        .nest(
            "/admin",
            admin::routes()
                .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
        .fallback(api_fallback)
}

/// Catch-all JSON 404 for unmatched API paths
async fn api_fallback() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: ErrorDetails {
                code: "NOT_FOUND".to_string(),
                message: "The requested endpoint does not exist".to_string(),
                details: None,
            },
        }),
    )
}

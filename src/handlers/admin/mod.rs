//! Admin handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::state::AppState;

/// Admin routes (auth middleware is applied by the parent router)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(handler::platform_stats))
        .route("/users/{id}/role", patch(handler::update_role))
        .route("/users/{id}/ban", post(handler::ban_user))
        .route("/users/{id}/ban", delete(handler::unban_user))
        .route("/maintenance", get(handler::maintenance_status))
        .route("/maintenance", put(handler::set_maintenance))
}

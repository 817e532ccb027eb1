//! Contest management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::state::AppState;

/// Contest routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_contests))
        .route("/", post(handler::create_contest))
        .route("/{id}", get(handler::get_contest))
        .route("/{id}", patch(handler::update_contest))
        .route("/{id}", delete(handler::delete_contest))
        .route("/{id}/register", post(handler::register))
        .route("/{id}/register", delete(handler::unregister))
        .route("/{id}/participants", get(handler::list_participants))
        // App-side problem set attachment
        .route("/{id}/problem-sets/{set_id}", post(handler::attach_problem_set))
        .route("/{id}/problem-sets/{set_id}", delete(handler::detach_problem_set))
}

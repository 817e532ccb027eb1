//! Course management handlers

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

/// Course routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_courses))
        .route("/", post(handler::create_course))
        .route("/{id}", get(handler::get_course))
        .route("/{id}", patch(handler::update_course))
        .route("/{id}", delete(handler::delete_course))
        .route("/{id}/rating", post(handler::rate_course))
        // App-side problem set attachment
        .route("/{id}/problem-sets/{set_id}", post(handler::attach_problem_set))
        .route("/{id}/problem-sets/{set_id}", delete(handler::detach_problem_set))
}

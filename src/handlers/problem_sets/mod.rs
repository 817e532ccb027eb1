//! Problem set management handlers

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

/// Problem set routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_problem_sets))
        .route("/", post(handler::create_problem_set))
        .route("/{id}", get(handler::get_problem_set))
        .route("/{id}", patch(handler::update_problem_set))
        .route("/{id}", delete(handler::delete_problem_set))
        // Embedded problem instances
        .route("/{id}/problems", post(handler::add_problem))
        .route("/{id}/problems/{pid}", patch(handler::update_problem))
        .route("/{id}/problems/{pid}", delete(handler::remove_problem))
        .route("/{id}/reorder", post(handler::reorder_problems))
}

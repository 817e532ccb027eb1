//! Enrollment handlers

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

/// Enrollment routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::enroll))
        .route("/", get(handler::list_enrollments))
        .route("/{id}", patch(handler::update_enrollment))
        .route("/{id}", delete(handler::unenroll))
}

//! HTTP middleware

pub mod auth;
pub mod logging;
pub mod maintenance;
pub mod rate_limit;

pub use auth::{auth_middleware, AuthenticatedUser};
pub use logging::logging_middleware;
pub use maintenance::maintenance_middleware;
pub use rate_limit::rate_limit_middleware;

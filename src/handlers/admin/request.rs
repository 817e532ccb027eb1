//! Admin request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Update role request
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    /// New role (admin, instructor, student)
    pub role: String,
}

/// Ban user request
#[derive(Debug, Deserialize)]
pub struct BanUserRequest {
    pub reason: Option<String>,

    /// Omit for a permanent ban
    pub expires_at: Option<DateTime<Utc>>,
}

/// Set maintenance mode request
#[derive(Debug, Deserialize)]
pub struct SetMaintenanceRequest {
    pub enabled: bool,

    /// Optional operator message shown in the status endpoint
    pub message: Option<String>,
}

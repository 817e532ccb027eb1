//! User request DTOs

use serde::Deserialize;
use validator::Validate;

/// Update user profile request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 64))]
    pub display_name: Option<String>,

    pub password: Option<String>,
}

/// List users query parameters
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Query for a user's submissions
#[derive(Debug, Deserialize)]
pub struct UserSubmissionsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

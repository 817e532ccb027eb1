//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub role: String,
    /// Legacy enrollment tracking: course ids maintained application-side.
    /// The enrollments table supersedes this; readers must union both.
    pub enrolled_course_ids: Vec<Uuid>,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub ban_expires_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the user is currently banned
    pub fn is_currently_banned(&self) -> bool {
        if !self.is_banned {
            return false;
        }

        // Check if ban has expired
        if let Some(expires_at) = self.ban_expires_at {
            if expires_at < Utc::now() {
                return false;
            }
        }

        true
    }

    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    /// Check if user can author courses, problem sets, and contests
    pub fn can_manage_content(&self) -> bool {
        matches!(self.role.as_str(), "admin" | "instructor")
    }

    /// Check whether the legacy array records an enrollment in a course
    pub fn has_legacy_enrollment(&self, course_id: &Uuid) -> bool {
        self.enrolled_course_ids.contains(course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            display_name: None,
            role: "student".to_string(),
            enrolled_course_ids: vec![],
            is_banned: false,
            ban_reason: None,
            ban_expires_at: None,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_expired_ban_is_not_active() {
        let mut user = sample_user();
        user.is_banned = true;
        user.ban_expires_at = Some(Utc::now() - chrono::Duration::hours(1));
        assert!(!user.is_currently_banned());

        user.ban_expires_at = Some(Utc::now() + chrono::Duration::hours(1));
        assert!(user.is_currently_banned());

        // Permanent bans have no expiry
        user.ban_expires_at = None;
        assert!(user.is_currently_banned());
    }

    #[test]
    fn test_role_helpers() {
        let mut user = sample_user();
        assert!(!user.can_manage_content());

        user.role = "instructor".to_string();
        assert!(user.can_manage_content());
        assert!(!user.is_admin());

        user.role = "admin".to_string();
        assert!(user.is_admin());
        assert!(user.can_manage_content());
    }
}

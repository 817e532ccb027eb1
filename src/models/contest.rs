//! Contest model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Contest database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contest {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub organizer_id: Uuid,
    pub visibility: String,
    pub registration_mode: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub registration_start: Option<DateTime<Utc>>,
    pub registration_end: Option<DateTime<Utc>>,
    /// Problem set ids attached to this contest, maintained application-side.
    pub problem_set_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contest {
    /// Get current status of the contest
    pub fn status(&self) -> ContestStatus {
        let now = Utc::now();
        if now < self.start_time {
            ContestStatus::Upcoming
        } else if now >= self.start_time && now < self.end_time {
            ContestStatus::Ongoing
        } else {
            ContestStatus::Ended
        }
    }

    /// Check if registration is open
    pub fn is_registration_open(&self) -> bool {
        let now = Utc::now();

        // Check registration mode
        if self.registration_mode == "closed" {
            return false;
        }

        // Check registration time window
        if let Some(start) = self.registration_start {
            if now < start {
                return false;
            }
        }

        if let Some(end) = self.registration_end {
            if now > end {
                return false;
            }
        }

        // Can't register after contest ends
        if now > self.end_time {
            return false;
        }

        true
    }

    /// Check whether a problem set is attached to this contest
    pub fn has_problem_set(&self, set_id: &Uuid) -> bool {
        self.problem_set_ids.contains(set_id)
    }
}

/// Contest status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Upcoming,
    Ongoing,
    Ended,
}

impl std::fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Ongoing => write!(f, "ongoing"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// Contest participant model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ContestParticipant {
    pub id: Uuid,
    pub contest_id: Uuid,
    pub user_id: Uuid,
    pub registered_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn contest(start_offset_hours: i64, end_offset_hours: i64) -> Contest {
        let now = Utc::now();
        Contest {
            id: Uuid::new_v4(),
            title: "Weekly practice".to_string(),
            description: None,
            organizer_id: Uuid::new_v4(),
            visibility: "public".to_string(),
            registration_mode: "open".to_string(),
            start_time: now + Duration::hours(start_offset_hours),
            end_time: now + Duration::hours(end_offset_hours),
            registration_start: None,
            registration_end: None,
            problem_set_ids: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_transitions() {
        assert_eq!(contest(1, 2).status(), ContestStatus::Upcoming);
        assert_eq!(contest(-1, 1).status(), ContestStatus::Ongoing);
        assert_eq!(contest(-2, -1).status(), ContestStatus::Ended);
    }

    #[test]
    fn test_registration_window() {
        let mut c = contest(1, 2);
        assert!(c.is_registration_open());

        c.registration_mode = "closed".to_string();
        assert!(!c.is_registration_open());

        c.registration_mode = "open".to_string();
        c.registration_start = Some(Utc::now() + Duration::minutes(30));
        assert!(!c.is_registration_open());

        c.registration_start = Some(Utc::now() - Duration::minutes(30));
        c.registration_end = Some(Utc::now() - Duration::minutes(10));
        assert!(!c.is_registration_open());
    }

    #[test]
    fn test_registration_closes_after_end() {
        let c = contest(-3, -1);
        assert!(!c.is_registration_open());
    }
}

//! Course model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::{MAX_COMPLETION_RATE, MAX_COURSE_RATING, MIN_COMPLETION_RATE, MIN_COURSE_RATING};

/// Course database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub rating: f64,
    pub rating_count: i64,
    pub completion_rate: f64,
    pub is_published: bool,
    pub requires_invite: bool,
    #[serde(skip_serializing)]
    pub invite_code: Option<String>,
    pub author_id: Uuid,
    /// Problem set ids attached to this course, maintained application-side.
    pub problem_set_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Check whether a user may see this course
    pub fn is_accessible_by(&self, user_id: Option<&Uuid>, is_staff: bool) -> bool {
        if self.is_published || is_staff {
            return true;
        }
        user_id.map(|id| *id == self.author_id).unwrap_or(false)
    }

    /// Check whether a problem set is attached to this course
    pub fn has_problem_set(&self, set_id: &Uuid) -> bool {
        self.problem_set_ids.contains(set_id)
    }

    /// Fold a new rating into the running average.
    ///
    /// Returns the new (rating, rating_count) pair; the result is always
    /// inside the schema bounds regardless of input.
    pub fn apply_rating(&self, value: u8) -> (f64, i64) {
        let clamped = f64::from(value).clamp(MIN_COURSE_RATING, MAX_COURSE_RATING);
        let count = self.rating_count + 1;
        let total = self.rating * self.rating_count as f64 + clamped;
        let rating = (total / count as f64).clamp(MIN_COURSE_RATING, MAX_COURSE_RATING);
        (rating, count)
    }

    /// Clamp a completion-rate percentage to schema bounds
    pub fn clamp_completion_rate(value: f64) -> f64 {
        value.clamp(MIN_COMPLETION_RATE, MAX_COMPLETION_RATE)
    }
}

/// Course difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
            Self::Expert => write!(f, "expert"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_course() -> Course {
        Course {
            id: Uuid::new_v4(),
            title: "Rust fundamentals".to_string(),
            slug: "rust-fundamentals".to_string(),
            description: String::new(),
            difficulty: "beginner".to_string(),
            tags: vec![],
            rating: 0.0,
            rating_count: 0,
            completion_rate: 0.0,
            is_published: false,
            requires_invite: false,
            invite_code: None,
            author_id: Uuid::new_v4(),
            problem_set_ids: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_rating_running_average() {
        let mut course = sample_course();

        let (rating, count) = course.apply_rating(4);
        assert_eq!(rating, 4.0);
        assert_eq!(count, 1);

        course.rating = rating;
        course.rating_count = count;
        let (rating, count) = course.apply_rating(2);
        assert_eq!(rating, 3.0);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_apply_rating_stays_in_bounds() {
        let mut course = sample_course();
        course.rating = 5.0;
        course.rating_count = 10;

        // An out-of-range vote is clamped before averaging
        let (rating, _) = course.apply_rating(200);
        assert!(rating <= MAX_COURSE_RATING);
        assert!(rating >= MIN_COURSE_RATING);
    }

    #[test]
    fn test_clamp_completion_rate() {
        assert_eq!(Course::clamp_completion_rate(-3.0), 0.0);
        assert_eq!(Course::clamp_completion_rate(42.5), 42.5);
        assert_eq!(Course::clamp_completion_rate(150.0), 100.0);
    }

    #[test]
    fn test_accessibility() {
        let mut course = sample_course();
        let author = course.author_id;
        let other = Uuid::new_v4();

        assert!(!course.is_accessible_by(Some(&other), false));
        assert!(course.is_accessible_by(Some(&author), false));
        assert!(course.is_accessible_by(None, true));

        course.is_published = true;
        assert!(course.is_accessible_by(None, false));
    }
}

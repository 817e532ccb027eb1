//! Enrollment model and the legacy-array compatibility layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Enrollment database model (the current tracking mechanism)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_id: Uuid,
    pub target_kind: String,
    pub status: String,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    /// Check whether this enrollment currently grants access
    pub fn grants_access(&self) -> bool {
        matches!(self.status.as_str(), "active" | "completed")
    }
}

/// Enrollment target kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentTarget {
    Course,
    ProblemSet,
}

impl EnrollmentTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::ProblemSet => "problem_set",
        }
    }
}

impl std::fmt::Display for EnrollmentTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where an enrollment record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentSource {
    /// users.enrolled_course_ids array
    Legacy,
    /// enrollments table
    Enrollment,
}

/// One entry of the unified enrollment view
#[derive(Debug, Clone, Serialize)]
pub struct UnifiedEnrollment {
    pub target_id: Uuid,
    pub target_kind: String,
    pub source: EnrollmentSource,
    pub status: String,
    pub enrolled_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Union the two enrollment-tracking mechanisms.
///
/// Rows from the enrollments table win over legacy array entries for the
/// same course because they carry status and timestamps. Legacy entries
/// surface as `active` course enrollments with no timestamp. Order is
/// table rows first (as given), then remaining legacy entries in array
/// order.
pub fn unify_enrollments(
    legacy_course_ids: &[Uuid],
    enrollments: &[Enrollment],
) -> Vec<UnifiedEnrollment> {
    let mut unified: Vec<UnifiedEnrollment> = enrollments
        .iter()
        .map(|e| UnifiedEnrollment {
            target_id: e.target_id,
            target_kind: e.target_kind.clone(),
            source: EnrollmentSource::Enrollment,
            status: e.status.clone(),
            enrolled_at: Some(e.enrolled_at),
            completed_at: e.completed_at,
        })
        .collect();

    for course_id in legacy_course_ids {
        let covered = enrollments
            .iter()
            .any(|e| e.target_id == *course_id && e.target_kind == "course");
        if covered {
            continue;
        }
        unified.push(UnifiedEnrollment {
            target_id: *course_id,
            target_kind: "course".to_string(),
            source: EnrollmentSource::Legacy,
            status: "active".to_string(),
            enrolled_at: None,
            completed_at: None,
        });
    }

    unified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment(target_id: Uuid, kind: &str, status: &str) -> Enrollment {
        Enrollment {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            target_id,
            target_kind: kind.to_string(),
            status: status.to_string(),
            enrolled_at: Utc::now(),
            completed_at: None,
        }
    }

    #[test]
    fn test_union_legacy_only() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let unified = unify_enrollments(&[a, b], &[]);
        assert_eq!(unified.len(), 2);
        assert_eq!(unified[0].target_id, a);
        assert_eq!(unified[0].source, EnrollmentSource::Legacy);
        assert_eq!(unified[0].status, "active");
        assert!(unified[0].enrolled_at.is_none());
    }

    #[test]
    fn test_union_table_only() {
        let rows = vec![enrollment(Uuid::new_v4(), "course", "active")];
        let unified = unify_enrollments(&[], &rows);
        assert_eq!(unified.len(), 1);
        assert_eq!(unified[0].source, EnrollmentSource::Enrollment);
    }

    #[test]
    fn test_union_table_wins_on_overlap() {
        let shared = Uuid::new_v4();
        let legacy_only = Uuid::new_v4();
        let rows = vec![enrollment(shared, "course", "completed")];

        let unified = unify_enrollments(&[shared, legacy_only], &rows);
        assert_eq!(unified.len(), 2);

        // The overlapping course keeps the table row's status
        assert_eq!(unified[0].target_id, shared);
        assert_eq!(unified[0].status, "completed");
        assert_eq!(unified[0].source, EnrollmentSource::Enrollment);

        assert_eq!(unified[1].target_id, legacy_only);
        assert_eq!(unified[1].source, EnrollmentSource::Legacy);
    }

    #[test]
    fn test_union_problem_set_rows_never_mask_legacy_courses() {
        let shared = Uuid::new_v4();
        // Same id but a problem-set enrollment: the legacy course entry stays
        let rows = vec![enrollment(shared, "problem_set", "active")];

        let unified = unify_enrollments(&[shared], &rows);
        assert_eq!(unified.len(), 2);
        assert_eq!(unified[1].target_kind, "course");
        assert_eq!(unified[1].source, EnrollmentSource::Legacy);
    }

    #[test]
    fn test_grants_access() {
        let e = enrollment(Uuid::new_v4(), "course", "active");
        assert!(e.grants_access());

        let mut dropped = enrollment(Uuid::new_v4(), "course", "dropped");
        assert!(!dropped.grants_access());

        dropped.status = "completed".to_string();
        assert!(dropped.grants_access());
    }
}

//! Problem set and problem instance models

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Problem set database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProblemSet {
    pub id: Uuid,
    pub course_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProblemSet {
    /// Check whether a user may see this problem set
    pub fn is_accessible_by(&self, user_id: Option<&Uuid>, is_staff: bool) -> bool {
        if self.is_published || is_staff {
            return true;
        }
        user_id.map(|id| *id == self.author_id).unwrap_or(false)
    }
}

/// A customized copy of a problem embedded within a problem set
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProblemInstance {
    pub id: Uuid,
    pub problem_set_id: Uuid,
    /// Provenance of the copy; the source problem may no longer exist.
    pub source_problem_id: Option<Uuid>,
    pub title: String,
    pub statement: String,
    pub points: i32,
    /// 0-based dense order index within the set
    pub position: i32,
    pub sample_input: Option<String>,
    pub expected_output: Option<String>,
    pub time_limit_ms: i32,
    pub memory_limit_kb: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compute new dense positions for a full reorder of a set's instances.
///
/// `order` must be a permutation of the ids in `current`: same length, no
/// duplicates, no foreign ids. Returns (id, new_position) pairs with
/// positions 0..n-1 in the requested order.
pub fn reorder_positions(
    current: &[ProblemInstance],
    order: &[Uuid],
) -> Result<Vec<(Uuid, i32)>, ReorderError> {
    if order.len() != current.len() {
        return Err(ReorderError::LengthMismatch {
            expected: current.len(),
            got: order.len(),
        });
    }

    let known: HashSet<Uuid> = current.iter().map(|p| p.id).collect();
    let mut seen = HashSet::with_capacity(order.len());

    for id in order {
        if !known.contains(id) {
            return Err(ReorderError::UnknownInstance(*id));
        }
        if !seen.insert(*id) {
            return Err(ReorderError::DuplicateInstance(*id));
        }
    }

    Ok(order
        .iter()
        .enumerate()
        .map(|(idx, id)| (*id, idx as i32))
        .collect())
}

/// Reorder validation failures
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    #[error("Expected {expected} problem ids, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("Problem instance {0} does not belong to this set")]
    UnknownInstance(Uuid),

    #[error("Problem instance {0} appears more than once")]
    DuplicateInstance(Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(set_id: Uuid, position: i32) -> ProblemInstance {
        ProblemInstance {
            id: Uuid::new_v4(),
            problem_set_id: set_id,
            source_problem_id: None,
            title: format!("Problem {}", position),
            statement: String::new(),
            points: 100,
            position,
            sample_input: None,
            expected_output: None,
            time_limit_ms: 5000,
            memory_limit_kb: 128 * 1024,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_reorder_rewrites_dense_positions() {
        let set_id = Uuid::new_v4();
        let problems = vec![instance(set_id, 0), instance(set_id, 1), instance(set_id, 2)];

        let order = vec![problems[2].id, problems[0].id, problems[1].id];
        let moves = reorder_positions(&problems, &order).unwrap();

        assert_eq!(moves[0], (problems[2].id, 0));
        assert_eq!(moves[1], (problems[0].id, 1));
        assert_eq!(moves[2], (problems[1].id, 2));
    }

    #[test]
    fn test_reorder_rejects_missing_id() {
        let set_id = Uuid::new_v4();
        let problems = vec![instance(set_id, 0), instance(set_id, 1)];

        let order = vec![problems[0].id];
        assert_eq!(
            reorder_positions(&problems, &order),
            Err(ReorderError::LengthMismatch { expected: 2, got: 1 })
        );
    }

    #[test]
    fn test_reorder_rejects_foreign_id() {
        let set_id = Uuid::new_v4();
        let problems = vec![instance(set_id, 0), instance(set_id, 1)];

        let foreign = Uuid::new_v4();
        let order = vec![problems[0].id, foreign];
        assert_eq!(
            reorder_positions(&problems, &order),
            Err(ReorderError::UnknownInstance(foreign))
        );
    }

    #[test]
    fn test_reorder_rejects_duplicate_id() {
        let set_id = Uuid::new_v4();
        let problems = vec![instance(set_id, 0), instance(set_id, 1)];

        let order = vec![problems[0].id, problems[0].id];
        assert_eq!(
            reorder_positions(&problems, &order),
            Err(ReorderError::DuplicateInstance(problems[0].id))
        );
    }
}

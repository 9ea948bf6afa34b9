//! Presentation of engine decisions as task-to-name assignments.

use super::Recommendation;
use crate::tracker::domain::{FullName, TaskId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Label used when no employee qualifies for a task.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Recommended executor for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum RecommendedExecutor {
    /// The named employee is recommended.
    Employee(FullName),
    /// Nobody qualified. This is a normal outcome.
    Unassigned,
}

impl RecommendedExecutor {
    /// Returns the display label: the employee's full name or
    /// [`UNASSIGNED_LABEL`].
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Employee(name) => name.as_str(),
            Self::Unassigned => UNASSIGNED_LABEL,
        }
    }

    /// Returns `true` for the sentinel.
    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        matches!(self, Self::Unassigned)
    }
}

impl fmt::Display for RecommendedExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<RecommendedExecutor> for String {
    fn from(value: RecommendedExecutor) -> Self {
        match value {
            RecommendedExecutor::Employee(name) => name.into(),
            RecommendedExecutor::Unassigned => UNASSIGNED_LABEL.to_owned(),
        }
    }
}

/// Mapping from task identifier to recommended executor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AssignmentMap(BTreeMap<TaskId, RecommendedExecutor>);

impl AssignmentMap {
    /// Returns the recommendation for a task, if the task was considered.
    #[must_use]
    pub fn get(&self, task_id: TaskId) -> Option<&RecommendedExecutor> {
        self.0.get(&task_id)
    }

    /// Number of tasks in the mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no task was considered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over assignments in task identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &RecommendedExecutor)> {
        self.0.iter().map(|(id, executor)| (*id, executor))
    }

    /// Removes and returns the recommendation for a task.
    pub fn take(&mut self, task_id: TaskId) -> Option<RecommendedExecutor> {
        self.0.remove(&task_id)
    }
}

/// Maps each decision to the winner's full name or the sentinel.
#[must_use]
pub fn format_assignments(recommendations: &[Recommendation]) -> AssignmentMap {
    AssignmentMap(
        recommendations
            .iter()
            .map(|recommendation| {
                let executor = recommendation.executor.as_ref().map_or(
                    RecommendedExecutor::Unassigned,
                    |stat| RecommendedExecutor::Employee(stat.full_name().clone()),
                );
                (recommendation.task_id, executor)
            })
            .collect(),
    )
}

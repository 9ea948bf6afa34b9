//! Selection of tasks that need an executor recommendation.

use crate::tracker::domain::{EmployeeId, Task, TaskId, TaskName, TaskStatus};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// An open subtask whose parent is in progress.
///
/// Carries the parent's executor so the engine can apply the continuity
/// rule without another lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportantTask {
    id: TaskId,
    name: TaskName,
    period: DateTime<Utc>,
    parent_task: TaskId,
    parent_executor: Option<EmployeeId>,
}

impl ImportantTask {
    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the due-by timestamp.
    #[must_use]
    pub const fn period(&self) -> DateTime<Utc> {
        self.period
    }

    /// Returns the parent task identifier.
    #[must_use]
    pub const fn parent_task(&self) -> TaskId {
        self.parent_task
    }

    /// Returns the parent task's executor, if any.
    #[must_use]
    pub const fn parent_executor(&self) -> Option<EmployeeId> {
        self.parent_executor
    }
}

/// Returns `true` when `task` is open and `parent` is in progress.
#[must_use]
pub fn is_important(task: &Task, parent: &Task) -> bool {
    task.status() == TaskStatus::Open
        && task.parent_task() == Some(parent.id())
        && parent.status() == TaskStatus::InProgress
}

/// Returns the important tasks in `tasks`, ordered by task identifier.
///
/// A task whose parent is absent from `tasks` is not important.
#[must_use]
pub fn select_important_tasks(tasks: &[Task]) -> Vec<ImportantTask> {
    let by_id: HashMap<TaskId, &Task> = tasks.iter().map(|task| (task.id(), task)).collect();

    let mut selected: Vec<ImportantTask> = tasks
        .iter()
        .filter_map(|task| {
            let parent = by_id.get(&task.parent_task()?)?;
            is_important(task, parent).then(|| ImportantTask {
                id: task.id(),
                name: task.name().clone(),
                period: task.period(),
                parent_task: parent.id(),
                parent_executor: parent.executor(),
            })
        })
        .collect();
    selected.sort_by_key(ImportantTask::id);
    selected
}

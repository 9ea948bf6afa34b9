//! Task records and the parent/child forest rules.

use super::{EmployeeId, TaskId, TaskName, TaskStatus, TrackerDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A unit of work, optionally nested under a parent task and optionally
/// assigned to an executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: TaskName,
    description: Option<String>,
    parent_task: Option<TaskId>,
    executor: Option<EmployeeId>,
    period: DateTime<Utc>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated input for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task name.
    pub name: TaskName,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional parent task.
    pub parent_task: Option<TaskId>,
    /// Optional executor.
    pub executor: Option<EmployeeId>,
    /// Due-by timestamp.
    pub period: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted name.
    pub name: TaskName,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted parent task, if any.
    pub parent_task: Option<TaskId>,
    /// Persisted executor, if any.
    pub executor: Option<EmployeeId>,
    /// Persisted due-by timestamp.
    pub period: DateTime<Utc>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from a draft.
    ///
    /// The initial status is [`TaskStatus::ToDo`] when the draft names an
    /// executor and [`TaskStatus::Open`] otherwise.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let status = TaskStatus::initial(draft.executor.is_some());
        Self {
            id: TaskId::new(),
            name: draft.name,
            description: normalize_description(draft.description),
            parent_task: draft.parent_task,
            executor: draft.executor,
            period: draft.period,
            status,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            parent_task: data.parent_task,
            executor: data.executor,
            period: data.period,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

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

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the parent task identifier, if any.
    #[must_use]
    pub const fn parent_task(&self) -> Option<TaskId> {
        self.parent_task
    }

    /// Returns the executor identifier, if any.
    #[must_use]
    pub const fn executor(&self) -> Option<EmployeeId> {
        self.executor
    }

    /// Returns the due-by timestamp.
    #[must_use]
    pub const fn period(&self) -> DateTime<Utc> {
        self.period
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the task name.
    pub fn rename(&mut self, name: TaskName, clock: &impl Clock) {
        self.name = name;
        self.touch(clock);
    }

    /// Replaces the description. Blank descriptions are stored as `None`.
    pub fn describe(&mut self, description: Option<String>, clock: &impl Clock) {
        self.description = normalize_description(description);
        self.touch(clock);
    }

    /// Replaces the due-by timestamp.
    pub fn reschedule(&mut self, period: DateTime<Utc>, clock: &impl Clock) {
        self.period = period;
        self.touch(clock);
    }

    /// Sets an explicit status.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Replaces the executor.
    ///
    /// Returns `true` when the executor actually changed.
    pub fn assign(&mut self, executor: Option<EmployeeId>, clock: &impl Clock) -> bool {
        if self.executor == executor {
            return false;
        }
        self.executor = executor;
        self.touch(clock);
        true
    }

    /// Moves the task under a new parent, or detaches it with `None`.
    ///
    /// `parent_lineage` lists the requested parent followed by its ancestors,
    /// nearest first. The move is rejected when this task appears in that
    /// lineage.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::SelfParent`] when `parent` is this task,
    /// or [`TrackerDomainError::CyclicParent`] when `parent` is one of this
    /// task's descendants.
    pub fn reparent(
        &mut self,
        parent: Option<TaskId>,
        parent_lineage: &[TaskId],
        clock: &impl Clock,
    ) -> Result<(), TrackerDomainError> {
        if let Some(parent_id) = parent {
            if parent_id == self.id {
                return Err(TrackerDomainError::SelfParent(self.id));
            }
            if parent_lineage.contains(&self.id) {
                return Err(TrackerDomainError::CyclicParent {
                    task: self.id,
                    parent: parent_id,
                });
            }
        }
        self.parent_task = parent;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.trim().is_empty())
}

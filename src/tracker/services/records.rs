//! Service layer for creating, updating and removing tracker records.

use crate::tracker::{
    domain::{
        Employee, EmployeeId, FullName, ParseTaskStatusError, Position, Task, TaskDraft, TaskId,
        TaskName, TaskStatus, TrackerDomainError,
    },
    ports::{TrackerRepository, TrackerRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployeeRequest {
    full_name: String,
    position: String,
}

impl CreateEmployeeRequest {
    /// Creates a request with the required employee fields.
    #[must_use]
    pub fn new(full_name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            position: position.into(),
        }
    }
}

/// Request payload for a partial employee update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEmployeeRequest {
    id: EmployeeId,
    full_name: Option<String>,
    position: Option<String>,
}

impl UpdateEmployeeRequest {
    /// Creates an update for the given employee that changes nothing yet.
    #[must_use]
    pub const fn new(id: EmployeeId) -> Self {
        Self {
            id,
            full_name: None,
            position: None,
        }
    }

    /// Sets a new full name.
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Sets a new position.
    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    name: String,
    period: DateTime<Utc>,
    description: Option<String>,
    parent_task: Option<TaskId>,
    executor: Option<EmployeeId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(name: impl Into<String>, period: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            period,
            description: None,
            parent_task: None,
            executor: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Nests the task under a parent task.
    #[must_use]
    pub const fn with_parent_task(mut self, parent_task: TaskId) -> Self {
        self.parent_task = Some(parent_task);
        self
    }

    /// Assigns the task to an executor.
    #[must_use]
    pub const fn with_executor(mut self, executor: EmployeeId) -> Self {
        self.executor = Some(executor);
        self
    }
}

/// Request payload for a partial task update.
///
/// Fields left unset keep their stored value. Nullable references use a
/// nested `Option` so that `Some(None)` clears them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: TaskId,
    name: Option<String>,
    description: Option<Option<String>>,
    parent_task: Option<Option<TaskId>>,
    executor: Option<Option<EmployeeId>>,
    period: Option<DateTime<Utc>>,
    status: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an update for the given task that changes nothing yet.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            name: None,
            description: None,
            parent_task: None,
            executor: None,
            period: None,
            status: None,
        }
    }

    /// Sets a new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Moves the task under a parent, or detaches it with `None`.
    #[must_use]
    pub const fn with_parent_task(mut self, parent_task: Option<TaskId>) -> Self {
        self.parent_task = Some(parent_task);
        self
    }

    /// Reassigns or unassigns the executor.
    #[must_use]
    pub const fn with_executor(mut self, executor: Option<EmployeeId>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Sets a new due-by timestamp.
    #[must_use]
    pub const fn with_period(mut self, period: DateTime<Utc>) -> Self {
        self.period = Some(period);
        self
    }

    /// Sets an explicit status label, parsed case-insensitively.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Service-level errors for tracker record operations.
#[derive(Debug, Error)]
pub enum TrackerServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TrackerDomainError),
    /// The requested status label is not a known status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TrackerRepositoryError),
}

/// Result type for tracker service operations.
pub type TrackerServiceResult<T> = Result<T, TrackerServiceError>;

/// Record-keeping service for employees and tasks.
#[derive(Clone)]
pub struct TrackerService<R, C>
where
    R: TrackerRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TrackerService<R, C>
where
    R: TrackerRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new tracker service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and stores a new employee.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::Domain`] for an empty or overlong name
    /// or position, or [`TrackerServiceError::Repository`] when persistence
    /// fails.
    pub async fn create_employee(
        &self,
        request: CreateEmployeeRequest,
    ) -> TrackerServiceResult<Employee> {
        let full_name = FullName::new(request.full_name)?;
        let position = Position::new(request.position)?;
        let employee = Employee::new(full_name, position, &*self.clock);
        self.repository.store_employee(&employee).await?;
        tracing::info!(employee_id = %employee.id(), "employee created");
        Ok(employee)
    }

    /// Applies a partial update to an employee.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::EmployeeNotFound`] (wrapped) when the
    /// employee does not exist, or [`TrackerServiceError::Domain`] when a new
    /// value is invalid.
    pub async fn update_employee(
        &self,
        request: UpdateEmployeeRequest,
    ) -> TrackerServiceResult<Employee> {
        let UpdateEmployeeRequest {
            id,
            full_name,
            position,
        } = request;
        let mut employee = self.require_employee(id).await?;

        if let Some(name) = full_name {
            employee.rename(FullName::new(name)?, &*self.clock);
        }
        if let Some(title) = position {
            employee.reassign_position(Position::new(title)?, &*self.clock);
        }

        self.repository.update_employee(&employee).await?;
        Ok(employee)
    }

    /// Deletes an employee along with the tasks they execute.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::Repository`] when the employee does not
    /// exist or persistence fails.
    pub async fn delete_employee(&self, id: EmployeeId) -> TrackerServiceResult<()> {
        self.repository.delete_employee(id).await?;
        tracing::info!(employee_id = %id, "employee deleted with executed tasks");
        Ok(())
    }

    /// Returns all employees ordered by full name.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::Repository`] when persistence fails.
    pub async fn list_employees(&self) -> TrackerServiceResult<Vec<Employee>> {
        Ok(self.repository.list_employees().await?)
    }

    /// Finds an employee by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::Repository`] when persistence fails.
    pub async fn find_employee(&self, id: EmployeeId) -> TrackerServiceResult<Option<Employee>> {
        Ok(self.repository.find_employee(id).await?)
    }

    /// Creates and stores a new task.
    ///
    /// The task starts as `To Do` when an executor is given and as `Open`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::Domain`] for an invalid name, or a
    /// wrapped [`TrackerRepositoryError::MissingParentTask`] /
    /// [`TrackerRepositoryError::MissingExecutor`] when a reference does not
    /// resolve.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TrackerServiceResult<Task> {
        let CreateTaskRequest {
            name,
            period,
            description,
            parent_task,
            executor,
        } = request;

        let draft = TaskDraft {
            name: TaskName::new(name)?,
            description,
            parent_task,
            executor,
            period,
        };
        if let Some(parent_id) = parent_task {
            self.require_parent(parent_id).await?;
        }
        if let Some(executor_id) = executor {
            self.require_executor(executor_id).await?;
        }

        let task = Task::new(draft, &*self.clock);
        self.repository.store_task(&task).await?;
        tracing::info!(task_id = %task.id(), status = %task.status(), "task created");
        Ok(task)
    }

    /// Applies a partial update to a task.
    ///
    /// An explicit status in the request wins. Otherwise, when the executor
    /// changes, the status is reset to `To Do` (executor set) or `Open`
    /// (executor cleared).
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::InvalidStatus`] for an unknown status
    /// label, [`TrackerServiceError::Domain`] when the new parent would create
    /// a cycle, or [`TrackerServiceError::Repository`] when the task or a
    /// referenced record does not exist.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TrackerServiceResult<Task> {
        let UpdateTaskRequest {
            id,
            name,
            description,
            parent_task,
            executor,
            period,
            status,
        } = request;
        let explicit_status = status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?;
        let mut task = self.require_task(id).await?;
        let clock = &*self.clock;

        if let Some(new_name) = name {
            task.rename(TaskName::new(new_name)?, clock);
        }
        if let Some(new_description) = description {
            task.describe(new_description, clock);
        }
        if let Some(new_period) = period {
            task.reschedule(new_period, clock);
        }
        if let Some(new_parent) = parent_task {
            let lineage = match new_parent {
                Some(parent_id) => self.lineage_of(parent_id).await?,
                None => Vec::new(),
            };
            task.reparent(new_parent, &lineage, clock)?;
        }

        let executor_changed = match executor {
            Some(new_executor) => {
                if let Some(executor_id) = new_executor {
                    self.require_executor(executor_id).await?;
                }
                task.assign(new_executor, clock)
            }
            None => false,
        };

        match explicit_status {
            Some(new_status) => task.set_status(new_status, clock),
            None if executor_changed => {
                task.set_status(TaskStatus::initial(task.executor().is_some()), clock);
            }
            None => {}
        }

        self.repository.update_task(&task).await?;
        tracing::debug!(task_id = %task.id(), status = %task.status(), "task updated");
        Ok(task)
    }

    /// Deletes a task and all of its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::Repository`] when the task does not
    /// exist or persistence fails.
    pub async fn delete_task(&self, id: TaskId) -> TrackerServiceResult<()> {
        self.repository.delete_task(id).await?;
        tracing::info!(task_id = %id, "task deleted with descendants");
        Ok(())
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::Repository`] when persistence fails.
    pub async fn find_task(&self, id: TaskId) -> TrackerServiceResult<Option<Task>> {
        Ok(self.repository.find_task(id).await?)
    }

    /// Returns all tasks ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::Repository`] when persistence fails.
    pub async fn list_tasks(&self) -> TrackerServiceResult<Vec<Task>> {
        Ok(self.repository.list_tasks().await?)
    }

    async fn require_employee(&self, id: EmployeeId) -> TrackerServiceResult<Employee> {
        self.repository
            .find_employee(id)
            .await?
            .ok_or_else(|| TrackerRepositoryError::EmployeeNotFound(id).into())
    }

    async fn require_task(&self, id: TaskId) -> TrackerServiceResult<Task> {
        self.repository
            .find_task(id)
            .await?
            .ok_or_else(|| TrackerRepositoryError::TaskNotFound(id).into())
    }

    async fn require_parent(&self, id: TaskId) -> TrackerServiceResult<Task> {
        self.repository
            .find_task(id)
            .await?
            .ok_or_else(|| TrackerRepositoryError::MissingParentTask(id).into())
    }

    async fn require_executor(&self, id: EmployeeId) -> TrackerServiceResult<()> {
        self.repository
            .find_employee(id)
            .await?
            .map(drop)
            .ok_or_else(|| TrackerRepositoryError::MissingExecutor(id).into())
    }

    /// Returns `start` followed by its ancestors, nearest first.
    async fn lineage_of(&self, start: TaskId) -> TrackerServiceResult<Vec<TaskId>> {
        let mut lineage = vec![start];
        let mut visited = HashSet::from([start]);
        let mut current = self.require_parent(start).await?;

        while let Some(parent_id) = current.parent_task() {
            if !visited.insert(parent_id) {
                break;
            }
            lineage.push(parent_id);
            match self.repository.find_task(parent_id).await? {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Ok(lineage)
    }
}

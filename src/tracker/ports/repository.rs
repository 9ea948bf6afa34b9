//! Repository port for employee and task persistence.

use crate::tracker::domain::{Employee, EmployeeId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tracker repository operations.
pub type TrackerRepositoryResult<T> = Result<T, TrackerRepositoryError>;

/// Point-in-time view of every employee and task.
///
/// Employees are ordered by full name, then identifier. Tasks are ordered by
/// identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerSnapshot {
    /// All employees.
    pub employees: Vec<Employee>,
    /// All tasks.
    pub tasks: Vec<Task>,
}

/// Employee and task persistence contract.
///
/// Implementations enforce referential integrity: tasks may only reference
/// stored parents and executors, and deletions cascade.
#[async_trait]
pub trait TrackerRepository: Send + Sync {
    /// Stores a new employee.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::DuplicateEmployee`] when the
    /// identifier already exists.
    async fn store_employee(&self, employee: &Employee) -> TrackerRepositoryResult<()>;

    /// Persists changes to an existing employee.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::EmployeeNotFound`] when the employee
    /// does not exist.
    async fn update_employee(&self, employee: &Employee) -> TrackerRepositoryResult<()>;

    /// Deletes an employee together with every task they execute and those
    /// tasks' descendants.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::EmployeeNotFound`] when the employee
    /// does not exist.
    async fn delete_employee(&self, id: EmployeeId) -> TrackerRepositoryResult<()>;

    /// Finds an employee by identifier.
    async fn find_employee(&self, id: EmployeeId) -> TrackerRepositoryResult<Option<Employee>>;

    /// Returns all employees ordered by full name, then identifier.
    async fn list_employees(&self) -> TrackerRepositoryResult<Vec<Employee>>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::DuplicateTask`] when the identifier
    /// already exists, [`TrackerRepositoryError::MissingParentTask`] or
    /// [`TrackerRepositoryError::MissingExecutor`] when a reference does not
    /// resolve.
    async fn store_task(&self, task: &Task) -> TrackerRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::TaskNotFound`] when the task does not
    /// exist, or a missing-reference error as for [`Self::store_task`].
    async fn update_task(&self, task: &Task) -> TrackerRepositoryResult<()>;

    /// Deletes a task and all of its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn delete_task(&self, id: TaskId) -> TrackerRepositoryResult<()>;

    /// Finds a task by identifier.
    async fn find_task(&self, id: TaskId) -> TrackerRepositoryResult<Option<Task>>;

    /// Returns all tasks ordered by identifier.
    async fn list_tasks(&self) -> TrackerRepositoryResult<Vec<Task>>;

    /// Reads employees and tasks as one consistent snapshot.
    async fn snapshot(&self) -> TrackerRepositoryResult<TrackerSnapshot>;
}

/// Errors returned by tracker repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TrackerRepositoryError {
    /// An employee with the same identifier already exists.
    #[error("duplicate employee identifier: {0}")]
    DuplicateEmployee(EmployeeId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The employee was not found.
    #[error("employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The referenced parent task does not exist.
    #[error("parent task not found: {0}")]
    MissingParentTask(TaskId),

    /// The referenced executor does not exist.
    #[error("executor not found: {0}")]
    MissingExecutor(EmployeeId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TrackerRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

//! Service layer that runs the recommendation pipeline over a store snapshot.

use crate::recommendation::domain::{
    RecommendationPolicy, RecommendedExecutor, WorkloadStat, WorkloadSummary, aggregate_workload,
    format_assignments, recommend, select_important_tasks,
};
use crate::tracker::{
    domain::{EmployeeId, TaskId},
    ports::{TrackerRepository, TrackerRepositoryError},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// One important task with its recommended executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportantTaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Due-by timestamp.
    pub period: DateTime<Utc>,
    /// Recommended executor name or `Unassigned`.
    pub executor: RecommendedExecutor,
}

/// All important tasks, ordered by task identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImportantTaskReport {
    tasks: Vec<ImportantTaskView>,
}

impl ImportantTaskReport {
    /// Returns the task views.
    #[must_use]
    pub fn tasks(&self) -> &[ImportantTaskView] {
        &self.tasks
    }

    /// Returns `true` when no task is important.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Consumes the report, returning the task views.
    #[must_use]
    pub fn into_tasks(self) -> Vec<ImportantTaskView> {
        self.tasks
    }
}

/// An employee annotated with their live active task count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusyEmployee {
    /// Employee identifier.
    pub id: EmployeeId,
    /// Employee full name.
    pub full_name: String,
    /// Employee position.
    pub position: String,
    /// Number of tasks that are not closed.
    pub active_tasks_count: usize,
}

impl From<WorkloadStat> for BusyEmployee {
    fn from(stat: WorkloadStat) -> Self {
        Self {
            id: stat.employee_id(),
            full_name: stat.full_name().to_string(),
            position: stat.position().to_string(),
            active_tasks_count: stat.active_tasks(),
        }
    }
}

/// Errors raised while producing reports.
#[derive(Debug, Error)]
pub enum RecommendationServiceError {
    /// The snapshot could not be read.
    #[error(transparent)]
    Repository(#[from] TrackerRepositoryError),
}

/// Result type for recommendation service operations.
pub type RecommendationServiceResult<T> = Result<T, RecommendationServiceError>;

/// Read-only reporting service over the tracker store.
#[derive(Clone)]
pub struct RecommendationService<R>
where
    R: TrackerRepository,
{
    repository: Arc<R>,
    policy: RecommendationPolicy,
}

impl<R> RecommendationService<R>
where
    R: TrackerRepository,
{
    /// Creates a new recommendation service.
    #[must_use]
    pub const fn new(repository: Arc<R>, policy: RecommendationPolicy) -> Self {
        Self { repository, policy }
    }

    /// Returns the policy in use.
    #[must_use]
    pub const fn policy(&self) -> RecommendationPolicy {
        self.policy
    }

    /// Lists important tasks with a recommended executor for each.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendationServiceError::Repository`] when the snapshot
    /// cannot be read.
    pub async fn important_tasks(&self) -> RecommendationServiceResult<ImportantTaskReport> {
        let snapshot = self.repository.snapshot().await?;
        let workload = aggregate_workload(&snapshot.employees, &snapshot.tasks);
        let important = select_important_tasks(&snapshot.tasks);
        let decisions = recommend(&important, &workload, &self.policy);
        let mut assignments = format_assignments(&decisions);

        let tasks: Vec<ImportantTaskView> = important
            .into_iter()
            .map(|task| ImportantTaskView {
                id: task.id(),
                name: task.name().to_string(),
                period: task.period(),
                executor: assignments
                    .take(task.id())
                    .unwrap_or(RecommendedExecutor::Unassigned),
            })
            .collect();
        tracing::debug!(
            important = tasks.len(),
            minimum_workload = workload.minimum(),
            "computed executor recommendations"
        );
        Ok(ImportantTaskReport { tasks })
    }

    /// Lists employees by active task count, busiest first.
    ///
    /// Employees with equal counts keep full-name order.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendationServiceError::Repository`] when the snapshot
    /// cannot be read.
    pub async fn busy_employees(&self) -> RecommendationServiceResult<Vec<BusyEmployee>> {
        let mut stats = self.workload().await?.into_stats();
        stats.sort_by(|left, right| right.active_tasks().cmp(&left.active_tasks()));
        Ok(stats.into_iter().map(BusyEmployee::from).collect())
    }

    /// Computes workload statistics for every employee.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendationServiceError::Repository`] when the snapshot
    /// cannot be read.
    pub async fn workload(&self) -> RecommendationServiceResult<WorkloadSummary> {
        let snapshot = self.repository.snapshot().await?;
        Ok(aggregate_workload(&snapshot.employees, &snapshot.tasks))
    }
}

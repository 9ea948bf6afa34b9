//! Per-employee active task counts.

use crate::tracker::domain::{Employee, EmployeeId, FullName, Position, Task};
use serde::Serialize;
use std::collections::HashMap;

/// An employee paired with the number of their tasks that are not closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkloadStat {
    employee_id: EmployeeId,
    full_name: FullName,
    position: Position,
    active_tasks: usize,
}

impl WorkloadStat {
    /// Builds a statistic for one employee.
    #[must_use]
    pub fn new(employee: &Employee, active_tasks: usize) -> Self {
        Self {
            employee_id: employee.id(),
            full_name: employee.full_name().clone(),
            position: employee.position().clone(),
            active_tasks,
        }
    }

    /// Returns the employee identifier.
    #[must_use]
    pub const fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns the employee full name.
    #[must_use]
    pub const fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Returns the employee position.
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the number of active tasks.
    #[must_use]
    pub const fn active_tasks(&self) -> usize {
        self.active_tasks
    }
}

/// Workload statistics for a whole employee population.
///
/// `stats` keeps the order of the employees it was computed from, which is
/// the tie-break order for recommendations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkloadSummary {
    stats: Vec<WorkloadStat>,
    minimum: usize,
}

impl WorkloadSummary {
    /// Returns the per-employee statistics in input order.
    #[must_use]
    pub fn stats(&self) -> &[WorkloadStat] {
        &self.stats
    }

    /// Returns the smallest active task count, or 0 for no employees.
    #[must_use]
    pub const fn minimum(&self) -> usize {
        self.minimum
    }

    /// Returns `true` when there are no employees.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Returns the active task count for one employee.
    #[must_use]
    pub fn count_for(&self, employee_id: EmployeeId) -> Option<usize> {
        self.stats
            .iter()
            .find(|stat| stat.employee_id == employee_id)
            .map(WorkloadStat::active_tasks)
    }

    /// Consumes the summary, returning the statistics.
    #[must_use]
    pub fn into_stats(self) -> Vec<WorkloadStat> {
        self.stats
    }
}

/// Counts every employee's non-closed tasks and the population minimum.
///
/// Every employee gets exactly one entry, possibly with a count of 0. Tasks
/// whose executor is not among `employees` are ignored.
#[must_use]
pub fn aggregate_workload(employees: &[Employee], tasks: &[Task]) -> WorkloadSummary {
    let mut counts: HashMap<EmployeeId, usize> = HashMap::new();
    for task in tasks.iter().filter(|task| task.status().counts_as_active()) {
        if let Some(executor) = task.executor() {
            *counts.entry(executor).or_default() += 1;
        }
    }

    let stats: Vec<WorkloadStat> = employees
        .iter()
        .map(|employee| {
            let active = counts.get(&employee.id()).copied().unwrap_or_default();
            WorkloadStat::new(employee, active)
        })
        .collect();
    let minimum = stats
        .iter()
        .map(WorkloadStat::active_tasks)
        .min()
        .unwrap_or_default();

    WorkloadSummary { stats, minimum }
}

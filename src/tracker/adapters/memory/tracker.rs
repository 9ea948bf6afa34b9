//! Thread-safe in-memory repository for employees and tasks.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::tracker::{
    domain::{Employee, EmployeeId, Task, TaskId},
    ports::{TrackerRepository, TrackerRepositoryError, TrackerRepositoryResult, TrackerSnapshot},
};

/// Thread-safe in-memory tracker repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackerRepository {
    state: Arc<RwLock<InMemoryTrackerState>>,
}

#[derive(Debug, Default)]
pub(super) struct InMemoryTrackerState {
    employees: HashMap<EmployeeId, Employee>,
    tasks: BTreeMap<TaskId, Task>,
}

impl InMemoryTrackerRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> TrackerRepositoryResult<RwLockReadGuard<'_, InMemoryTrackerState>> {
        self.state.read().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    pub(super) fn write_state(
        &self,
    ) -> TrackerRepositoryResult<RwLockWriteGuard<'_, InMemoryTrackerState>> {
        self.state.write().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl InMemoryTrackerState {
    pub(super) fn insert_employee(&mut self, employee: &Employee) -> TrackerRepositoryResult<()> {
        if self.employees.contains_key(&employee.id()) {
            return Err(TrackerRepositoryError::DuplicateEmployee(employee.id()));
        }
        self.employees.insert(employee.id(), employee.clone());
        Ok(())
    }

    pub(super) fn insert_task(&mut self, task: &Task) -> TrackerRepositoryResult<()> {
        if self.tasks.contains_key(&task.id()) {
            return Err(TrackerRepositoryError::DuplicateTask(task.id()));
        }
        self.check_references(task)?;
        self.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    fn check_references(&self, task: &Task) -> TrackerRepositoryResult<()> {
        if let Some(parent_id) = task.parent_task() {
            if !self.tasks.contains_key(&parent_id) {
                return Err(TrackerRepositoryError::MissingParentTask(parent_id));
            }
        }
        if let Some(executor_id) = task.executor() {
            if !self.employees.contains_key(&executor_id) {
                return Err(TrackerRepositoryError::MissingExecutor(executor_id));
            }
        }
        Ok(())
    }

    fn sorted_employees(&self) -> Vec<Employee> {
        let mut employees: Vec<Employee> = self.employees.values().cloned().collect();
        employees.sort_by(|left, right| {
            left.full_name()
                .as_str()
                .cmp(right.full_name().as_str())
                .then_with(|| left.id().cmp(&right.id()))
        });
        employees
    }

    fn remove_with_descendants(&mut self, roots: BTreeSet<TaskId>) {
        for id in collect_descendants(&self.tasks, roots) {
            self.tasks.remove(&id);
        }
    }
}

/// Expands `roots` with every task that transitively has one of them as a
/// parent.
fn collect_descendants(tasks: &BTreeMap<TaskId, Task>, roots: BTreeSet<TaskId>) -> BTreeSet<TaskId> {
    let mut doomed = roots;
    loop {
        let before = doomed.len();
        let children: Vec<TaskId> = tasks
            .values()
            .filter(|task| {
                !doomed.contains(&task.id())
                    && task.parent_task().is_some_and(|parent| doomed.contains(&parent))
            })
            .map(Task::id)
            .collect();
        doomed.extend(children);
        if doomed.len() == before {
            return doomed;
        }
    }
}

#[async_trait]
impl TrackerRepository for InMemoryTrackerRepository {
    async fn store_employee(&self, employee: &Employee) -> TrackerRepositoryResult<()> {
        self.write_state()?.insert_employee(employee)
    }

    async fn update_employee(&self, employee: &Employee) -> TrackerRepositoryResult<()> {
        let mut state = self.write_state()?;
        let slot = state
            .employees
            .get_mut(&employee.id())
            .ok_or(TrackerRepositoryError::EmployeeNotFound(employee.id()))?;
        *slot = employee.clone();
        Ok(())
    }

    async fn delete_employee(&self, id: EmployeeId) -> TrackerRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.employees.remove(&id).is_none() {
            return Err(TrackerRepositoryError::EmployeeNotFound(id));
        }
        let executed: BTreeSet<TaskId> = state
            .tasks
            .values()
            .filter(|task| task.executor() == Some(id))
            .map(Task::id)
            .collect();
        state.remove_with_descendants(executed);
        Ok(())
    }

    async fn find_employee(&self, id: EmployeeId) -> TrackerRepositoryResult<Option<Employee>> {
        Ok(self.read_state()?.employees.get(&id).cloned())
    }

    async fn list_employees(&self) -> TrackerRepositoryResult<Vec<Employee>> {
        Ok(self.read_state()?.sorted_employees())
    }

    async fn store_task(&self, task: &Task) -> TrackerRepositoryResult<()> {
        self.write_state()?.insert_task(task)
    }

    async fn update_task(&self, task: &Task) -> TrackerRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TrackerRepositoryError::TaskNotFound(task.id()));
        }
        state.check_references(task)?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> TrackerRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&id) {
            return Err(TrackerRepositoryError::TaskNotFound(id));
        }
        state.remove_with_descendants(BTreeSet::from([id]));
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> TrackerRepositoryResult<Option<Task>> {
        Ok(self.read_state()?.tasks.get(&id).cloned())
    }

    async fn list_tasks(&self) -> TrackerRepositoryResult<Vec<Task>> {
        Ok(self.read_state()?.tasks.values().cloned().collect())
    }

    async fn snapshot(&self) -> TrackerRepositoryResult<TrackerSnapshot> {
        let state = self.read_state()?;
        Ok(TrackerSnapshot {
            employees: state.sorted_employees(),
            tasks: state.tasks.values().cloned().collect(),
        })
    }
}

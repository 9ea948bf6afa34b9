//! Builders shared by recommendation tests.

use crate::tracker::domain::{
    Employee, EmployeeId, FullName, PersistedTaskData, Position, Task, TaskId, TaskName,
    TaskStatus,
};
use chrono::{DateTime, TimeZone, Utc};
use mockable::DefaultClock;

pub fn due_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn employee(full_name: &str) -> Employee {
    Employee::new(
        FullName::new(full_name).expect("valid full name"),
        Position::new("Engineer").expect("valid position"),
        &DefaultClock,
    )
}

pub fn task(
    status: TaskStatus,
    parent_task: Option<TaskId>,
    executor: Option<EmployeeId>,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        name: TaskName::new("Work item").expect("valid task name"),
        description: None,
        parent_task,
        executor,
        period: due_date(),
        status,
        created_at: due_date(),
        updated_at: due_date(),
    })
}

/// Gives `employee` `count` tasks in progress.
pub fn load(tasks: &mut Vec<Task>, employee: &Employee, count: usize) {
    for _ in 0..count {
        tasks.push(task(TaskStatus::InProgress, None, Some(employee.id())));
    }
}

/// Adds an in-progress parent executed by `parent_executor` and an open
/// child, returning the child.
pub fn important_pair(tasks: &mut Vec<Task>, parent_executor: Option<EmployeeId>) -> Task {
    let parent = task(TaskStatus::InProgress, None, parent_executor);
    let child = task(TaskStatus::Open, Some(parent.id()), None);
    tasks.push(parent);
    tasks.push(child.clone());
    child
}

//! Given steps for executor recommendation BDD scenarios.

use super::world::{RecommendationWorld, run_async};
use chrono::{Duration, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasktrack::tracker::{
    domain::{EmployeeId, TaskId},
    services::{CreateEmployeeRequest, CreateTaskRequest, UpdateTaskRequest},
};

fn create_task(
    world: &RecommendationWorld,
    request: CreateTaskRequest,
    status: &str,
) -> Result<TaskId, eyre::Report> {
    let task = run_async(world.tracker.create_task(request)).wrap_err("create task")?;
    run_async(
        world
            .tracker
            .update_task(UpdateTaskRequest::new(task.id()).with_status(status)),
    )
    .wrap_err("set task status")?;
    Ok(task.id())
}

fn in_progress_parent(
    world: &mut RecommendationWorld,
    name: String,
    executor: Option<EmployeeId>,
) -> Result<(), eyre::Report> {
    let mut request = CreateTaskRequest::new(name.clone(), Utc::now() + Duration::days(7));
    if let Some(employee_id) = executor {
        request = request.with_executor(employee_id);
    }
    let id = create_task(world, request, "In Progress")?;
    world.tasks.insert(name, id);
    Ok(())
}

fn subtask(
    world: &mut RecommendationWorld,
    name: String,
    parent: &str,
    status: &str,
) -> Result<(), eyre::Report> {
    let parent_id = world.task(parent)?;
    let request = CreateTaskRequest::new(name.clone(), Utc::now() + Duration::days(3))
        .with_parent_task(parent_id);
    let id = create_task(world, request, status)?;
    world.tasks.insert(name, id);
    Ok(())
}

#[given(r#"an employee "{full_name}" carrying {count:usize} tasks in progress"#)]
fn employee_with_workload(
    world: &mut RecommendationWorld,
    full_name: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let employee = run_async(
        world
            .tracker
            .create_employee(CreateEmployeeRequest::new(full_name.clone(), "Engineer")),
    )
    .wrap_err("create employee")?;

    for index in 0..count {
        let request = CreateTaskRequest::new(
            format!("{full_name} background work {index}"),
            Utc::now() + Duration::days(1),
        )
        .with_executor(employee.id());
        create_task(world, request, "In Progress")?;
    }
    world.employees.insert(full_name, employee.id());
    Ok(())
}

#[given(r#"an in-progress parent task "{name}" executed by "{full_name}""#)]
fn parent_with_executor(
    world: &mut RecommendationWorld,
    name: String,
    full_name: String,
) -> Result<(), eyre::Report> {
    let executor = world.employee(&full_name)?;
    in_progress_parent(world, name, Some(executor))
}

#[given(r#"an in-progress parent task "{name}" without an executor"#)]
fn parent_without_executor(
    world: &mut RecommendationWorld,
    name: String,
) -> Result<(), eyre::Report> {
    in_progress_parent(world, name, None)
}

#[given(r#"an open subtask "{name}" of "{parent}""#)]
fn open_subtask(
    world: &mut RecommendationWorld,
    name: String,
    parent: String,
) -> Result<(), eyre::Report> {
    subtask(world, name, &parent, "Open")
}

#[given(r#"a closed subtask "{name}" of "{parent}""#)]
fn closed_subtask(
    world: &mut RecommendationWorld,
    name: String,
    parent: String,
) -> Result<(), eyre::Report> {
    subtask(world, name, &parent, "Closed")
}

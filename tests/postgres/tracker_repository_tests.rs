//! `PostgreSQL` tracker repository behaviour.

use crate::postgres::helpers::{TestSchema, employee, prepared_schema, task};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use tasktrack::recommendation::{domain::RecommendationPolicy, services::RecommendationService};
use tasktrack::tracker::{
    domain::{EmployeeId, FullName, Task, TaskId, TaskStatus},
    ports::{TrackerRepository, TrackerRepositoryError},
};
use std::sync::Arc;

#[fixture]
fn schema() -> TestSchema {
    prepared_schema().expect("schema setup")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL"]
async fn employee_round_trips(schema: TestSchema) {
    let ada = employee("Ada Lovelace");

    schema.repo.store_employee(&ada).await.expect("store");
    let found = schema.repo.find_employee(ada.id()).await.expect("find");

    assert_eq!(found, Some(ada));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL"]
async fn duplicate_employee_is_rejected(schema: TestSchema) {
    let ada = employee("Ada Lovelace");
    schema.repo.store_employee(&ada).await.expect("first store");

    let result = schema.repo.store_employee(&ada).await;

    assert!(matches!(
        result,
        Err(TrackerRepositoryError::DuplicateEmployee(id)) if id == ada.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL"]
async fn employee_update_is_persisted(schema: TestSchema) {
    let mut ada = employee("Ada Lovelace");
    schema.repo.store_employee(&ada).await.expect("store");

    ada.rename(FullName::new("Ada King").expect("valid name"), &DefaultClock);
    schema.repo.update_employee(&ada).await.expect("update");

    let found = schema
        .repo
        .find_employee(ada.id())
        .await
        .expect("find")
        .expect("employee exists");
    assert_eq!(found.full_name().as_str(), "Ada King");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL"]
async fn dangling_references_are_reported(schema: TestSchema) {
    let missing_executor = EmployeeId::new();
    let missing_parent = TaskId::new();

    let executor_result = schema
        .repo
        .store_task(&task("Ghost", TaskStatus::ToDo, None, Some(missing_executor)))
        .await;
    let parent_result = schema
        .repo
        .store_task(&task("Orphan", TaskStatus::Open, Some(missing_parent), None))
        .await;

    assert!(matches!(
        executor_result,
        Err(TrackerRepositoryError::MissingExecutor(id)) if id == missing_executor
    ));
    assert!(matches!(
        parent_result,
        Err(TrackerRepositoryError::MissingParentTask(id)) if id == missing_parent
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL"]
async fn task_update_persists_status_and_executor(schema: TestSchema) {
    let ada = employee("Ada Lovelace");
    schema.repo.store_employee(&ada).await.expect("store employee");
    let mut release = task("Release", TaskStatus::Open, None, None);
    schema.repo.store_task(&release).await.expect("store task");

    release.assign(Some(ada.id()), &DefaultClock);
    release.set_status(TaskStatus::InProgress, &DefaultClock);
    schema.repo.update_task(&release).await.expect("update task");

    let found = schema
        .repo
        .find_task(release.id())
        .await
        .expect("find")
        .expect("task exists");
    assert_eq!(found.status(), TaskStatus::InProgress);
    assert_eq!(found.executor(), Some(ada.id()));
    assert_eq!(found.description(), Some("Release details"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL"]
async fn missing_task_cannot_be_deleted(schema: TestSchema) {
    let missing = TaskId::new();

    let result = schema.repo.delete_task(missing).await;

    assert!(matches!(
        result,
        Err(TrackerRepositoryError::TaskNotFound(id)) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL"]
async fn deleting_employee_cascades_to_subtasks(schema: TestSchema) {
    let ada = employee("Ada Lovelace");
    schema.repo.store_employee(&ada).await.expect("store employee");
    let owned = task("Release", TaskStatus::InProgress, None, Some(ada.id()));
    let nested = task("Changelog", TaskStatus::Open, Some(owned.id()), None);
    let unrelated = task("Backlog", TaskStatus::Open, None, None);
    for record in [&owned, &nested, &unrelated] {
        schema.repo.store_task(record).await.expect("store task");
    }

    schema
        .repo
        .delete_employee(ada.id())
        .await
        .expect("delete employee");

    let remaining: Vec<TaskId> = schema
        .repo
        .list_tasks()
        .await
        .expect("list tasks")
        .iter()
        .map(Task::id)
        .collect();
    assert_eq!(remaining, vec![unrelated.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL"]
async fn snapshot_orders_employees_by_name(schema: TestSchema) {
    for name in ["Grace Hopper", "Ada Lovelace", "Brian Kernighan"] {
        schema
            .repo
            .store_employee(&employee(name))
            .await
            .expect("store employee");
    }

    let snapshot = schema.repo.snapshot().await.expect("snapshot");

    let names: Vec<&str> = snapshot
        .employees
        .iter()
        .map(|record| record.full_name().as_str())
        .collect();
    assert_eq!(names, vec!["Ada Lovelace", "Brian Kernighan", "Grace Hopper"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL"]
async fn snapshot_orders_names_bytewise(schema: TestSchema) {
    for name in ["ada", "Zed", "Ada"] {
        schema
            .repo
            .store_employee(&employee(name))
            .await
            .expect("store employee");
    }

    let snapshot = schema.repo.snapshot().await.expect("snapshot");

    let names: Vec<&str> = snapshot
        .employees
        .iter()
        .map(|record| record.full_name().as_str())
        .collect();
    assert_eq!(names, vec!["Ada", "Zed", "ada"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL"]
async fn recommendations_run_against_postgres(schema: TestSchema) {
    let ada = employee("Ada Lovelace");
    let grace = employee("Grace Hopper");
    schema.repo.store_employee(&ada).await.expect("store ada");
    schema.repo.store_employee(&grace).await.expect("store grace");
    let release = task("Release", TaskStatus::InProgress, None, Some(grace.id()));
    let changelog = task("Changelog", TaskStatus::Open, Some(release.id()), None);
    schema.repo.store_task(&release).await.expect("store parent");
    schema.repo.store_task(&changelog).await.expect("store child");

    let service = RecommendationService::new(
        Arc::new(schema.repo.clone()),
        RecommendationPolicy::default(),
    );
    let report = service.important_tasks().await.expect("report");

    let labels: Vec<(TaskId, String)> = report
        .tasks()
        .iter()
        .map(|view| (view.id, view.executor.to_string()))
        .collect();
    assert_eq!(labels, vec![(changelog.id(), "Ada Lovelace".to_owned())]);
}

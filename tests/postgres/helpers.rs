//! Shared test helpers for `PostgreSQL` integration tests.
//!
//! Each test gets its own schema in the database named by
//! [`cluster::database_url`], dropped when the [`TestSchema`] guard goes out
//! of scope.

pub use super::cluster::BoxError;
use super::cluster;
use chrono::{DateTime, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use tasktrack::tracker::{
    adapters::postgres::PostgresTrackerRepository,
    domain::{
        Employee, EmployeeId, FullName, PersistedEmployeeData, PersistedTaskData, Position, Task,
        TaskId, TaskName, TaskStatus,
    },
};
use uuid::Uuid;

/// SQL to create the tracker tables.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2025-08-01-000000_create_tracker_tables/up.sql");

#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// A throwaway schema holding the tracker tables, plus a repository bound to
/// it.
pub struct TestSchema {
    url: String,
    name: String,
    /// Repository whose connections resolve tables in this schema.
    pub repo: PostgresTrackerRepository,
}

impl Drop for TestSchema {
    fn drop(&mut self) {
        if let Ok(mut connection) = PgConnection::establish(&self.url) {
            let _ = connection.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.name));
        }
    }
}

/// Creates a fresh schema with migrations applied.
///
/// # Errors
///
/// Returns an error if no database is available or the migration fails.
pub fn prepared_schema() -> Result<TestSchema, BoxError> {
    let url = cluster::database_url()?;
    let name = format!("tasktrack_test_{}", Uuid::new_v4().simple());

    let mut connection = PgConnection::establish(&url)?;
    connection.batch_execute(&format!(
        "CREATE SCHEMA {name}; SET search_path TO {name}; {CREATE_SCHEMA_SQL}"
    ))?;

    let manager = ConnectionManager::<PgConnection>::new(url.as_str());
    let pool = Pool::builder()
        .max_size(2)
        .connection_customizer(Box::new(SearchPath(name.clone())))
        .build(manager)?;

    Ok(TestSchema {
        url,
        name,
        repo: PostgresTrackerRepository::new(pool),
    })
}

/// A timestamp with whole-second precision, which survives `TIMESTAMPTZ`
/// round trips unchanged.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Builds an employee with a fresh identifier.
pub fn employee(full_name: &str) -> Employee {
    Employee::from_persisted(PersistedEmployeeData {
        id: EmployeeId::new(),
        full_name: FullName::new(full_name).expect("valid full name"),
        position: Position::new("Engineer").expect("valid position"),
        created_at: fixed_time(),
        updated_at: fixed_time(),
    })
}

/// Builds a task with a fresh identifier.
pub fn task(
    name: &str,
    status: TaskStatus,
    parent_task: Option<TaskId>,
    executor: Option<EmployeeId>,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        name: TaskName::new(name).expect("valid task name"),
        description: Some(format!("{name} details")),
        parent_task,
        executor,
        period: fixed_time(),
        status,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    })
}

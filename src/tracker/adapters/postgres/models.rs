//! Diesel row models for employee and task persistence.

use super::schema::{employees, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for employee records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmployeeRow {
    /// Employee identifier.
    pub id: uuid::Uuid,
    /// Employee full name.
    pub full_name: String,
    /// Employee position.
    pub position: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for employee records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployeeRow {
    /// Employee identifier.
    pub id: uuid::Uuid,
    /// Employee full name.
    pub full_name: String,
    /// Employee position.
    pub position: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional parent task identifier.
    pub parent_task_id: Option<uuid::Uuid>,
    /// Optional executor identifier.
    pub executor_id: Option<uuid::Uuid>,
    /// Due-by timestamp.
    pub period: DateTime<Utc>,
    /// Status label.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional parent task identifier.
    pub parent_task_id: Option<uuid::Uuid>,
    /// Optional executor identifier.
    pub executor_id: Option<uuid::Uuid>,
    /// Due-by timestamp.
    pub period: DateTime<Utc>,
    /// Status label.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

//! JSON seed documents for pre-populating the in-memory store.
//!
//! A seed lists employees and tasks with explicit identifiers. Tasks are
//! stored in document order, so parents must appear before their children.
//!
//! ```json
//! {
//!   "employees": [
//!     { "id": "7f0c…", "full_name": "Ada Lovelace", "position": "Engineer" }
//!   ],
//!   "tasks": [
//!     {
//!       "id": "1b2e…",
//!       "name": "Release 1.0",
//!       "executor": "7f0c…",
//!       "period": "2025-09-01T09:00:00Z",
//!       "status": "In Progress"
//!     }
//!   ]
//! }
//! ```

use super::InMemoryTrackerRepository;
use crate::tracker::{
    domain::{
        Employee, EmployeeId, FullName, PersistedEmployeeData, PersistedTaskData, Position, Task,
        TaskId, TaskName, TaskStatus, TrackerDomainError,
    },
    ports::TrackerRepositoryError,
};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while loading a seed document.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Read {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The seed file is not a valid seed document.
    #[error("failed to parse seed document: {0}")]
    Parse(#[from] serde_json::Error),
    /// A seed record failed domain validation.
    #[error(transparent)]
    Domain(#[from] TrackerDomainError),
    /// A seed record violated referential integrity.
    #[error(transparent)]
    Repository(#[from] TrackerRepositoryError),
}

/// Top-level seed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedDocument {
    /// Employees to create.
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
    /// Tasks to create, parents first.
    #[serde(default)]
    pub tasks: Vec<SeedTask>,
}

/// Seed record for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedEmployee {
    /// Explicit employee identifier.
    pub id: Uuid,
    /// Employee full name.
    pub full_name: String,
    /// Employee position.
    pub position: String,
}

/// Seed record for a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedTask {
    /// Explicit task identifier.
    pub id: Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional parent task identifier.
    #[serde(default)]
    pub parent_task: Option<Uuid>,
    /// Optional executor identifier.
    #[serde(default)]
    pub executor: Option<Uuid>,
    /// Due-by timestamp.
    pub period: DateTime<Utc>,
    /// Status label. Defaults to the creation rule when omitted.
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Reads and parses a seed document from disk.
///
/// # Errors
///
/// Returns [`SeedError::Read`] when the file cannot be opened and
/// [`SeedError::Parse`] when it is not a valid seed document.
pub fn load_seed_file(path: &Utf8Path) -> Result<SeedDocument, SeedError> {
    let read_error = |source| SeedError::Read {
        path: path.to_string(),
        source,
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| read_error(std::io::Error::other("path must include a file name")))?;
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(file_name).map_err(read_error)?;
    Ok(serde_json::from_str(&contents)?)
}

impl InMemoryTrackerRepository {
    /// Builds a repository populated from a seed document.
    ///
    /// Every record is stamped with the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Domain`] for invalid names or positions and
    /// [`SeedError::Repository`] for duplicate identifiers or dangling
    /// references.
    pub fn from_seed(document: SeedDocument, clock: &impl Clock) -> Result<Self, SeedError> {
        let repository = Self::new();
        let timestamp = clock.utc();
        {
            let mut state = repository.write_state()?;
            for record in document.employees {
                let employee = Employee::from_persisted(PersistedEmployeeData {
                    id: EmployeeId::from_uuid(record.id),
                    full_name: FullName::new(record.full_name)?,
                    position: Position::new(record.position)?,
                    created_at: timestamp,
                    updated_at: timestamp,
                });
                state.insert_employee(&employee)?;
            }
            for record in document.tasks {
                let status = record
                    .status
                    .unwrap_or_else(|| TaskStatus::initial(record.executor.is_some()));
                let task = Task::from_persisted(PersistedTaskData {
                    id: TaskId::from_uuid(record.id),
                    name: TaskName::new(record.name)?,
                    description: record.description,
                    parent_task: record.parent_task.map(TaskId::from_uuid),
                    executor: record.executor.map(EmployeeId::from_uuid),
                    period: record.period,
                    status,
                    created_at: timestamp,
                    updated_at: timestamp,
                });
                state.insert_task(&task)?;
            }
        }
        tracing::info!("in-memory tracker store seeded");
        Ok(repository)
    }
}

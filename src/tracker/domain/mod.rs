//! Domain model for employees and tasks.
//!
//! Records are validated on construction and reconstructed from storage
//! through explicit parameter objects, keeping infrastructure concerns
//! outside of the domain boundary.

mod employee;
mod error;
mod ids;
mod status;
mod task;
mod text;

pub use employee::{Employee, PersistedEmployeeData};
pub use error::{ParseTaskStatusError, TrackerDomainError};
pub use ids::{EmployeeId, TaskId};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskDraft};
pub use text::{FullName, Position, TaskName};

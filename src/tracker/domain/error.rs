//! Error types for tracker domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating tracker records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerDomainError {
    /// The employee full name is empty after trimming.
    #[error("employee full name must not be empty")]
    EmptyFullName,

    /// The employee position is empty after trimming.
    #[error("employee position must not be empty")]
    EmptyPosition,

    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// A text field exceeds its storage limit.
    #[error("{field} exceeds {max} characters")]
    TextTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// A task was made its own parent.
    #[error("task {0} cannot be its own parent")]
    SelfParent(TaskId),

    /// Re-parenting would close a cycle in the task forest.
    #[error("setting parent {parent} on task {task} would create a cycle")]
    CyclicParent {
        /// Task being re-parented.
        task: TaskId,
        /// Requested parent, which is a descendant of `task`.
        parent: TaskId,
    },
}

/// Error returned while parsing task statuses from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

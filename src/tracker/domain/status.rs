//! Task status values.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a task, drawn from a fixed ordered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum TaskStatus {
    /// Task exists but nobody has picked it up.
    Open,
    /// Task has an executor and is queued.
    ToDo,
    /// Task is being worked on.
    InProgress,
    /// Task work is finished.
    Done,
    /// Finished task that needs more work.
    Reopened,
    /// Task is closed and no longer counts towards anyone's workload.
    Closed,
}

impl TaskStatus {
    /// All statuses in their canonical order.
    pub const ALL: [Self; 6] = [
        Self::Open,
        Self::ToDo,
        Self::InProgress,
        Self::Done,
        Self::Reopened,
        Self::Closed,
    ];

    /// Returns the canonical label, which is also the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
            Self::Reopened => "Reopened",
            Self::Closed => "Closed",
        }
    }

    /// Returns `true` for the only terminal status, [`TaskStatus::Closed`].
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns `true` when a task in this status counts as active workload.
    #[must_use]
    pub const fn counts_as_active(self) -> bool {
        !self.is_terminal()
    }

    /// Initial status for a task depending on whether it has an executor.
    #[must_use]
    pub const fn initial(has_executor: bool) -> Self {
        if has_executor { Self::ToDo } else { Self::Open }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TaskStatus> for &'static str {
    fn from(value: TaskStatus) -> Self {
        value.as_str()
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ParseTaskStatusError(value.to_owned()))
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

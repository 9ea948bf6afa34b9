//! Employee records.

use super::{EmployeeId, FullName, Position};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// An employee who can execute tasks.
///
/// Employees carry no workload field; workload is derived per request from
/// the tasks that name the employee as executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    full_name: FullName,
    position: Position,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEmployeeData {
    /// Persisted employee identifier.
    pub id: EmployeeId,
    /// Persisted full name.
    pub full_name: FullName,
    /// Persisted position.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Creates a new employee with a fresh identifier.
    #[must_use]
    pub fn new(full_name: FullName, position: Position, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: EmployeeId::new(),
            full_name,
            position,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an employee from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEmployeeData) -> Self {
        Self {
            id: data.id,
            full_name: data.full_name,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the employee identifier.
    #[must_use]
    pub const fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the employee full name.
    #[must_use]
    pub const fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Returns the employee position.
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the full name.
    pub fn rename(&mut self, full_name: FullName, clock: &impl Clock) {
        self.full_name = full_name;
        self.updated_at = clock.utc();
    }

    /// Replaces the position.
    pub fn reassign_position(&mut self, position: Position, clock: &impl Clock) {
        self.position = position;
        self.updated_at = clock.utc();
    }
}

//! Port contracts for employee and task storage.
//!
//! Ports define infrastructure-agnostic interfaces used by tracker and
//! recommendation services.

pub mod repository;

pub use repository::{
    TrackerRepository, TrackerRepositoryError, TrackerRepositoryResult, TrackerSnapshot,
};

//! Employee and task records for tasktrack.
//!
//! This module owns the record-keeping side of the system: employees, tasks
//! arranged in a parent/child forest, and the store that hands consistent
//! snapshots to the recommendation core. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

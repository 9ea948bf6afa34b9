//! Tasktrack: employee and task tracking with executor recommendations.
//!
//! The crate keeps records of employees and tasks (which may nest under a
//! parent task) and recommends an executor for every open subtask whose
//! parent is in progress, based on each employee's live workload.
//!
//! # Architecture
//!
//! Tasktrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`tracker`]: Employee and task records, storage ports and adapters
//! - [`recommendation`]: Workload aggregation and executor recommendation
//! - [`api`]: HTTP routes over the recommendation reports
//! - [`config`]: Environment-driven server configuration

pub mod api;
pub mod config;
pub mod recommendation;
pub mod tracker;

//! Executor recommendations for important tasks.
//!
//! The context is a pure read-compute-map pipeline over one tracker
//! snapshot:
//!
//! - [`domain::aggregate_workload`] counts each employee's active tasks
//! - [`domain::select_important_tasks`] picks open subtasks of in-progress
//!   parents
//! - [`domain::recommend`] ranks candidate executors per task
//! - [`domain::format_assignments`] maps each decision to a name or the
//!   `Unassigned` sentinel
//!
//! [`services::RecommendationService`] loads the snapshot from a
//! [`crate::tracker::ports::TrackerRepository`] and runs the pipeline.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;

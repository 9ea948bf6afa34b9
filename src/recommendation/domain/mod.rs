//! Domain model for workload statistics and executor recommendations.

mod assignment;
mod engine;
mod policy;
mod selector;
mod workload;

pub use assignment::{AssignmentMap, RecommendedExecutor, UNASSIGNED_LABEL, format_assignments};
pub use engine::{Candidate, CandidatePriority, Recommendation, candidates_for, recommend};
pub use policy::{DEFAULT_PARENT_TOLERANCE, RecommendationPolicy};
pub use selector::{ImportantTask, is_important, select_important_tasks};
pub use workload::{WorkloadStat, WorkloadSummary, aggregate_workload};

//! Two-tier candidate ranking for important tasks.

use super::{ImportantTask, RecommendationPolicy, WorkloadStat, WorkloadSummary};
use crate::tracker::domain::TaskId;

/// Why an employee is a candidate for a task. Lower ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CandidatePriority {
    /// The employee carries the minimum workload.
    LeastLoaded = 1,
    /// The employee executes the parent task and is within the tolerance
    /// band.
    ParentExecutor = 2,
}

/// One employee considered for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Workload statistic of the candidate.
    pub stat: &'a WorkloadStat,
    /// Tier the candidate qualified under.
    pub priority: CandidatePriority,
}

impl Candidate<'_> {
    const fn rank(&self) -> (CandidatePriority, usize) {
        (self.priority, self.stat.active_tasks())
    }
}

/// The engine's decision for one important task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    /// Task the decision applies to.
    pub task_id: TaskId,
    /// Winning employee, or `None` when nobody qualified.
    pub executor: Option<WorkloadStat>,
}

/// Lists every employee who qualifies for `task`, in workload order.
///
/// An employee at the minimum workload is a [`CandidatePriority::LeastLoaded`]
/// candidate even if they also execute the parent. The parent's executor
/// qualifies as [`CandidatePriority::ParentExecutor`] when their count is at
/// most the minimum plus the policy tolerance.
#[must_use]
pub fn candidates_for<'a>(
    task: &ImportantTask,
    workload: &'a WorkloadSummary,
    policy: &RecommendationPolicy,
) -> Vec<Candidate<'a>> {
    let minimum = workload.minimum();
    let ceiling = policy.tolerance_ceiling(minimum);

    workload
        .stats()
        .iter()
        .filter_map(|stat| {
            let count = stat.active_tasks();
            let priority = if count == minimum {
                CandidatePriority::LeastLoaded
            } else if task.parent_executor() == Some(stat.employee_id()) && count <= ceiling {
                CandidatePriority::ParentExecutor
            } else {
                return None;
            };
            Some(Candidate { stat, priority })
        })
        .collect()
}

/// Picks the best executor for each important task.
///
/// Candidates are stably sorted by priority, then active count, so ties go
/// to the employee listed first in `workload`.
#[must_use]
pub fn recommend(
    tasks: &[ImportantTask],
    workload: &WorkloadSummary,
    policy: &RecommendationPolicy,
) -> Vec<Recommendation> {
    tasks
        .iter()
        .map(|task| {
            let mut candidates = candidates_for(task, workload, policy);
            candidates.sort_by_key(Candidate::rank);
            Recommendation {
                task_id: task.id(),
                executor: candidates.first().map(|winner| winner.stat.clone()),
            }
        })
        .collect()
}

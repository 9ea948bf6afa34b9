//! Shared world state for executor recommendation BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasktrack::recommendation::{
    domain::RecommendationPolicy,
    services::{
        BusyEmployee, ImportantTaskReport, RecommendationService, RecommendationServiceError,
    },
};
use tasktrack::tracker::{
    adapters::memory::InMemoryTrackerRepository,
    domain::{EmployeeId, TaskId},
    services::TrackerService,
};

/// Record-keeping service used to arrange scenarios.
pub type TestTrackerService = TrackerService<InMemoryTrackerRepository, DefaultClock>;

/// Scenario world for recommendation behaviour tests.
pub struct RecommendationWorld {
    pub tracker: TestTrackerService,
    pub recommendations: RecommendationService<InMemoryTrackerRepository>,
    pub employees: HashMap<String, EmployeeId>,
    pub tasks: HashMap<String, TaskId>,
    pub last_report: Option<Result<ImportantTaskReport, RecommendationServiceError>>,
    pub last_ranking: Option<Result<Vec<BusyEmployee>, RecommendationServiceError>>,
}

impl RecommendationWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTrackerRepository::new());
        Self {
            tracker: TrackerService::new(Arc::clone(&repository), Arc::new(DefaultClock)),
            recommendations: RecommendationService::new(
                repository,
                RecommendationPolicy::default(),
            ),
            employees: HashMap::new(),
            tasks: HashMap::new(),
            last_report: None,
            last_ranking: None,
        }
    }

    /// Resolves an employee created earlier in the scenario.
    pub fn employee(&self, full_name: &str) -> Result<EmployeeId, eyre::Report> {
        self.employees
            .get(full_name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown employee {full_name:?} in scenario world"))
    }

    /// Resolves a task created earlier in the scenario.
    pub fn task(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown task {name:?} in scenario world"))
    }
}

impl Default for RecommendationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RecommendationWorld {
    RecommendationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

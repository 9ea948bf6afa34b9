//! Shared test helpers for in-memory integration tests.

use camino::Utf8PathBuf;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use tasktrack::recommendation::{domain::RecommendationPolicy, services::RecommendationService};
use tasktrack::tracker::{
    adapters::memory::{InMemoryTrackerRepository, load_seed_file},
    services::TrackerService,
};

/// Tracker service over the in-memory store.
pub type MemoryTrackerService = TrackerService<InMemoryTrackerRepository, DefaultClock>;

/// Recommendation service over the in-memory store.
pub type MemoryRecommendationService = RecommendationService<InMemoryTrackerRepository>;

/// Both services sharing one store.
pub struct Services {
    /// Record-keeping service.
    pub tracker: MemoryTrackerService,
    /// Reporting service.
    pub reports: MemoryRecommendationService,
}

fn services_over(repository: InMemoryTrackerRepository) -> Services {
    let shared = Arc::new(repository);
    Services {
        tracker: TrackerService::new(Arc::clone(&shared), Arc::new(DefaultClock)),
        reports: RecommendationService::new(shared, RecommendationPolicy::default()),
    }
}

/// Provides services over an empty store.
#[fixture]
pub fn empty() -> Services {
    services_over(InMemoryTrackerRepository::new())
}

/// Provides services over the bundled demo seed.
///
/// The demo has three employees: Ada (0 active), Brian (1 done task) and
/// Grace (executing the in-progress "Release 1.0"), plus two open subtasks
/// of the release.
#[fixture]
pub fn demo() -> Services {
    let path = Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/demo_seed.json");
    let document = load_seed_file(&path).expect("demo seed loads");
    let repository =
        InMemoryTrackerRepository::from_seed(document, &DefaultClock).expect("demo seed applies");
    services_over(repository)
}

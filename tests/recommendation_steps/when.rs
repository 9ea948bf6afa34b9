//! When steps for executor recommendation BDD scenarios.

use super::world::{RecommendationWorld, run_async};
use rstest_bdd_macros::when;

#[when("important tasks are requested")]
fn request_important_tasks(world: &mut RecommendationWorld) {
    world.last_report = Some(run_async(world.recommendations.important_tasks()));
}

#[when("the busiest employees are requested")]
fn request_busy_employees(world: &mut RecommendationWorld) {
    world.last_ranking = Some(run_async(world.recommendations.busy_employees()));
}

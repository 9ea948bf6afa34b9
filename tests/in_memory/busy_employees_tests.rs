//! Busy employee rankings over the in-memory store.

use crate::in_memory::helpers::{Services, demo, empty};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn demo_ranking_counts_everything_but_closed(demo: Services) {
    let ranking: Vec<(String, usize)> = demo
        .reports
        .busy_employees()
        .await
        .expect("ranking")
        .into_iter()
        .map(|busy| (busy.full_name, busy.active_tasks_count))
        .collect();

    assert_eq!(
        ranking,
        vec![
            ("Brian Kernighan".to_owned(), 1),
            ("Grace Hopper".to_owned(), 1),
            ("Ada Lovelace".to_owned(), 0),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_has_empty_ranking(empty: Services) {
    let ranking = empty.reports.busy_employees().await.expect("ranking");
    assert!(ranking.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn workload_minimum_tracks_idle_employee(demo: Services) {
    let workload = demo.reports.workload().await.expect("workload");

    assert_eq!(workload.stats().len(), 3);
    assert_eq!(workload.minimum(), 0);
}

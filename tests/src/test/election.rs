use crate::util::configuration::{narrow_edges, slow_delivery};
use crate::util::{drain, elect, init};
use rand::seq::SliceRandom;
use ringelect::error::ElectionError;
use ringelect::ElectionRun;
use ringelect_common::observation::NodeState;
use ringelect_common::types::{identifiers, Identifier};
use std::sync::Arc;

fn shuffled(size: usize) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    let mut ids: Vec<u64> = rand::seq::index::sample(&mut rng, 1000, size)
        .into_iter()
        .map(|i| i as u64 + 1)
        .collect();
    ids.shuffle(&mut rng);
    ids
}

#[tokio::test]
async fn single_node_becomes_leader() {
    init();
    let (observations, summary) = elect(vec![42]).await;

    assert_eq!(summary.leader, Identifier::new(42));
    assert_eq!(summary.states.len(), 1);
    assert_eq!(
        observations.last().map(|o| (o.state, o.last_token)),
        Some((NodeState::Leader, Some(Identifier::new(42))))
    );
}

#[tokio::test]
async fn lowest_identifier_wins() {
    init();
    let (_, summary) = elect(vec![5, 2, 8]).await;

    assert_eq!(summary.leader, Identifier::new(2));
    assert_eq!(summary.states[&Identifier::new(5)], NodeState::Lost);
    assert_eq!(summary.states[&Identifier::new(8)], NodeState::Lost);
}

#[tokio::test]
async fn exactly_one_leader_on_random_rings() {
    init();
    for size in 1..=12 {
        for _ in 0..5 {
            let ids = shuffled(size);
            let lowest = *ids.iter().min().unwrap();
            let (_, summary) = elect(ids.clone()).await;

            assert_eq!(summary.leader, Identifier::new(lowest), "ring: {:?}", ids);
            assert_eq!(summary.states.len(), size);
            for (&id, &state) in &summary.states {
                if id == summary.leader {
                    assert_eq!(state, NodeState::Leader);
                } else {
                    assert_eq!(state, NodeState::Lost, "ring: {:?}", ids);
                }
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn converge_under_parallel_scheduling() {
    init();
    let conf = Arc::new(narrow_edges());
    for _ in 0..10 {
        let ids = shuffled(16);
        let lowest = *ids.iter().min().unwrap();
        let run = ElectionRun::builder()
            .conf(conf.clone())
            .identifiers(identifiers(ids))
            .start()
            .expect("should start");

        let summary = run.outcome().await.expect("should elect a leader");
        assert_eq!(summary.leader, Identifier::new(lowest));
    }
}

#[tokio::test]
async fn converge_with_delayed_delivery() {
    init();
    tokio::time::pause();
    let run = ElectionRun::builder()
        .conf(Arc::new(slow_delivery()))
        .identifiers(identifiers(vec![30, 10, 20, 40]))
        .start()
        .expect("should start");

    let (observations, outcome) = drain(run).await;
    assert_eq!(outcome.map(|s| s.leader), Ok(Identifier::new(10)));
    assert!(!observations.is_empty());
}

#[tokio::test]
async fn refuse_duplicate_identifier() {
    init();
    let result = ElectionRun::start(identifiers(vec![3, 7, 3]));
    assert!(matches!(
        result,
        Err(ElectionError::DuplicateIdentifier(id)) if id == Identifier::new(3)
    ));
}

#[tokio::test]
async fn refuse_empty_ring() {
    init();
    let result = ElectionRun::start(vec![]);
    assert!(matches!(result, Err(ElectionError::InvalidTopology(_))));
}

#[tokio::test]
async fn stop_before_completion() {
    init();
    tokio::time::pause();
    let run = ElectionRun::builder()
        .conf(Arc::new(slow_delivery()))
        .identifiers(identifiers(vec![3, 1, 2]))
        .start()
        .expect("should start");

    run.stop();
    let (observations, outcome) = drain(run).await;

    assert_eq!(outcome, Err(ElectionError::Stopped));
    assert!(observations.iter().all(|o| o.state != NodeState::Leader));
}

#[tokio::test]
async fn run_without_observer() {
    init();
    let run = ElectionRun::start(identifiers(vec![9, 4, 6, 1, 7])).expect("should start");

    let summary = run.outcome().await.expect("should elect a leader");
    assert_eq!(summary.leader, Identifier::new(1));
}

use crate::util::{elect, init, of};
use ringelect_common::observation::{NodeState, RunObservation};
use ringelect_common::types::Identifier;

fn states(observations: &[RunObservation]) -> Vec<NodeState> {
    observations.iter().map(|o| o.state).collect()
}

fn tokens(observations: &[RunObservation]) -> Vec<Option<u64>> {
    observations
        .iter()
        .map(|o| o.last_token.map(u64::from))
        .collect()
}

/// Candidate observations, followed by either lost ones or a single leader one.
fn is_monotonic(states: &[NodeState]) -> bool {
    let decided = states
        .iter()
        .position(|s| s.is_terminal())
        .unwrap_or(states.len());
    let (undecided, decided) = states.split_at(decided);

    !undecided.is_empty()
        && undecided.iter().all(|&s| s == NodeState::Candidate)
        && match decided.first() {
            None => true,
            Some(NodeState::Leader) => decided.len() == 1,
            Some(_) => decided.iter().all(|&s| s == NodeState::Lost),
        }
}

#[tokio::test]
async fn trace_five_two_eight() {
    init();
    let (observations, summary) = elect(vec![5, 2, 8]).await;
    assert_eq!(summary.leader, Identifier::new(2));

    use NodeState::*;
    let five = of(&observations, 5);
    assert_eq!(states(&five), vec![Candidate, Candidate, Lost]);
    assert_eq!(tokens(&five), vec![None, Some(8), Some(2)]);

    let two = of(&observations, 2);
    assert_eq!(states(&two), vec![Candidate, Candidate, Leader]);
    assert_eq!(tokens(&two), vec![None, Some(5), Some(2)]);

    let eight = of(&observations, 8);
    assert_eq!(states(&eight), vec![Candidate, Lost]);
    assert_eq!(tokens(&eight), vec![None, Some(2)]);
}

#[tokio::test]
async fn states_never_go_back() {
    init();
    let ids = vec![17, 3, 25, 9, 12, 1, 30, 6];
    let (observations, _) = elect(ids.clone()).await;

    for id in ids {
        let history = states(&of(&observations, id));
        assert!(is_monotonic(&history), "{}: {:?}", id, history);
    }
}

#[tokio::test]
async fn leader_is_observed_last() {
    init();
    let (observations, summary) = elect(vec![8, 6, 4, 2, 7, 5, 3]).await;

    let last = observations.last().expect("should observe the run");
    assert_eq!(last.identifier, summary.leader);
    assert_eq!(last.state, NodeState::Leader);
    assert_eq!(
        observations
            .iter()
            .filter(|o| o.state == NodeState::Leader)
            .count(),
        1
    );

    // every other node has been observed losing before the leader was elected
    for &id in &[8, 6, 4, 7, 5, 3] {
        assert_eq!(
            of(&observations, id).last().map(|o| o.state),
            Some(NodeState::Lost)
        );
    }
}

#[test]
fn monotonic_histories() {
    use NodeState::*;
    assert!(is_monotonic(&[Candidate, Candidate, Lost, Lost]));
    assert!(is_monotonic(&[Candidate, Leader]));
    assert!(is_monotonic(&[Candidate]));
    assert!(!is_monotonic(&[Lost]));
    assert!(!is_monotonic(&[Candidate, Lost, Candidate]));
    assert!(!is_monotonic(&[Candidate, Lost, Leader]));
    assert!(!is_monotonic(&[Candidate, Leader, Leader]));
}

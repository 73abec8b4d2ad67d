use super::RunSummary;
use crate::error::ElectionError;
use crate::node::Report;
use crate::topology::RingTopology;
use ringelect_common::observation::{NodeState, RunObservation};
use ringelect_common::types::Identifier;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct Stop;

/// Watches the nodes of one run until a single leader is established, a node
/// fails, or the owner asks it to stop.
pub(crate) struct Supervisor {
    reports: mpsc::UnboundedReceiver<Report>,
    observations: mpsc::UnboundedSender<RunObservation>,
    stop: mpsc::Receiver<Stop>,
    nodes: Vec<JoinHandle<()>>,
    states: BTreeMap<Identifier, NodeState>,
}

impl Supervisor {
    pub fn new(
        topology: &RingTopology,
        reports: mpsc::UnboundedReceiver<Report>,
        observations: mpsc::UnboundedSender<RunObservation>,
        stop: mpsc::Receiver<Stop>,
        nodes: Vec<JoinHandle<()>>,
    ) -> Self {
        let states = topology
            .identifiers()
            .iter()
            .map(|&id| (id, NodeState::Sleeping))
            .collect();

        Self {
            reports,
            observations,
            stop,
            nodes,
            states,
        }
    }

    pub async fn run(mut self) -> Result<RunSummary, ElectionError> {
        let result = self.supervise().await;

        for node in &self.nodes {
            node.abort();
        }

        match &result {
            Ok(summary) => tracing::info!(leader = %summary.leader, "election finished"),
            Err(e) => tracing::warn!("election aborted: {}", e),
        }
        result
    }

    async fn supervise(&mut self) -> Result<RunSummary, ElectionError> {
        loop {
            tokio::select! {
                report = self.reports.recv() => match report {
                    Some(Report::Observed(observation)) => {
                        if let Some(summary) = self.handle_observation(observation)? {
                            return Ok(summary);
                        }
                    }
                    Some(Report::Failed(e)) => return Err(e),
                    None => {
                        tracing::error!("every node has stopped without electing a leader");
                        return Err(ElectionError::Stopped);
                    }
                },
                _ = self.stop.recv() => {
                    tracing::info!("stop requested");
                    return Err(ElectionError::Stopped);
                }
            }
        }
    }

    fn handle_observation(
        &mut self,
        observation: RunObservation,
    ) -> Result<Option<RunSummary>, ElectionError> {
        let id = observation.identifier;
        let previous = match self.states.get(&id) {
            Some(&state) => state,
            None => {
                return Err(ElectionError::protocol_violation(
                    id,
                    "observed a node outside the ring",
                ))
            }
        };

        if !is_valid_transition(previous, observation.state) {
            return Err(ElectionError::protocol_violation(
                id,
                format!("moved from {} to {}", previous, observation.state),
            ));
        }
        if observation.state == NodeState::Leader {
            self.check_leader(id)?;
        }
        self.states.insert(id, observation.state);

        tracing::trace!(
            id = %id,
            state = observation.state.to_ident(),
            token = ?observation.last_token,
            "observed"
        );
        if self.observations.send(observation).is_err() {
            tracing::trace!("nobody is observing the run");
        }

        if observation.state != NodeState::Leader {
            return Ok(None);
        }
        Ok(Some(RunSummary {
            leader: id,
            states: self.states.clone(),
        }))
    }

    /// A node may only be elected once every other node has lost.
    fn check_leader(&self, id: Identifier) -> Result<(), ElectionError> {
        match self
            .states
            .iter()
            .find(|&(&other, &state)| other != id && state != NodeState::Lost)
        {
            Some((other, state)) => Err(ElectionError::protocol_violation(
                id,
                format!("elected while {} is still a {}", other, state),
            )),
            None => Ok(()),
        }
    }
}

fn is_valid_transition(from: NodeState, to: NodeState) -> bool {
    use NodeState::*;
    matches!(
        (from, to),
        (Sleeping, Candidate)
            | (Candidate, Candidate)
            | (Candidate, Lost)
            | (Candidate, Leader)
            | (Lost, Lost)
    )
}

mod supervisor;

use self::supervisor::{Stop, Supervisor};
use crate::configuration::Configuration;
use crate::error::ElectionError;
use crate::node::NodeProcess;
use crate::topology::RingTopology;
use crate::transport::{channel, Transport};
use futures::Stream;
use ringelect_common::observation::{NodeState, RunObservation};
use ringelect_common::types::Identifier;
use std::collections::BTreeMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Final outcome of a completed election.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub leader: Identifier,
    pub states: BTreeMap<Identifier, NodeState>,
}

#[derive(Default)]
pub struct ElectionRunBuilder {
    conf: Arc<Configuration>,
    identifiers: Vec<Identifier>,
}

impl ElectionRunBuilder {
    pub fn conf(self, conf: Arc<Configuration>) -> Self {
        Self { conf, ..self }
    }

    pub fn identifiers(self, identifiers: Vec<Identifier>) -> Self {
        Self {
            identifiers,
            ..self
        }
    }

    /// Starts a run whose nodes talk over in-process channels.
    pub fn start(self) -> Result<ElectionRun, ElectionError> {
        let topology = RingTopology::new(self.identifiers)?;
        let transports = channel::ring(&topology, &self.conf.transport);
        ElectionRun::spawn(topology, transports)
    }
}

/// One running election.
///
/// The run yields every `RunObservation` reported by its nodes, in the order
/// the supervisor received them, and ends once the run is over. The outcome
/// is available from [`ElectionRun::outcome`]. Dropping the run stops it.
///
/// Must be created inside a tokio runtime.
pub struct ElectionRun {
    observations: UnboundedReceiverStream<RunObservation>,
    outcome: oneshot::Receiver<Result<RunSummary, ElectionError>>,
    stop: mpsc::Sender<Stop>,
}

impl ElectionRun {
    pub fn builder() -> ElectionRunBuilder {
        ElectionRunBuilder::default()
    }

    pub fn start(identifiers: Vec<Identifier>) -> Result<Self, ElectionError> {
        Self::builder().identifiers(identifiers).start()
    }

    /// Spawns one node per participant of `topology`, the node at position
    /// `i` using `transports[i]`.
    pub fn spawn<T>(topology: RingTopology, transports: Vec<T>) -> Result<Self, ElectionError>
    where
        T: Transport,
    {
        if transports.len() != topology.len() {
            return Err(ElectionError::InvalidTopology(
                "the number of transports does not match the ring size",
            ));
        }

        tracing::info!(size = topology.len(), "start an election");

        let (report_tx, report_rx) = mpsc::unbounded_channel();
        let nodes = topology
            .identifiers()
            .iter()
            .zip(transports.into_iter())
            .map(|(&id, transport)| NodeProcess::new(id, transport, report_tx.clone()).spawn())
            .collect();
        drop(report_tx);

        let (observation_tx, observation_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = mpsc::channel(1);
        let (outcome_tx, outcome_rx) = oneshot::channel();
        let supervisor = Supervisor::new(&topology, report_rx, observation_tx, stop_rx, nodes);

        tokio::spawn(async move {
            let result = supervisor.run().await;
            if outcome_tx.send(result).is_err() {
                tracing::debug!("outcome is dropped since the run has been released");
            }
        });

        Ok(ElectionRun {
            observations: UnboundedReceiverStream::new(observation_rx),
            outcome: outcome_rx,
            stop: stop_tx,
        })
    }

    /// Requests early termination. Every node is released and the outcome
    /// becomes `ElectionError::Stopped` unless the run has already finished.
    pub fn stop(&self) {
        match self.stop.try_send(Stop) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => tracing::debug!("stop has already been requested"),
            Err(TrySendError::Closed(_)) => tracing::debug!("the run has already finished"),
        }
    }

    /// Waits for the run to finish.
    pub async fn outcome(self) -> Result<RunSummary, ElectionError> {
        let ElectionRun { outcome, stop, .. } = self;
        let result = outcome.await.unwrap_or(Err(ElectionError::Stopped));
        drop(stop);
        result
    }
}

impl Stream for ElectionRun {
    type Item = RunObservation;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.observations).poll_next(cx)
    }
}

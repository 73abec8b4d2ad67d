use super::{Action, ElectionNode};
use crate::error::ElectionError;
use crate::message::{Message, Token};
use crate::transport::Transport;
use ringelect_common::observation::RunObservation;
use ringelect_common::types::Identifier;
use std::convert::TryFrom;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// What a node tells the supervisor of its run.
#[derive(Debug)]
pub(crate) enum Report {
    Observed(RunObservation),
    Failed(ElectionError),
}

/// The concurrent activity driving one `ElectionNode` over its transport.
pub(crate) struct NodeProcess<T> {
    node: ElectionNode,
    transport: T,
    reports: mpsc::UnboundedSender<Report>,
}

impl<T> NodeProcess<T>
where
    T: Transport,
{
    pub fn new(id: Identifier, transport: T, reports: mpsc::UnboundedSender<Report>) -> Self {
        Self {
            node: ElectionNode::new(id),
            transport,
            reports,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        let id = self.node.id();
        let reports = self.reports.clone();
        let span = tracing::debug_span!(target: "node", "node", id = %id);

        tokio::spawn(
            async move {
                if let Err(e) = self.run().await {
                    tracing::warn!("node stopped: {}", e);
                    if reports.send(Report::Failed(e)).is_err() {
                        tracing::debug!("run has already finished");
                    }
                }
            }
            .instrument(span),
        )
    }

    async fn run(mut self) -> Result<(), ElectionError> {
        let token = self.node.start()?;
        self.report();
        self.send(token).await?;

        loop {
            let token = self.receive().await?;
            let action = self.node.handle_token(token)?;
            self.report();

            match action {
                Action::Forward(token) => self.send(token).await?,
                Action::Discard => {}
                Action::Elected => return Ok(()),
            }
        }
    }

    async fn send(&mut self, token: Token) -> Result<(), ElectionError> {
        let id = self.node.id();
        self.transport
            .send(Message::from(token))
            .await
            .map_err(|e| ElectionError::transport(id, e))
    }

    async fn receive(&mut self) -> Result<Token, ElectionError> {
        let id = self.node.id();
        let message = self
            .transport
            .receive()
            .await
            .map_err(|e| ElectionError::transport(id, e))?;

        Token::try_from(message).map_err(|e| {
            tracing::error!("refused a message: {}", e);
            ElectionError::MalformedToken { identifier: id }
        })
    }

    fn report(&self) {
        let observation = self.node.observe();
        if self.reports.send(Report::Observed(observation)).is_err() {
            tracing::debug!(
                state = observation.state.to_ident(),
                "observation is dropped since the run has finished"
            );
        }
    }
}

//! A ring transport whose edges are held by the test.
//!
//! Every message a node sends stays on its edge until the test passes it to
//! the successor or discards it. Tests can also inject arbitrary messages
//! into any node.

pub mod error;

use self::error::HandleError;
use crate::message::Message;
use crate::topology::RingTopology;
use crate::transport::error::TransportError;
use crate::transport::Transport;
use async_trait::async_trait;
use ringelect_common::types::Identifier;
use tokio::sync::mpsc;

const BUFFER: usize = 16;

pub fn ring(topology: &RingTopology) -> (Vec<PartitionedTransport>, PartitionedRingHandle) {
    let mut transports = Vec::with_capacity(topology.len());
    let mut outgoing = Vec::with_capacity(topology.len());
    let mut incoming = Vec::with_capacity(topology.len());

    for _ in 0..topology.len() {
        let (out_tx, out_rx) = mpsc::channel(BUFFER);
        let (in_tx, in_rx) = mpsc::channel(BUFFER);
        transports.push(PartitionedTransport {
            tx: out_tx,
            rx: in_rx,
        });
        outgoing.push(out_rx);
        incoming.push(in_tx);
    }

    let handle = PartitionedRingHandle {
        topology: topology.clone(),
        outgoing,
        incoming,
    };
    (transports, handle)
}

pub struct PartitionedTransport {
    tx: mpsc::Sender<Message>,
    rx: mpsc::Receiver<Message>,
}

#[async_trait]
impl Transport for PartitionedTransport {
    async fn send(&mut self, message: Message) -> Result<(), TransportError> {
        self.tx
            .send(message)
            .await
            .map_err(|_| TransportError::SuccessorDropped)
    }

    async fn receive(&mut self) -> Result<Message, TransportError> {
        self.rx
            .recv()
            .await
            .ok_or(TransportError::PredecessorDropped)
    }
}

pub struct PartitionedRingHandle {
    topology: RingTopology,
    outgoing: Vec<mpsc::Receiver<Message>>,
    incoming: Vec<mpsc::Sender<Message>>,
}

impl PartitionedRingHandle {
    fn position_of(&self, id: Identifier) -> Result<usize, HandleError> {
        self.topology
            .position_of(id)
            .ok_or(HandleError::UnknownNode(id))
    }

    /// Waits for the next message `from` sends, without delivering it.
    async fn take(&mut self, from: Identifier) -> Result<Message, HandleError> {
        let position = self.position_of(from)?;
        self.outgoing[position]
            .recv()
            .await
            .ok_or(HandleError::NodeDropped(from))
    }

    /// Delivers the next message sent by `from` to its successor and returns it.
    pub async fn pass(&mut self, from: Identifier) -> Result<Message, HandleError> {
        let message = self.take(from).await?;
        let position = self.position_of(from)?;
        let successor = self.topology.successor_position(position);
        tracing::trace!(from = %from, token = ?message.token, "pass message");
        self.incoming[successor]
            .send(message.clone())
            .await
            .map_err(|_| HandleError::NodeDropped(self.topology.identifiers()[successor]))?;
        Ok(message)
    }

    /// Drops the next message sent by `from` and returns it.
    pub async fn discard(&mut self, from: Identifier) -> Result<Message, HandleError> {
        let message = self.take(from).await?;
        tracing::trace!(from = %from, token = ?message.token, "discard message");
        Ok(message)
    }

    /// Delivers `message` to `to` as if its predecessor had sent it.
    pub async fn inject(&self, to: Identifier, message: Message) -> Result<(), HandleError> {
        let position = self.position_of(to)?;
        self.incoming[position]
            .send(message)
            .await
            .map_err(|_| HandleError::NodeDropped(to))
    }
}

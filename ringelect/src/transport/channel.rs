use super::error::TransportError;
use super::Transport;
use crate::configuration::TransportConfiguration;
use crate::message::Message;
use crate::topology::RingTopology;
use async_trait::async_trait;
use rand::Rng;
use tokio::sync::mpsc;
use tokio::time::Duration;

/// Builds one transport per ring position, backed by one bounded channel for
/// every directed edge of the ring.
pub fn ring(topology: &RingTopology, conf: &TransportConfiguration) -> Vec<ChannelTransport> {
    let buffer = conf.edge_buffer();
    if conf.is_delayed() {
        tracing::debug!(
            delay = conf.delivery_delay_millis,
            jitter = conf.delivery_jitter_millis,
            "ring edges delay every delivery"
        );
    }
    let (senders, receivers): (Vec<_>, Vec<_>) =
        (0..topology.len()).map(|_| mpsc::channel(buffer)).unzip();

    receivers
        .into_iter()
        .enumerate()
        .map(|(position, rx)| ChannelTransport {
            tx: senders[topology.successor_position(position)].clone(),
            rx,
            delay_millis: conf.delivery_delay_millis,
            jitter_millis: conf.delivery_jitter_millis,
        })
        .collect()
}

pub struct ChannelTransport {
    tx: mpsc::Sender<Message>,
    rx: mpsc::Receiver<Message>,
    delay_millis: u64,
    jitter_millis: u64,
}

impl ChannelTransport {
    fn delivery_millis(&self) -> u64 {
        if self.jitter_millis == 0 {
            return self.delay_millis;
        }
        let mut rng = rand::thread_rng();
        self.delay_millis
            .saturating_add(rng.gen_range(0..=self.jitter_millis))
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&mut self, message: Message) -> Result<(), TransportError> {
        let millis = self.delivery_millis();
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }

        tracing::trace!(token = ?message.token, "send a message to the successor");
        self.tx
            .send(message)
            .await
            .map_err(|_| TransportError::SuccessorDropped)
    }

    async fn receive(&mut self) -> Result<Message, TransportError> {
        let message = self
            .rx
            .recv()
            .await
            .ok_or(TransportError::PredecessorDropped)?;
        tracing::trace!(token = ?message.token, "received a message from the predecessor");
        Ok(message)
    }
}

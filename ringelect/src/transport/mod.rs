pub mod channel;
pub mod error;

use crate::message::Message;
use async_trait::async_trait;
use error::TransportError;

/// One node's endpoint on the ring.
///
/// `send` delivers to the node's successor and `receive` waits for the next
/// message from its predecessor. Messages on a single edge are delivered
/// exactly once and in the order they were sent.
#[async_trait]
pub trait Transport: Send + 'static {
    async fn send(&mut self, message: Message) -> Result<(), TransportError>;

    async fn receive(&mut self) -> Result<Message, TransportError>;
}

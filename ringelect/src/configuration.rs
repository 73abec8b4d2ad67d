use serde::{Deserialize, Serialize};

const TRANSPORT_EDGE_BUFFER: usize = 16;
const TRANSPORT_DELIVERY_DELAY_MILLIS: u64 = 0;
const TRANSPORT_DELIVERY_JITTER_MILLIS: u64 = 0;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Configuration {
    #[serde(default)]
    pub transport: TransportConfiguration,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfiguration {
    /// Number of messages a single ring edge can hold.
    /// Values below 1 are treated as 1.
    pub edge_buffer: usize,
    /// Delay applied before a message is handed to the successor.
    pub delivery_delay_millis: u64,
    pub delivery_jitter_millis: u64,
}

impl Default for TransportConfiguration {
    fn default() -> Self {
        Self {
            edge_buffer: TRANSPORT_EDGE_BUFFER,
            delivery_delay_millis: TRANSPORT_DELIVERY_DELAY_MILLIS,
            delivery_jitter_millis: TRANSPORT_DELIVERY_JITTER_MILLIS,
        }
    }
}

impl TransportConfiguration {
    pub fn edge_buffer(&self) -> usize {
        self.edge_buffer.max(1)
    }

    pub fn is_delayed(&self) -> bool {
        self.delivery_delay_millis > 0 || self.delivery_jitter_millis > 0
    }
}

use ringelect::configuration::*;

/// Returns a configuration which holds every message on an edge for a while.
pub fn slow_delivery() -> Configuration {
    Configuration {
        transport: TransportConfiguration {
            delivery_delay_millis: 500,
            delivery_jitter_millis: 250,
            ..Default::default()
        },
    }
}

/// Returns a configuration whose edges hold a single message.
pub fn narrow_edges() -> Configuration {
    Configuration {
        transport: TransportConfiguration {
            edge_buffer: 1,
            delivery_jitter_millis: 3,
            ..Default::default()
        },
    }
}

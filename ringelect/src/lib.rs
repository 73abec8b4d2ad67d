pub mod configuration;
pub mod error;
pub mod message;
pub mod node;
pub mod run;
pub mod test_util;
pub mod topology;
pub mod transport;

pub use ringelect_common::observation::{NodeState, RunObservation};
pub use ringelect_common::types::Identifier;
pub use run::{ElectionRun, RunSummary};

#[cfg(test)]
mod tests;

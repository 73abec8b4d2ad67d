use crate::types::Identifier;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum NodeState {
    Sleeping,
    Candidate,
    Leader,
    Lost,
}

impl NodeState {
    pub const SLEEPING: &'static str = "sleeping";
    pub const CANDIDATE: &'static str = "candidate";
    pub const LEADER: &'static str = "leader";
    pub const LOST: &'static str = "lost";

    pub fn to_ident(&self) -> &'static str {
        match self {
            NodeState::Sleeping => Self::SLEEPING,
            NodeState::Candidate => Self::CANDIDATE,
            NodeState::Leader => Self::LEADER,
            NodeState::Lost => Self::LOST,
        }
    }

    /// Returns true once the node's candidacy is decided.
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeState::Leader | NodeState::Lost)
    }
}

impl Default for NodeState {
    fn default() -> Self {
        NodeState::Sleeping
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_ident())
    }
}

/// Snapshot of a node's observable status.
///
/// Observations are copied out of a running node whenever its state or the
/// last token it received changes. They never refer back to the node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunObservation {
    pub identifier: Identifier,
    pub state: NodeState,
    /// `None` until the node has received its first token.
    pub last_token: Option<Identifier>,
}

impl RunObservation {
    pub fn new(identifier: Identifier, state: NodeState, last_token: Option<Identifier>) -> Self {
        Self {
            identifier,
            state,
            last_token,
        }
    }
}

/// Renders the `(identifier, last_token)` label of a node.
impl fmt::Display for RunObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last_token {
            Some(token) => write!(f, "({}, {})", self.identifier, token),
            None => write!(f, "({}, -)", self.identifier),
        }
    }
}

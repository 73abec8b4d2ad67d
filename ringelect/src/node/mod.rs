mod process;

pub(crate) use process::{NodeProcess, Report};

use crate::error::ElectionError;
use crate::message::Token;
use ringelect_common::observation::{NodeState, RunObservation};
use ringelect_common::types::Identifier;

/// What a node does with a token it has just handled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Pass the token on to the successor unchanged.
    Forward(Token),
    /// Consume the token.
    Discard,
    /// The node's own token came back; it stops taking part in token traffic.
    Elected,
}

/// Election state machine of a single participant.
///
/// A token lower than the node's identifier is forwarded and closes the
/// node's candidacy, a token higher than the identifier is consumed. Only the
/// lowest identifier of the ring therefore survives a full circuit and comes
/// back to its originator.
#[derive(Clone, Debug)]
pub struct ElectionNode {
    id: Identifier,
    state: NodeState,
    last_token: Option<Identifier>,
}

impl ElectionNode {
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            state: NodeState::Sleeping,
            last_token: None,
        }
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn last_token(&self) -> Option<Identifier> {
        self.last_token
    }

    pub fn observe(&self) -> RunObservation {
        RunObservation::new(self.id, self.state, self.last_token)
    }

    /// Enters the election and returns the token to send to the successor.
    pub fn start(&mut self) -> Result<Token, ElectionError> {
        if self.state != NodeState::Sleeping {
            return Err(ElectionError::protocol_violation(
                self.id,
                format!("cannot start an election as a {}", self.state),
            ));
        }

        self.state = NodeState::Candidate;
        tracing::info!(id = %self.id, "become a candidate");
        Ok(Token::new(self.id))
    }

    pub fn handle_token(&mut self, token: Token) -> Result<Action, ElectionError> {
        match self.state {
            NodeState::Sleeping | NodeState::Leader => {
                return Err(ElectionError::protocol_violation(
                    self.id,
                    format!("received token {} as a {}", token.value(), self.state),
                ));
            }
            NodeState::Candidate | NodeState::Lost => {}
        }

        let value = token.value();
        self.last_token = Some(value);

        if value == self.id {
            self.state = NodeState::Leader;
            tracing::info!(id = %self.id, "own token came back. become a leader");
            return Ok(Action::Elected);
        }

        if value < self.id {
            if self.state == NodeState::Candidate {
                self.state = NodeState::Lost;
                tracing::info!(id = %self.id, token = %value, "become lost");
            }
            tracing::debug!(id = %self.id, token = %value, "forward token");
            return Ok(Action::Forward(token));
        }

        tracing::debug!(id = %self.id, token = %value, "discard token");
        Ok(Action::Discard)
    }
}

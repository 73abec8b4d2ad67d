use crate::transport::error::TransportError;
use ringelect_common::types::Identifier;
use std::error;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ElectionError {
    InvalidTopology(&'static str),
    DuplicateIdentifier(Identifier),
    MalformedToken {
        identifier: Identifier,
    },
    ProtocolViolation {
        identifier: Identifier,
        reason: String,
    },
    Transport {
        identifier: Identifier,
        error: TransportError,
    },
    Stopped,
}

impl fmt::Display for ElectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ElectionError::*;
        match self {
            InvalidTopology(reason) => write!(f, "invalid topology: {}", reason),
            DuplicateIdentifier(id) => write!(f, "{} already exists in the ring", id),
            MalformedToken { identifier } => {
                write!(f, "node {} received a token without a value", identifier)
            }
            ProtocolViolation { identifier, reason } => {
                write!(f, "protocol violation at node {}: {}", identifier, reason)
            }
            Transport { identifier, error } => {
                write!(f, "transport failure at node {}: ", identifier)?;
                error.fmt(f)
            }
            Stopped => write!(f, "election run was stopped before completion"),
        }
    }
}

impl error::Error for ElectionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ElectionError::Transport { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl ElectionError {
    pub fn protocol_violation<R: Into<String>>(identifier: Identifier, reason: R) -> Self {
        ElectionError::ProtocolViolation {
            identifier,
            reason: reason.into(),
        }
    }

    pub fn transport(identifier: Identifier, error: TransportError) -> Self {
        ElectionError::Transport { identifier, error }
    }
}

use std::{error, fmt};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TransportError {
    SuccessorDropped,
    PredecessorDropped,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::SuccessorDropped => write!(f, "successor has left the ring"),
            TransportError::PredecessorDropped => write!(f, "predecessor has left the ring"),
        }
    }
}

impl error::Error for TransportError {}

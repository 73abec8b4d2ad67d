use ringelect_common::types::Identifier;
use std::{error, fmt};

#[derive(Debug, Eq, PartialEq)]
pub enum HandleError {
    NodeDropped(Identifier),
    UnknownNode(Identifier),
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleError::NodeDropped(id) => write!(f, "node {} has been dropped", id),
            HandleError::UnknownNode(id) => write!(f, "node {} is not in the ring", id),
        }
    }
}

impl error::Error for HandleError {}

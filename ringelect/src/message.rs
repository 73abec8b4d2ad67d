use ringelect_common::types::Identifier;
use std::convert::TryFrom;
use std::{error, fmt};

/// Token circulated around the ring.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token(Identifier);

impl Token {
    pub fn new(value: Identifier) -> Self {
        Token(value)
    }

    pub fn value(&self) -> Identifier {
        self.0
    }
}

/// Unit of delivery on a ring edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub token: Option<Identifier>,
}

impl Message {
    pub fn malformed() -> Self {
        Message { token: None }
    }
}

impl From<Token> for Message {
    fn from(token: Token) -> Self {
        Message {
            token: Some(token.value()),
        }
    }
}

impl TryFrom<Message> for Token {
    type Error = ConversionError;

    fn try_from(message: Message) -> Result<Self, Self::Error> {
        message.token.map(Token).ok_or(ConversionError::MissingToken)
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum ConversionError {
    MissingToken,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::MissingToken => write!(f, "message does not carry a token"),
        }
    }
}

impl error::Error for ConversionError {}

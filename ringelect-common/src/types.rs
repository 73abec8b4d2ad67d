use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier owned by exactly one participant of a ring.
///
/// Identifiers are totally ordered; the election relies on every pair of
/// distinct identifiers being comparable.
#[derive(Copy, Clone, Ord, Hash, PartialOrd, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Identifier(u64);

impl From<u64> for Identifier {
    fn from(id: u64) -> Self {
        Identifier(id)
    }
}

impl From<Identifier> for u64 {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Identifier {
    pub fn new(id: u64) -> Self {
        Identifier(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Converts a list of raw values into identifiers, keeping their order.
pub fn identifiers<I>(values: I) -> Vec<Identifier>
where
    I: IntoIterator<Item = u64>,
{
    values.into_iter().map(Identifier::from).collect()
}

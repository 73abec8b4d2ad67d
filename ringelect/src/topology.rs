use crate::error::ElectionError;
use ringelect_common::types::Identifier;
use std::collections::HashSet;

/// A participant's fixed place in the ring.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub position: usize,
    pub identifier: Identifier,
    pub predecessor: Identifier,
    pub successor: Identifier,
}

/// Cyclic arrangement of the participants of one election run.
///
/// The position of an identifier in the input sequence decides its
/// neighbours: position `i` sends to `(i + 1) mod N` and receives from
/// `(i - 1 + N) mod N`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingTopology {
    identifiers: Vec<Identifier>,
}

impl RingTopology {
    pub fn new(identifiers: Vec<Identifier>) -> Result<Self, ElectionError> {
        if identifiers.is_empty() {
            return Err(ElectionError::InvalidTopology("a ring needs at least one node"));
        }

        let mut seen = HashSet::with_capacity(identifiers.len());
        for &id in &identifiers {
            if !seen.insert(id) {
                return Err(ElectionError::DuplicateIdentifier(id));
            }
        }

        Ok(Self { identifiers })
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    pub fn successor_position(&self, position: usize) -> usize {
        (position + 1) % self.len()
    }

    pub fn predecessor_position(&self, position: usize) -> usize {
        (position + self.len() - 1) % self.len()
    }

    pub fn participant(&self, position: usize) -> Option<Participant> {
        let identifier = *self.identifiers.get(position)?;
        Some(Participant {
            position,
            identifier,
            predecessor: self.identifiers[self.predecessor_position(position)],
            successor: self.identifiers[self.successor_position(position)],
        })
    }

    pub fn participants(&self) -> impl Iterator<Item = Participant> + '_ {
        (0..self.len()).filter_map(move |position| self.participant(position))
    }

    pub fn position_of(&self, id: Identifier) -> Option<usize> {
        self.identifiers.iter().position(|&i| i == id)
    }

    pub fn successor_of(&self, id: Identifier) -> Option<Identifier> {
        self.position_of(id)
            .map(|position| self.identifiers[self.successor_position(position)])
    }

    pub fn predecessor_of(&self, id: Identifier) -> Option<Identifier> {
        self.position_of(id)
            .map(|position| self.identifiers[self.predecessor_position(position)])
    }
}

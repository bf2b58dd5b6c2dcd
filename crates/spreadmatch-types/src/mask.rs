//! Masks handed out by participants and the masked factors clients build
//! from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Coordinate, FieldElement, ParticipantId, Role, SessionId};

/// One participant's masks for one slot, keyed by coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaskBundle(BTreeMap<Coordinate, FieldElement>);

impl MaskBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coordinate: Coordinate, mask: FieldElement) {
        self.0.insert(coordinate, mask);
    }

    #[must_use]
    pub fn get(&self, coordinate: Coordinate) -> Option<FieldElement> {
        self.0.get(&coordinate).copied()
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.0.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Coordinate, FieldElement)> for MaskBundle {
    fn from_iter<I: IntoIterator<Item = (Coordinate, FieldElement)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Blinded values for one slot: each coordinate's plaintext value times the
/// product of every participant's mask for that coordinate.
///
/// Safe to broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaskedFactors(BTreeMap<Coordinate, FieldElement>);

impl MaskedFactors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coordinate: Coordinate, factor: FieldElement) {
        self.0.insert(coordinate, factor);
    }

    #[must_use]
    pub fn get(&self, coordinate: Coordinate) -> Option<FieldElement> {
        self.0.get(&coordinate).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, FieldElement)> + '_ {
        self.0.iter().map(|(c, f)| (*c, *f))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Coordinate, FieldElement)> for MaskedFactors {
    fn from_iter<I: IntoIterator<Item = (Coordinate, FieldElement)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A participant's reply to a [`Request`](crate::Request): one
/// [`MaskBundle`] per price slot, ordered by slot index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskSet {
    pub session_id: SessionId,
    pub participant: ParticipantId,
    /// Total number of participants `N` in the session.
    pub participants: usize,
    pub role: Role,
    pub bundles: Vec<MaskBundle>,
}

impl MaskSet {
    /// Number of price slots covered.
    #[must_use]
    pub fn prices(&self) -> usize {
        self.bundles.len()
    }
}

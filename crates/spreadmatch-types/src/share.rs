//! Outcome shares produced by participants and consumed by reveal.

use serde::{Deserialize, Serialize};

use crate::{FieldElement, ParticipantId, SessionId};

/// One participant's share of the per-slot match indicator for a single
/// (ask, bid) evaluation.
///
/// Besides the values, a share names who produced it, how many
/// participants the session has, and which order pair it belongs to, so
/// that reveal can refuse an incomplete or mixed set instead of decoding
/// it into a wrong range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeShare {
    pub session_id: SessionId,
    pub participant: ParticipantId,
    /// Total number of participants `N` in the session.
    pub participants: usize,
    /// [`pair_digest`](crate::pair_digest) of the evaluated (ask, bid) pair.
    pub pair_digest: [u8; 32],
    /// One value per price slot, ordered by slot index.
    pub values: Vec<FieldElement>,
}

impl OutcomeShare {
    #[must_use]
    pub fn prices(&self) -> usize {
        self.values.len()
    }

    /// Short hex prefix of the pair digest, for logs.
    #[must_use]
    pub fn pair_tag(&self) -> String {
        hex::encode(&self.pair_digest[..4])
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl OutcomeShare {
    /// A share with a fixed session and pair digest, for decoder tests.
    pub fn dummy(participant: u32, participants: usize, values: Vec<FieldElement>) -> Self {
        Self {
            session_id: SessionId::from_bytes([0u8; 16]),
            participant: ParticipantId(participant),
            participants,
            pair_digest: [0u8; 32],
            values,
        }
    }
}

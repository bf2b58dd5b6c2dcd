//! Masked orders broadcast by clients to every participant.
//!
//! An order is the only thing a client publishes. It holds one
//! [`MaskedFactors`] bundle per price slot and never the plaintext price.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{MaskedFactors, Role, SessionId};

/// A masked ask or bid: exactly `P` bundles, ordered by slot index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedOrder {
    pub session_id: SessionId,
    pub role: Role,
    pub slots: Vec<MaskedFactors>,
}

impl MaskedOrder {
    /// Number of price slots covered.
    #[must_use]
    pub fn prices(&self) -> usize {
        self.slots.len()
    }

    /// SHA-256 commitment to the order's session, role and every masked factor.
    #[must_use]
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"spreadmatch:order:v1:");
        hasher.update(self.session_id.as_bytes());
        hasher.update([self.role.kind() as u8]);
        hasher.update((self.slots.len() as u64).to_le_bytes());

        for slot in &self.slots {
            hasher.update((slot.len() as u64).to_le_bytes());
            for (coordinate, factor) in slot.iter() {
                hasher.update((coordinate.id as u64).to_le_bytes());
                hasher.update((coordinate.kind as u64).to_le_bytes());
                hasher.update(factor.to_le_bytes());
            }
        }

        let result = hasher.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&result);
        digest
    }
}

/// Digest binding an outcome share to the exact (ask, bid) pair it was
/// computed from. Argument order matters.
#[must_use]
pub fn pair_digest(ask: &MaskedOrder, bid: &MaskedOrder) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"spreadmatch:pair:v1:");
    hasher.update(ask.digest());
    hasher.update(bid.digest());

    let result = hasher.finalize();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&result);
    digest
}

#[cfg(any(test, feature = "test-helpers"))]
impl MaskedOrder {
    /// An order whose every slot carries the role's coordinates with
    /// unmasked plaintext `value`. Useful for exercising validation.
    pub fn dummy(session_id: SessionId, role: Role, prices: usize, value: i64) -> Self {
        let slots = (0..prices)
            .map(|_| {
                role.coordinates()
                    .into_iter()
                    .map(|c| (c, crate::FieldElement::from_i64(value)))
                    .collect()
            })
            .collect();
        Self {
            session_id,
            role,
            slots,
        }
    }
}

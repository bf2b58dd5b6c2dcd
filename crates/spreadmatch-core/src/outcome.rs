//! Outcome combiner: a participant's share of the per-slot match indicator.
//!
//! Summed over all participants, slot `i` evaluates
//!
//! ```text
//! A_ask · A_bid − A_ask − A_bid  =  a·b − 1
//! ```
//!
//! with `a = A_ask − 1` (slot at or above the ask) and `b = A_bid − 1`
//! (slot at or below the bid): `0` inside the crossing range, `−1` outside.
//! The product is the protocol's only secure multiplication.

use spreadmatch_aggregation::compute;
use spreadmatch_types::{
    MaskedOrder, OutcomeShare, Result, Role, SpreadmatchError, pair_digest,
};

use crate::participant::{Participant, SessionBinding};

impl Participant {
    /// This participant's share of the outcome of one (ask, bid) pair.
    ///
    /// Both orders must be encoded against masks of this participant's
    /// session and cover all `P` slots.
    pub fn outcome(&self, ask: &MaskedOrder, bid: &MaskedOrder) -> Result<OutcomeShare> {
        let binding = self.require_binding()?;
        check_order(binding, ask, Role::Ask)?;
        check_order(binding, bid, Role::Bid)?;

        let values = self
            .slots
            .iter()
            .zip(ask.slots.iter().zip(&bid.slots))
            .map(|(slot, (a, b))| compute(&binding.signature, slot, &[a, b]))
            .collect::<Result<Vec<_>>>()?;

        let share = OutcomeShare {
            session_id: binding.session_id,
            participant: binding.participant,
            participants: binding.participants,
            pair_digest: pair_digest(ask, bid),
            values,
        };

        tracing::debug!(
            session = %share.session_id,
            participant = %share.participant,
            pair = %share.pair_tag(),
            prices = share.prices(),
            "Outcome share computed"
        );

        Ok(share)
    }
}

fn check_order(binding: &SessionBinding, order: &MaskedOrder, expected: Role) -> Result<()> {
    if order.role != expected {
        return Err(SpreadmatchError::MalformedOrder {
            reason: format!("expected a {expected} order, got {}", order.role),
        });
    }
    if order.session_id != binding.session_id {
        return Err(SpreadmatchError::MalformedOrder {
            reason: format!(
                "{expected} order belongs to session {}, participant is in {}",
                order.session_id, binding.session_id
            ),
        });
    }
    if order.prices() != binding.prices {
        return Err(SpreadmatchError::MalformedOrder {
            reason: format!(
                "{expected} order has {} slots, session has {}",
                order.prices(),
                binding.prices
            ),
        });
    }
    Ok(())
}

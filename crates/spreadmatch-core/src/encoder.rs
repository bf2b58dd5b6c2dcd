//! Client-side order encoding.
//!
//! A price `v` becomes, for every slot `i`, a value `A ∈ {1, 2}` on the
//! role's factor of the shared term and `-A` on the role's own term:
//!
//! ```text
//! k         = role.kind()            // ask 0, bid 1
//! threshold = v + k
//! A         = 1 + k   if i < threshold
//!             2 - k   otherwise
//! ```
//!
//! For the ask, `A - 1` is 1 exactly on slots `i >= v`; for the bid, it is
//! 1 exactly on slots `i <= v`. `A` is never zero, so the multiplicative
//! masking never blinds a zero.

use std::collections::BTreeSet;

use spreadmatch_aggregation::combine;
use spreadmatch_types::{
    FieldElement, MaskBundle, MaskSet, MaskedOrder, Result, Role, SpreadmatchError,
};

/// Plaintext value written to the shared coordinate for `slot`.
#[must_use]
pub fn slot_value(role: Role, slot: usize, price: usize) -> i64 {
    let k = role.kind();
    let threshold = price.saturating_add(k);
    // kind is 0 or 1
    let k = k as i64;
    if slot < threshold { 1 + k } else { 2 - k }
}

/// Build a masked order from every participant's mask set and a private price.
///
/// `mask_sets` must come from all `N` participants of one session for one
/// role. The result depends only on `(mask_sets, price)`.
pub fn encode_order(mask_sets: &[MaskSet], price: usize) -> Result<MaskedOrder> {
    let (first, prices) = check_mask_sets(mask_sets)?;
    if price >= prices {
        return Err(SpreadmatchError::PriceOutOfRange {
            reason: format!("price {price} outside [0, {prices})"),
        });
    }

    let role = first.role;
    let (shared, own) = (role.shared_coordinate(), role.own_coordinate());

    let slots = (0..prices)
        .map(|slot| {
            let a = slot_value(role, slot, price);
            let values = [
                (shared, FieldElement::from_i64(a)),
                (own, FieldElement::from_i64(-a)),
            ];
            let bundles: Vec<&MaskBundle> = mask_sets.iter().map(|m| &m.bundles[slot]).collect();
            combine(values, &bundles)
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        session = %first.session_id,
        role = %role,
        prices,
        participants = mask_sets.len(),
        "Order encoded"
    );

    Ok(MaskedOrder {
        session_id: first.session_id,
        role,
        slots,
    })
}

/// All mask sets must agree on session, role, participant count and slot
/// count, and come from each participant exactly once.
fn check_mask_sets(mask_sets: &[MaskSet]) -> Result<(&MaskSet, usize)> {
    let malformed = |reason: String| SpreadmatchError::MalformedMasks { reason };

    let first = mask_sets
        .first()
        .ok_or_else(|| malformed("no mask sets supplied".into()))?;
    let prices = first.prices();

    let mut seen = BTreeSet::new();
    for set in mask_sets {
        if set.session_id != first.session_id {
            return Err(malformed(format!(
                "mask set from {} belongs to session {}, expected {}",
                set.participant, set.session_id, first.session_id
            )));
        }
        if set.role != first.role {
            return Err(malformed(format!(
                "mask set from {} is for {}, expected {}",
                set.participant, set.role, first.role
            )));
        }
        if set.prices() != prices {
            return Err(malformed(format!(
                "mask set from {} covers {} slots, expected {prices}",
                set.participant,
                set.prices()
            )));
        }
        if set.participants != first.participants {
            return Err(malformed(format!(
                "mask set from {} reports {} participants, expected {}",
                set.participant, set.participants, first.participants
            )));
        }
        if !seen.insert(set.participant) {
            return Err(malformed(format!("duplicate mask set from {}", set.participant)));
        }
    }
    if seen.len() != first.participants {
        return Err(malformed(format!(
            "mask sets from {} of {} participants",
            seen.len(),
            first.participants
        )));
    }
    Ok((first, prices))
}

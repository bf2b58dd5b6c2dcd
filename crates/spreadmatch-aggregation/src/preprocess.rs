//! Joint one-time setup of a slot across all participants.
//!
//! This simulates the correlated-randomness dealer in-process: it needs
//! every participant's slot state at once and fills them together.

use std::collections::BTreeMap;

use rand::Rng;
use spreadmatch_types::{FieldElement, Result, Signature, SpreadmatchError};

use crate::SlotState;
use crate::slot::Preprocessed;

/// Preprocess one slot for `signature` across every participant's state.
///
/// Each participant `n` draws a non-zero mask `r_n(c)` for every
/// coordinate `c`. For each term `t`, the participants then receive
/// additive shares of `(∏_n ∏_{c ∈ t} r_n(c))^-1`.
///
/// Fails without touching any state if a slot is already preprocessed.
pub fn preprocess<R: Rng + ?Sized>(
    signature: &Signature,
    slots: &mut [&mut SlotState],
    rng: &mut R,
) -> Result<()> {
    if slots.is_empty() {
        return Err(SpreadmatchError::Configuration(
            "preprocessing needs at least one participant".into(),
        ));
    }
    if signature.terms() == 0 || signature.as_slice().contains(&0) {
        return Err(SpreadmatchError::Configuration(format!(
            "signature {signature} must have at least one term and no empty terms"
        )));
    }
    if let Some(index) = slots.iter().position(|s| s.is_preprocessed()) {
        return Err(SpreadmatchError::AlreadyInitialized(format!(
            "slot state of participant {index} already preprocessed"
        )));
    }

    let masks: Vec<BTreeMap<_, _>> = slots
        .iter()
        .map(|_| {
            signature
                .coordinates()
                .map(|c| (c, FieldElement::random_nonzero(rng)))
                .collect()
        })
        .collect();

    // coefficients[n][t]
    let mut coefficients = vec![Vec::with_capacity(signature.terms()); slots.len()];
    for term in 0..signature.terms() {
        let product: FieldElement = masks
            .iter()
            .flat_map(|m| m.iter().filter(|(c, _)| c.id == term).map(|(_, r)| *r))
            .product();
        let inverse = product.inverse().ok_or_else(|| {
            SpreadmatchError::Internal(format!("mask product of term {term} is zero"))
        })?;

        let mut remaining = inverse;
        for (n, share) in coefficients.iter_mut().enumerate() {
            let value = if n + 1 == slots.len() {
                remaining
            } else {
                let r = FieldElement::random(rng);
                remaining = remaining - r;
                r
            };
            share.push(value);
        }
    }

    for ((slot, masks), coefficients) in slots.iter_mut().zip(masks).zip(coefficients) {
        slot.preprocessed = Some(Preprocessed {
            signature: signature.clone(),
            masks,
            coefficients,
        });
    }

    tracing::trace!(
        participants = slots.len(),
        signature = %signature,
        "Slot preprocessed"
    );

    Ok(())
}

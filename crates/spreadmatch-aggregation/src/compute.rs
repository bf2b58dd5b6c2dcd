//! Non-interactive share computation.

use spreadmatch_types::{Coordinate, FieldElement, MaskedFactors, Result, Signature, SpreadmatchError};

use crate::SlotState;

/// This participant's additive share of `Σ_t ∏_{c ∈ t} value(c)`.
///
/// `factors` are the masked factor bundles of every contributing client for
/// this slot; together they must supply each coordinate of `signature`
/// exactly once. The share is `Σ_t coefficient(t) · ∏_{c ∈ t} masked(c)`;
/// summing the shares of all participants cancels every mask.
pub fn compute(
    signature: &Signature,
    slot: &SlotState,
    factors: &[&MaskedFactors],
) -> Result<FieldElement> {
    let preprocessed = slot
        .preprocessed
        .as_ref()
        .ok_or_else(|| SpreadmatchError::NotInitialized("slot state".into()))?;
    if preprocessed.signature != *signature {
        return Err(SpreadmatchError::SignatureMismatch {
            expected: preprocessed.signature.clone(),
            actual: signature.clone(),
        });
    }

    let mut share = FieldElement::zero();
    for (term, coefficient) in preprocessed.coefficients.iter().enumerate() {
        let mut product = *coefficient;
        for kind in 0..signature.factors(term) {
            product *= lookup(factors, Coordinate::new(term, kind))?;
        }
        share += product;
    }
    Ok(share)
}

fn lookup(factors: &[&MaskedFactors], coordinate: Coordinate) -> Result<FieldElement> {
    let mut found = factors.iter().filter_map(|bundle| bundle.get(coordinate));
    let value = found
        .next()
        .ok_or(SpreadmatchError::MissingFactor(coordinate))?;
    if found.next().is_some() {
        return Err(SpreadmatchError::MalformedOrder {
            reason: format!("coordinate {coordinate} supplied by more than one order"),
        });
    }
    Ok(value)
}

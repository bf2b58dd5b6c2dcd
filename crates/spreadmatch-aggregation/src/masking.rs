//! Handing out masks (participant side) and blinding values with them
//! (client side).

use spreadmatch_types::{
    Coordinate, FieldElement, MaskBundle, MaskedFactors, Result, SpreadmatchError,
};

use crate::SlotState;

/// This participant's mask for `coordinate` at one slot.
pub fn mask(slot: &SlotState, coordinate: Coordinate) -> Result<FieldElement> {
    let preprocessed = slot
        .preprocessed
        .as_ref()
        .ok_or_else(|| SpreadmatchError::NotInitialized("slot state".into()))?;
    preprocessed
        .masks
        .get(&coordinate)
        .copied()
        .ok_or(SpreadmatchError::CoordinateOutsideSignature(coordinate))
}

/// Blind plaintext values with the masks collected from every participant.
///
/// Each value becomes `value · ∏_n mask_n(coordinate)`. `masks` must hold
/// one bundle per participant, each covering every coordinate in `values`.
pub fn combine<I>(values: I, masks: &[&MaskBundle]) -> Result<MaskedFactors>
where
    I: IntoIterator<Item = (Coordinate, FieldElement)>,
{
    if masks.is_empty() {
        return Err(SpreadmatchError::MalformedMasks {
            reason: "no participant masks to combine".into(),
        });
    }

    values
        .into_iter()
        .map(|(coordinate, value)| {
            let blind = masks
                .iter()
                .enumerate()
                .map(|(n, bundle)| {
                    bundle
                        .get(coordinate)
                        .ok_or_else(|| SpreadmatchError::MalformedMasks {
                            reason: format!(
                                "bundle {n} has no mask for coordinate {coordinate}"
                            ),
                        })
                })
                .product::<Result<FieldElement>>()?;
            Ok((coordinate, value * blind))
        })
        .collect()
}

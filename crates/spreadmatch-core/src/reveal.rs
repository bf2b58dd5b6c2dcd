//! Reveal: decode the collected outcome shares into a spread.
//!
//! Per slot the shares sum to `−1` (outside the crossing range) or `0`
//! (inside). Adding 2, lifting the field element to an integer and
//! subtracting 1 turns that into a 0/1 indicator; the field modulus is far
//! larger than any honest aggregate, so the lift never wraps.
//!
//! The first set slot is the ask price; the bid price is the slot just
//! before the next unset slot (a 0 sentinel is assumed after the last slot).

use std::collections::BTreeSet;

use spreadmatch_types::{FieldElement, OutcomeShare, Result, Spread, SpreadmatchError};

/// Decode a complete set of outcome shares for one (ask, bid) evaluation.
///
/// Returns `None` when the bid is below the ask. The set is validated
/// first: every share must name the same session, participant count and
/// order pair, and each of the `N` participants must appear exactly once.
pub fn reveal(shares: &[OutcomeShare]) -> Result<Option<Spread>> {
    check_complete(shares)?;
    let values: Vec<&[FieldElement]> = shares.iter().map(|s| s.values.as_slice()).collect();
    let result = reveal_values(&values)?;

    match &result {
        Some(spread) => tracing::info!(
            pair = %shares[0].pair_tag(),
            spread = %spread,
            "Spread revealed"
        ),
        None => tracing::info!(pair = %shares[0].pair_tag(), "No crossing"),
    }

    Ok(result)
}

/// Decode bare share values, one sequence per participant.
///
/// Nothing here can tell a complete set from an incomplete or mixed one:
/// the caller must supply the values of every participant for the same
/// order pair. A missing participant yields garbage sums, which are
/// rejected as `MalformedShares` when they are not 0/1 indicators but may
/// in principle decode to a wrong range. Prefer [`reveal`].
pub fn reveal_values<S: AsRef<[FieldElement]>>(shares: &[S]) -> Result<Option<Spread>> {
    let indicators = indicators(shares)?;
    Ok(decode_indicators(&indicators))
}

/// Scan per-slot indicators for the crossing range.
#[must_use]
pub fn decode_indicators(indicators: &[bool]) -> Option<Spread> {
    let ask = indicators.iter().position(|set| *set)?;
    let width = indicators[ask + 1..]
        .iter()
        .position(|set| !*set)
        .unwrap_or(indicators.len() - ask - 1);
    Some(Spread::new(ask, ask + width))
}

fn indicators<S: AsRef<[FieldElement]>>(shares: &[S]) -> Result<Vec<bool>> {
    let first = shares
        .first()
        .ok_or_else(|| SpreadmatchError::MalformedShares {
            reason: "no shares supplied".into(),
        })?
        .as_ref();
    let prices = first.len();
    if prices == 0 {
        return Err(SpreadmatchError::MalformedShares {
            reason: "shares cover no price slots".into(),
        });
    }
    if let Some(bad) = shares.iter().position(|s| s.as_ref().len() != prices) {
        return Err(SpreadmatchError::MalformedShares {
            reason: format!(
                "share {bad} has {} slots, expected {prices}",
                shares[bad].as_ref().len()
            ),
        });
    }

    let two = FieldElement::from_u64(2);
    (0..prices)
        .map(|slot| {
            let sum: FieldElement = shares.iter().map(|s| s.as_ref()[slot]).sum();
            match (sum + two).to_small() {
                Some(1) => Ok(false),
                Some(2) => Ok(true),
                _ => Err(SpreadmatchError::MalformedShares {
                    reason: format!("slot {slot} does not reconstruct to an indicator"),
                }),
            }
        })
        .collect()
}

fn check_complete(shares: &[OutcomeShare]) -> Result<()> {
    let malformed = |reason: String| SpreadmatchError::MalformedShares { reason };

    let first = shares
        .first()
        .ok_or_else(|| malformed("no shares supplied".into()))?;
    let expected = first.participants;

    let mut seen = BTreeSet::new();
    for share in shares {
        if share.session_id != first.session_id {
            return Err(malformed(format!(
                "share from {} belongs to session {}, expected {}",
                share.participant, share.session_id, first.session_id
            )));
        }
        if share.pair_digest != first.pair_digest {
            return Err(malformed(format!(
                "share from {} was computed for order pair {}, expected {}",
                share.participant,
                share.pair_tag(),
                first.pair_tag()
            )));
        }
        if share.participants != expected {
            return Err(malformed(format!(
                "share from {} reports {} participants, expected {expected}",
                share.participant, share.participants
            )));
        }
        if share.participant.index() >= expected {
            return Err(malformed(format!(
                "{} outside a session of {expected} participants",
                share.participant
            )));
        }
        if !seen.insert(share.participant) {
            return Err(malformed(format!("duplicate share from {}", share.participant)));
        }
    }

    if seen.len() != expected {
        tracing::warn!(
            pair = %first.pair_tag(),
            expected,
            received = seen.len(),
            "Refusing to reveal from an incomplete share set"
        );
        return Err(SpreadmatchError::IncompleteShares {
            expected,
            received: seen.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(v: u128) -> FieldElement {
        FieldElement::from_canonical(v).unwrap()
    }

    /// Three participants, three slots; per-slot sums are -1, 0, 0.
    fn fixture_values() -> Vec<Vec<FieldElement>> {
        vec![
            vec![
                fe(191_698_724_691_236_883_130_020_433_754_311_906_556),
                fe(192_553_930_942_215_974_753_329_735_796_719_934_503),
                fe(96_579_911_660_242_665_783_999_103_846_211_668_558),
            ],
            vec![
                fe(203_604_595_735_418_244_883_008_588_068_488_824_844),
                fe(213_569_286_850_324_010_515_175_569_194_586_924_260),
                fe(97_156_260_151_248_494_516_609_766_219_626_086_128),
            ],
            vec![
                fe(285_261_413_415_221_798_913_720_193_040_735_660_613),
                fe(274_441_516_049_336_941_658_243_909_872_229_533_251),
                fe(146_546_195_109_447_303_162_765_737_365_930_441_321),
            ],
        ]
    }

    fn shares_from(values: Vec<Vec<FieldElement>>) -> Vec<OutcomeShare> {
        let n = values.len();
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| OutcomeShare::dummy(i as u32, n, v))
            .collect()
    }

    #[test]
    fn fixture_decodes_to_one_two() {
        assert_eq!(reveal_values(&fixture_values()).unwrap(), Some(Spread::new(1, 2)));
        assert_eq!(reveal(&shares_from(fixture_values())).unwrap(), Some(Spread::new(1, 2)));
    }

    #[test]
    fn decode_scans_first_run() {
        assert_eq!(decode_indicators(&[false, true, true, false]), Some(Spread::new(1, 2)));
        assert_eq!(decode_indicators(&[true, true, true]), Some(Spread::new(0, 2)));
        assert_eq!(decode_indicators(&[false, false, true]), Some(Spread::new(2, 2)));
        assert_eq!(decode_indicators(&[false, false, false]), None);
        assert_eq!(decode_indicators(&[]), None);
    }

    #[test]
    fn all_minus_one_is_no_match() {
        let minus_one = FieldElement::from_i64(-1);
        let values = vec![vec![minus_one; 4], vec![FieldElement::zero(); 4]];
        assert_eq!(reveal_values(&values).unwrap(), None);
    }

    #[test]
    fn missing_share_is_incomplete() {
        let mut shares = shares_from(fixture_values());
        shares.remove(1);
        let err = reveal(&shares).unwrap_err();
        assert!(matches!(
            err,
            SpreadmatchError::IncompleteShares {
                expected: 3,
                received: 2
            }
        ));
    }

    #[test]
    fn missing_share_values_do_not_decode() {
        let mut values = fixture_values();
        values.remove(0);
        assert!(reveal_values(&values).is_err());
    }

    #[test]
    fn duplicate_and_mixed_shares_rejected() {
        let mut shares = shares_from(fixture_values());
        shares[2] = shares[0].clone();
        assert!(matches!(
            reveal(&shares).unwrap_err(),
            SpreadmatchError::MalformedShares { .. }
        ));

        let mut shares = shares_from(fixture_values());
        shares[1].pair_digest = [1u8; 32];
        assert!(matches!(
            reveal(&shares).unwrap_err(),
            SpreadmatchError::MalformedShares { .. }
        ));

        let mut shares = shares_from(fixture_values());
        shares[2].participant = spreadmatch_types::ParticipantId(7);
        assert!(matches!(
            reveal(&shares).unwrap_err(),
            SpreadmatchError::MalformedShares { .. }
        ));
    }

    #[test]
    fn length_mismatch_rejected() {
        let mut values = fixture_values();
        values[2].pop();
        assert!(matches!(
            reveal_values(&values).unwrap_err(),
            SpreadmatchError::MalformedShares { .. }
        ));
        let empty: Vec<Vec<FieldElement>> = vec![];
        assert!(matches!(
            reveal_values(&empty).unwrap_err(),
            SpreadmatchError::MalformedShares { .. }
        ));
        assert!(matches!(
            reveal(&[]).unwrap_err(),
            SpreadmatchError::MalformedShares { .. }
        ));
    }
}

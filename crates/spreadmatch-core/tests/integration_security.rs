//! Integration test: correctness properties and misuse
//!
//! Every (ask, bid) pair on a small grid, determinism of the client side,
//! and the all-participants requirement of reveal.

use rand::SeedableRng;
use rand::rngs::StdRng;
use spreadmatch_core::{
    LocalSession, Participant, encode_order, preprocess, preprocess_with_rng, reveal,
    reveal_values,
};
use spreadmatch_types::*;

fn session(prices: usize, participants: usize, seed: u64) -> LocalSession {
    let mut rng = StdRng::seed_from_u64(seed);
    LocalSession::with_rng(SessionConfig::new(prices, participants), &mut rng).unwrap()
}

#[test]
fn every_pair_on_small_grid() {
    let s = session(6, 3, 100);
    for ask in 0..6 {
        for bid in 0..6 {
            let expected = (ask <= bid).then(|| Spread::new(ask, bid));
            assert_eq!(s.run(ask, bid).unwrap(), expected, "ask {ask} bid {bid}");
        }
    }
}

#[test]
fn single_slot_domain() {
    let s = session(1, 2, 101);
    assert_eq!(s.run(0, 0).unwrap(), Some(Spread::new(0, 0)));
}

#[test]
fn encoding_and_outcome_are_deterministic() {
    let s = session(8, 3, 102);
    let ask_a = s.submit(Role::Ask, 3).unwrap();
    let ask_b = s.submit(Role::Ask, 3).unwrap();
    let bid = s.submit(Role::Bid, 6).unwrap();
    assert_eq!(ask_a, ask_b);
    assert_eq!(ask_a.digest(), ask_b.digest());

    let first = s.evaluate(&ask_a, &bid).unwrap();
    let second = s.evaluate(&ask_b, &bid).unwrap();
    assert_eq!(first, second);
}

#[test]
fn independent_sessions_agree_on_the_result() {
    for seed in 200..205 {
        let s = session(10, 3, seed);
        assert_eq!(s.run(2, 7).unwrap(), Some(Spread::new(2, 7)));
        assert_eq!(s.run(8, 1).unwrap(), None);
    }
}

#[test]
fn thread_rng_session() {
    let s = LocalSession::new(SessionConfig::default()).unwrap();
    assert_eq!(s.participants().len(), 3);
    assert_eq!(s.run(4, 9).unwrap(), Some(Spread::new(4, 9)));
}

#[test]
fn reveal_refuses_any_omitted_participant() {
    let s = session(16, 3, 103);
    let ask = s.submit(Role::Ask, 4).unwrap();
    let bid = s.submit(Role::Bid, 9).unwrap();
    let shares = s.evaluate(&ask, &bid).unwrap();

    for omitted in 0..shares.len() {
        let mut partial = shares.clone();
        partial.remove(omitted);

        let err = reveal(&partial).unwrap_err();
        assert!(
            matches!(
                err,
                SpreadmatchError::IncompleteShares {
                    expected: 3,
                    received: 2
                }
            ),
            "omitted {omitted}: {err}"
        );
        assert!(err.to_string().contains("SM_ERR_301"));
    }
}

#[test]
fn bare_values_missing_any_participant_do_not_decode() {
    let s = session(16, 3, 104);
    let ask = s.submit(Role::Ask, 4).unwrap();
    let bid = s.submit(Role::Bid, 9).unwrap();
    let shares = s.evaluate(&ask, &bid).unwrap();
    let expected = Some(Spread::new(4, 9));

    for omitted in 0..shares.len() {
        let partial: Vec<&[FieldElement]> = shares
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != omitted)
            .map(|(_, sh)| sh.values.as_slice())
            .collect();
        match reveal_values(&partial) {
            Ok(result) => assert_ne!(result, expected, "omitted {omitted}"),
            Err(err) => assert!(
                matches!(err, SpreadmatchError::MalformedShares { .. }),
                "omitted {omitted}: {err}"
            ),
        }
    }
}

#[test]
fn shares_from_different_pairs_are_not_mixed() {
    let s = session(8, 2, 105);
    let ask = s.submit(Role::Ask, 2).unwrap();
    let bid_low = s.submit(Role::Bid, 3).unwrap();
    let bid_high = s.submit(Role::Bid, 6).unwrap();

    let mut shares = s.evaluate(&ask, &bid_low).unwrap();
    shares[1] = s.participants()[1].outcome(&ask, &bid_high).unwrap();
    assert!(matches!(
        reveal(&shares).unwrap_err(),
        SpreadmatchError::MalformedShares { .. }
    ));
}

#[test]
fn orders_do_not_cross_sessions() {
    let a = session(8, 2, 106);
    let b = session(8, 2, 107);
    let ask = a.submit(Role::Ask, 1).unwrap();
    let bid = b.submit(Role::Bid, 5).unwrap();
    assert!(matches!(
        a.evaluate(&ask, &bid).unwrap_err(),
        SpreadmatchError::MalformedOrder { .. }
    ));
}

#[test]
fn masks_from_another_session_are_rejected() {
    let a = session(8, 2, 108);
    let b = session(8, 2, 109);
    let mut masks = a.request_masks(&Request::ask()).unwrap();
    masks[1] = b.participants()[1].masks(&Request::ask()).unwrap();
    assert!(matches!(
        encode_order(&masks, 3).unwrap_err(),
        SpreadmatchError::MalformedMasks { .. }
    ));
}

#[test]
fn tampered_order_breaks_reveal() {
    let s = session(8, 3, 110);
    let mut ask = s.submit(Role::Ask, 2).unwrap();
    let bid = s.submit(Role::Bid, 5).unwrap();

    let coord = Role::Ask.shared_coordinate();
    let original = ask.slots[3].get(coord).unwrap();
    ask.slots[3].insert(coord, original + FieldElement::one());

    let shares = s.evaluate(&ask, &bid).unwrap();
    assert!(matches!(
        reveal(&shares).unwrap_err(),
        SpreadmatchError::MalformedShares { .. }
    ));
}

#[test]
fn participants_preprocess_only_once() {
    let mut nodes: Vec<Participant> = (0..3).map(|_| Participant::new()).collect();
    preprocess(&mut nodes, 4).unwrap();
    let err = preprocess(&mut nodes, 4).unwrap_err();
    assert!(matches!(err, SpreadmatchError::AlreadyInitialized(_)));

    let mut rng = StdRng::seed_from_u64(111);
    let mut fresh: Vec<Participant> = (0..2).map(|_| Participant::new()).collect();
    assert!(matches!(
        preprocess_with_rng(&mut fresh, 0, &mut rng).unwrap_err(),
        SpreadmatchError::Configuration(_)
    ));
    assert!(fresh.iter().all(|p| !p.is_initialized()));
}

#[test]
fn unprepared_participant_cannot_issue_masks() {
    let err = Participant::new().masks(&Request::ask()).unwrap_err();
    assert!(matches!(err, SpreadmatchError::NotInitialized(_)));
}

//! Preprocessing coordinator.
//!
//! Sets up every price slot across every participant before any trading.
//! Each slot is one joint call into the aggregation primitive over all
//! participants' slot states; a participant can never preprocess alone.

use rand::Rng;
use spreadmatch_aggregation::SlotState;
use spreadmatch_types::{
    ParticipantId, Result, SessionId, Signature, SpreadmatchError, constants,
};

use crate::participant::{Participant, SessionBinding};

/// Preprocess `prices` slots for all `participants` using the thread-local
/// CSPRNG. Returns the id of the new session.
pub fn preprocess(participants: &mut [Participant], prices: usize) -> Result<SessionId> {
    preprocess_with_rng(participants, prices, &mut rand::thread_rng())
}

/// Preprocess with a caller-supplied RNG.
///
/// All-or-nothing: if any participant is already bound, or any slot fails,
/// no participant is modified.
pub fn preprocess_with_rng<R: Rng + ?Sized>(
    participants: &mut [Participant],
    prices: usize,
    rng: &mut R,
) -> Result<SessionId> {
    if prices == 0 || prices > constants::MAX_PRICES {
        return Err(SpreadmatchError::Configuration(format!(
            "prices must be in [1, {}], got {prices}",
            constants::MAX_PRICES
        )));
    }
    if participants.is_empty() || participants.len() > constants::MAX_PARTICIPANTS {
        return Err(SpreadmatchError::Configuration(format!(
            "participants must be in [1, {}], got {}",
            constants::MAX_PARTICIPANTS,
            participants.len()
        )));
    }
    if let Some(index) = participants.iter().position(Participant::is_initialized) {
        return Err(SpreadmatchError::AlreadyInitialized(format!(
            "participant at position {index} is already bound to a session"
        )));
    }

    let signature = Signature::spread();
    let mut tables: Vec<Vec<SlotState>> = vec![vec![SlotState::new(); prices]; participants.len()];

    for slot in 0..prices {
        let mut states: Vec<&mut SlotState> = tables.iter_mut().map(|t| &mut t[slot]).collect();
        spreadmatch_aggregation::preprocess(&signature, &mut states, &mut *rng)?;
    }

    let session_id = SessionId::new();
    let count = participants.len();
    for (index, (participant, table)) in participants.iter_mut().zip(tables).enumerate() {
        let id = u32::try_from(index)
            .map_err(|_| SpreadmatchError::Internal(format!("participant index {index}")))?;
        participant.slots = table;
        participant.binding = Some(SessionBinding {
            session_id,
            participant: ParticipantId(id),
            participants: count,
            prices,
            signature: signature.clone(),
        });
    }

    tracing::info!(
        session = %session_id,
        participants = count,
        prices,
        signature = %signature,
        "Preprocessing complete"
    );

    Ok(session_id)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn fresh(n: usize) -> Vec<Participant> {
        (0..n).map(|_| Participant::new()).collect()
    }

    #[test]
    fn binds_every_participant_to_one_session() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut participants = fresh(3);
        let session = preprocess_with_rng(&mut participants, 16, &mut rng).unwrap();

        for (i, p) in participants.iter().enumerate() {
            let b = p.binding().unwrap();
            assert_eq!(b.session_id, session);
            assert_eq!(b.participant, ParticipantId(i as u32));
            assert_eq!(b.participants, 3);
            assert_eq!(b.prices, 16);
            assert_eq!(b.signature, Signature::spread());
            assert_eq!(p.slots.len(), 16);
            assert!(p.slots.iter().all(SlotState::is_preprocessed));
        }
    }

    #[test]
    fn second_preprocess_is_already_initialized() {
        let mut participants = fresh(2);
        preprocess(&mut participants, 4).unwrap();
        let err = preprocess(&mut participants, 4).unwrap_err();
        assert!(matches!(err, SpreadmatchError::AlreadyInitialized(_)));
    }

    #[test]
    fn mixed_set_left_untouched() {
        let mut bound = fresh(1);
        preprocess(&mut bound, 2).unwrap();
        let mut mixed = vec![Participant::new(), bound.remove(0)];
        let err = preprocess(&mut mixed, 2).unwrap_err();
        assert!(matches!(err, SpreadmatchError::AlreadyInitialized(_)));
        assert!(!mixed[0].is_initialized());
        assert!(mixed[0].slots.is_empty());
    }

    #[test]
    fn rejects_zero_prices_and_empty_set() {
        assert!(matches!(
            preprocess(&mut fresh(3), 0).unwrap_err(),
            SpreadmatchError::Configuration(_)
        ));
        assert!(matches!(
            preprocess(&mut [], 4).unwrap_err(),
            SpreadmatchError::Configuration(_)
        ));
    }
}

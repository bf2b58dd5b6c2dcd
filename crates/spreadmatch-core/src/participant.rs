//! A participant (node) of the crossing protocol.
//!
//! A participant owns one aggregation slot state per price slot. It never
//! sees a plaintext price: clients receive its masks, and it only ever
//! handles masked orders and its own preprocessed randomness.

use spreadmatch_aggregation::{SlotState, mask};
use spreadmatch_types::{
    Coordinate, MaskBundle, MaskSet, ParticipantId, Request, Result, SessionId, Signature,
    SpreadmatchError,
};

/// What preprocessing recorded about the session a participant belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBinding {
    pub session_id: SessionId,
    /// This participant's position, `0..participants`.
    pub participant: ParticipantId,
    /// Number of participants `N`.
    pub participants: usize,
    /// Number of price slots `P`.
    pub prices: usize,
    pub signature: Signature,
}

/// One party of the protocol.
///
/// Created empty, bound to a session by
/// [`preprocess`](crate::preprocess::preprocess), then used read-only.
#[derive(Debug, Default)]
pub struct Participant {
    pub(crate) binding: Option<SessionBinding>,
    pub(crate) slots: Vec<SlotState>,
}

impl Participant {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.binding.is_some()
    }

    #[must_use]
    pub fn binding(&self) -> Option<&SessionBinding> {
        self.binding.as_ref()
    }

    pub(crate) fn require_binding(&self) -> Result<&SessionBinding> {
        self.binding
            .as_ref()
            .ok_or_else(|| SpreadmatchError::NotInitialized("participant not preprocessed".into()))
    }

    /// Masks for every price slot, for the coordinates of `request`.
    pub fn masks(&self, request: &Request) -> Result<MaskSet> {
        let binding = self.require_binding()?;
        let coordinates = request.coordinates();
        if let Some(foreign) = coordinates.iter().find(|c| !binding.signature.contains(**c)) {
            return Err(SpreadmatchError::UnknownRequestShape {
                coordinates: format!("{foreign} not in signature {}", binding.signature),
            });
        }

        let bundles = self
            .slots
            .iter()
            .map(|slot| {
                coordinates
                    .iter()
                    .map(|c| mask(slot, *c).map(|m| (*c, m)))
                    .collect::<Result<MaskBundle>>()
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            session = %binding.session_id,
            participant = %binding.participant,
            role = %request.role(),
            prices = bundles.len(),
            "Masks issued"
        );

        Ok(MaskSet {
            session_id: binding.session_id,
            participant: binding.participant,
            participants: binding.participants,
            role: request.role(),
            bundles,
        })
    }

    /// Masks for a request given as raw coordinates.
    ///
    /// Fails with `UnknownRequestShape` unless the coordinates form the ask
    /// or the bid layout.
    pub fn masks_for_coordinates(&self, coordinates: &[Coordinate]) -> Result<MaskSet> {
        self.require_binding()?;
        self.masks(&Request::from_coordinates(coordinates)?)
    }
}

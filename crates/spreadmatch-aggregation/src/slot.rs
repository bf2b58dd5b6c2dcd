//! Per-slot state held by one participant.

use std::collections::BTreeMap;
use std::fmt;

use spreadmatch_types::{Coordinate, FieldElement, Signature};

/// One participant's state for one independent instance of the scheme.
///
/// Created empty, filled exactly once by [`preprocess`](crate::preprocess),
/// then only read.
#[derive(Clone, Default)]
pub struct SlotState {
    pub(crate) preprocessed: Option<Preprocessed>,
}

#[derive(Clone)]
pub(crate) struct Preprocessed {
    pub(crate) signature: Signature,
    /// This participant's multiplicative mask for every coordinate.
    pub(crate) masks: BTreeMap<Coordinate, FieldElement>,
    /// Additive share, per term, of the inverse of that term's full mask product.
    pub(crate) coefficients: Vec<FieldElement>,
}

impl SlotState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_preprocessed(&self) -> bool {
        self.preprocessed.is_some()
    }

    /// Signature this slot was preprocessed for.
    #[must_use]
    pub fn signature(&self) -> Option<&Signature> {
        self.preprocessed.as_ref().map(|p| &p.signature)
    }
}

// Masks and coefficients stay out of logs.
impl fmt::Debug for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotState")
            .field("signature", &self.signature())
            .finish_non_exhaustive()
    }
}

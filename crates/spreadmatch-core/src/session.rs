//! In-process driver for the full workflow.
//!
//! A [`LocalSession`] plays every role at once: it holds `N` preprocessed
//! participants, answers mask requests, encodes client orders, collects
//! outcome shares and reveals the spread. Useful for tests, simulations and
//! as a reference for wiring the pieces over a real transport.
//!
//! ```text
//! preprocess ─► request ─► masks (×N) ─► encode_order ─► outcome (×N) ─► reveal
//! ```
//!
//! Preprocessed randomness is meant to back a single evaluation. Running
//! several unrelated order pairs through one session works functionally but
//! weakens the masking; that trade-off is the caller's.

use rand::Rng;
use rust_decimal::Decimal;
use spreadmatch_types::{
    MaskSet, MaskedOrder, OutcomeShare, Request, Result, Role, SessionConfig, SessionId, Spread,
    SpreadmatchError,
};

use crate::{Participant, encode_order, preprocess::preprocess_with_rng, reveal};

/// `N` participants bound to one preprocessing run.
#[derive(Debug)]
pub struct LocalSession {
    config: SessionConfig,
    session_id: SessionId,
    participants: Vec<Participant>,
}

impl LocalSession {
    /// Validate `config` and preprocess its participants with the
    /// thread-local CSPRNG.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(config: SessionConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let mut participants: Vec<Participant> =
            (0..config.participants).map(|_| Participant::new()).collect();
        let session_id = preprocess_with_rng(&mut participants, config.prices, rng)?;
        Ok(Self {
            config,
            session_id,
            participants,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Every participant's mask set for `request`.
    pub fn request_masks(&self, request: &Request) -> Result<Vec<MaskSet>> {
        self.participants.iter().map(|p| p.masks(request)).collect()
    }

    /// Encode an order for `role` at slot `price`.
    pub fn submit(&self, role: Role, price: usize) -> Result<MaskedOrder> {
        let masks = self.request_masks(&Request::for_role(role))?;
        encode_order(&masks, price)
    }

    /// Every participant's outcome share for the pair.
    pub fn evaluate(&self, ask: &MaskedOrder, bid: &MaskedOrder) -> Result<Vec<OutcomeShare>> {
        self.participants.iter().map(|p| p.outcome(ask, bid)).collect()
    }

    /// Full round trip for an ask and a bid given as slot indices.
    pub fn run(&self, ask_price: usize, bid_price: usize) -> Result<Option<Spread>> {
        let ask = self.submit(Role::Ask, ask_price)?;
        let bid = self.submit(Role::Bid, bid_price)?;
        let shares = self.evaluate(&ask, &bid)?;
        reveal(&shares)
    }

    /// Full round trip for decimal prices on the configured grid. Returns
    /// the revealed `(ask_price, bid_price)`.
    pub fn run_decimal(
        &self,
        ask_price: Decimal,
        bid_price: Decimal,
    ) -> Result<Option<(Decimal, Decimal)>> {
        let grid = self.config.grid.as_ref().ok_or_else(|| {
            SpreadmatchError::Configuration("session has no price grid".into())
        })?;
        let spread = self.run(grid.slot_of(ask_price)?, grid.slot_of(bid_price)?)?;
        spread.map(|s| grid.spread_prices(&s)).transpose()
    }
}

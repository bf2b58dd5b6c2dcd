//! # spreadmatch-core
//!
//! **Private ask/bid crossing over a secure aggregation primitive.**
//!
//! `N` participants jointly decide whether a bid meets an ask and, if so,
//! reveal only the spread `[ask, bid]`. No participant ever sees a price.
//!
//! - **Preprocessing**: [`preprocess`] sets up `P` independent slots across
//!   all participants, once per session
//! - **Masking**: [`Participant::masks`] answers an ask or bid [`Request`]
//! - **Encoding**: [`encode_order`] turns a private price and all masks into
//!   a [`MaskedOrder`] (client side)
//! - **Outcome**: [`Participant::outcome`] produces one [`OutcomeShare`] per
//!   (ask, bid) pair
//! - **Reveal**: [`reveal`] checks the share set is complete and decodes the
//!   [`Spread`]
//!
//! Reveal needs the shares of *all* participants for the *same* order pair.
//! Shares carry enough metadata for [`reveal`] to enforce this; the bare
//! [`reveal_values`] cannot, and leaves it to the caller.
//!
//! [`Request`]: spreadmatch_types::Request
//! [`MaskedOrder`]: spreadmatch_types::MaskedOrder
//! [`OutcomeShare`]: spreadmatch_types::OutcomeShare
//! [`Spread`]: spreadmatch_types::Spread

pub mod encoder;
pub mod outcome;
pub mod participant;
pub mod preprocess;
pub mod reveal;
pub mod session;

pub use encoder::{encode_order, slot_value};
pub use participant::{Participant, SessionBinding};
pub use preprocess::{preprocess, preprocess_with_rng};
pub use reveal::{decode_indicators, reveal, reveal_values};
pub use session::LocalSession;

//! # spreadmatch-aggregation
//!
//! **Secure aggregation primitive for sum-of-products computations.**
//!
//! Clients blind their inputs with multiplicative masks obtained from every
//! participant; each participant then computes, without talking to anyone,
//! an additive share of `Σ_t ∏_{c ∈ t} x_c` for a fixed [`Signature`].
//! Summing all participants' shares reveals the result and nothing else.
//!
//! ```text
//! preprocess(signature, [slot_n])        -- once per slot, all participants
//! mask(slot_n, c)            -> r_n(c)   -- participant -> client
//! combine(x, [r_n])          -> x·∏ r_n  -- client, broadcast
//! compute(signature, slot_n, [masked])   -- participant -> collector
//! ```
//!
//! The preprocessing step is simulated in-process; a deployment replaces it
//! with a distributed dealer. Preprocessed randomness is meant to be used
//! for a single evaluation. Reuse is not detected here.
//!
//! [`Signature`]: spreadmatch_types::Signature

pub mod compute;
pub mod masking;
pub mod preprocess;
pub mod slot;

pub use compute::compute;
pub use masking::{combine, mask};
pub use preprocess::preprocess;
pub use slot::SlotState;

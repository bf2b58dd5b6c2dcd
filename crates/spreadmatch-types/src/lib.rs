//! # spreadmatch-types
//!
//! Shared types, errors, and configuration for **SpreadMatch**, a private
//! ask/bid crossing protocol run by `N` participants.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Field**: [`FieldElement`] over the 128-bit prime [`MODULUS`]
//! - **Computation layout**: [`Coordinate`], [`Signature`]
//! - **Roles and requests**: [`Role`], [`Request`]
//! - **Wire messages**: [`MaskBundle`], [`MaskSet`], [`MaskedFactors`], [`MaskedOrder`], [`OutcomeShare`]
//! - **Results**: [`Spread`], [`PriceGrid`]
//! - **Identifiers**: [`SessionId`], [`ParticipantId`]
//! - **Configuration**: [`SessionConfig`]
//! - **Errors**: [`SpreadmatchError`] with `SM_ERR_` prefix codes
//! - **Constants**: scheme constants and defaults

pub mod config;
pub mod constants;
pub mod coordinate;
pub mod error;
pub mod field;
pub mod grid;
pub mod ids;
pub mod mask;
pub mod order;
pub mod request;
pub mod share;
pub mod spread;

pub use config::*;
pub use coordinate::*;
pub use error::*;
pub use field::*;
pub use grid::*;
pub use ids::*;
pub use mask::*;
pub use order::*;
pub use request::*;
pub use share::*;
pub use spread::*;

// Constants are accessed via `spreadmatch_types::constants::FOO`
// (not re-exported to avoid name collisions).

//! Error types for SpreadMatch.
//!
//! All errors use the `SM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Session lifecycle errors
//! - 2xx: Request / order errors
//! - 3xx: Share / reveal errors
//! - 4xx: Aggregation primitive errors
//! - 9xx: General / internal errors
//!
//! Every error is a local contract violation surfaced to the caller
//! immediately. None of them are transient, so none are retried.

use thiserror::Error;

use crate::{Coordinate, Signature};

/// Central error enum for all SpreadMatch operations.
#[derive(Debug, Error)]
pub enum SpreadmatchError {
    // =================================================================
    // Session Lifecycle Errors (1xx)
    // =================================================================
    /// Preprocessing was invoked on a participant (or slot) that already
    /// holds preprocessed randomness.
    #[error("SM_ERR_100: Already initialized: {0}")]
    AlreadyInitialized(String),

    /// Masking or outcome computation was requested before preprocessing.
    #[error("SM_ERR_101: Not initialized: {0}")]
    NotInitialized(String),

    // =================================================================
    // Request / Order Errors (2xx)
    // =================================================================
    /// The request's coordinates match neither the ask nor the bid layout.
    #[error("SM_ERR_200: Unknown request shape: {coordinates}")]
    UnknownRequestShape { coordinates: String },

    /// The price is not a valid slot of the session's price domain.
    #[error("SM_ERR_201: Price out of range: {reason}")]
    PriceOutOfRange { reason: String },

    /// The mask sets handed to the order encoder are inconsistent.
    #[error("SM_ERR_202: Malformed masks: {reason}")]
    MalformedMasks { reason: String },

    /// A masked order does not fit the participant's session.
    #[error("SM_ERR_203: Malformed order: {reason}")]
    MalformedOrder { reason: String },

    // =================================================================
    // Share / Reveal Errors (3xx)
    // =================================================================
    /// The outcome shares cannot be decoded together.
    #[error("SM_ERR_300: Malformed shares: {reason}")]
    MalformedShares { reason: String },

    /// Fewer than all participants contributed an outcome share.
    #[error("SM_ERR_301: Incomplete shares: expected {expected} participants, received {received}")]
    IncompleteShares { expected: usize, received: usize },

    // =================================================================
    // Aggregation Primitive Errors (4xx)
    // =================================================================
    /// A coordinate does not belong to the signature's term layout.
    #[error("SM_ERR_400: Coordinate {0} outside signature")]
    CoordinateOutsideSignature(Coordinate),

    /// Share computation is missing a masked factor for a coordinate.
    #[error("SM_ERR_401: Missing masked factor for coordinate {0}")]
    MissingFactor(Coordinate),

    /// The slot was preprocessed for a different signature.
    #[error("SM_ERR_402: Signature mismatch: expected {expected}, got {actual}")]
    SignatureMismatch {
        expected: Signature,
        actual: Signature,
    },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("SM_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("SM_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid session parameters, bad config file, ...).
    #[error("SM_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SpreadmatchError>;

impl From<serde_json::Error> for SpreadmatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

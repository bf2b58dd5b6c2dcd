//! System-wide constants for SpreadMatch.

/// Factors per term of the spread computation: `ask·bid + ask + bid`.
pub const SPREAD_SIGNATURE: [usize; 3] = [2, 1, 1];

/// Default number of price slots per session.
pub const DEFAULT_PRICES: usize = 16;

/// Default number of participants per session.
pub const DEFAULT_PARTICIPANTS: usize = 3;

/// Upper bound on price slots per session. Each slot costs every
/// participant one preprocessed primitive instance.
pub const MAX_PRICES: usize = 1 << 20;

/// Upper bound on participants per session.
pub const MAX_PARTICIPANTS: usize = 1024;

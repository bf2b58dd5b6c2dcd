//! The revealed bid-ask spread.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Inclusive slot range `[ask, bid]` revealed when the bid crosses the ask.
///
/// `ask <= bid` always holds for a revealed spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spread {
    /// Ask price (lowest slot of the range).
    pub ask: usize,
    /// Bid price (highest slot of the range).
    pub bid: usize,
}

impl Spread {
    #[must_use]
    pub fn new(ask: usize, bid: usize) -> Self {
        debug_assert!(ask <= bid, "spread must satisfy ask <= bid");
        Self { ask, bid }
    }

    /// Number of slots in the range (at least 1).
    #[must_use]
    pub fn width(&self) -> usize {
        self.bid - self.ask + 1
    }

    #[must_use]
    pub fn contains(&self, slot: usize) -> bool {
        self.slots().contains(&slot)
    }

    #[must_use]
    pub fn slots(&self) -> RangeInclusive<usize> {
        self.ask..=self.bid
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.ask, self.bid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_spread() {
        let s = Spread::new(5, 5);
        assert_eq!(s.width(), 1);
        assert!(s.contains(5));
        assert!(!s.contains(4));
    }

    #[test]
    fn display_is_inclusive_range() {
        assert_eq!(Spread::new(4, 9).to_string(), "[4, 9]");
        assert_eq!(Spread::new(4, 9).slots().count(), 6);
    }
}
